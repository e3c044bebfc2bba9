//! A scheduler library.
//!
//! This library provides the decision core of a discrete time process
//! scheduling simulator: eight scheduling policies sharing one process,
//! resource and queue model, plus a tick driver that runs a workload
//! through them.
//!

mod schedulers;
pub use schedulers::{
    Fcfs, PriorityAging, PriorityCeiling, PriorityInheritance, PriorityScheduler, RoundRobin,
    ShortestJobFirst, ShortestTimeToComplete,
};

mod scheduler;
pub use crate::scheduler::{Pid, Policy, ProcessStatus, Scheduler};

mod common_types;
pub use crate::common_types::{Priority, ResourceId, Timestamp, MAX_PRIO, MIN_PRIO};

mod process_control_block;
pub use crate::process_control_block::{Membership, ProcessControlBlock};

mod queue;
pub use crate::queue::ProcessQueue;

mod resource;
pub use crate::resource::Resource;

mod scheduler_info;
pub use crate::scheduler_info::SchedulerInfo;

mod process_manager;
pub use crate::process_manager::ProcessManager;

mod collector;
pub use crate::collector::{collect_all, Collector};

mod common_funcs;

mod config;
pub use crate::config::{PolicyKind, SchedulerConfig};

mod error;
pub use crate::error::{ConfigError, SchedulerError, SchedulerResult, SimulationError, WorkloadError};

mod workload;
pub use crate::workload::{ProcessSpec, ResourceRequest, Scenario};

mod simulator;
pub use crate::simulator::{EventKind, ProcessRecord, Simulator, Trace, TraceEvent};

/// Returns a `Scheduler` running the policy selected in `config`
///
/// * `config` - the policy, the number of resources and the ceiling
///              priority
pub fn scheduler(config: &SchedulerConfig) -> Result<Scheduler, ConfigError> {
    config.validate()?;
    Ok(Scheduler::new(config))
}

/// Runs `scenario` to completion and returns what happened
pub fn simulate(scenario: &Scenario) -> Result<Trace, SimulationError> {
    Simulator::new(scenario)?.run()
}

#[cfg(test)]
mod tests;
