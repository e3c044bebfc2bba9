//! Behaviour of the policies, driven through the simulator or directly
//! through the `Scheduler` calls.

use crate::{simulate, PolicyKind, ProcessSpec, Scenario, SchedulerConfig, Simulator, Trace};
use crate::{Pid, Scheduler};

mod invariants;
mod pcp;
mod pip;
mod priority;
mod priority_aging;
mod stcf;

fn scenario(policy: PolicyKind, processes: Vec<ProcessSpec>) -> Scenario {
    let config = SchedulerConfig::default()
        .with_policy(policy)
        .with_resources(2);

    Scenario::new(config, processes)
}

/// Runs the processes to completion under `policy`
fn run(policy: PolicyKind, processes: Vec<ProcessSpec>) -> Trace {
    simulate(&scenario(policy, processes)).unwrap()
}

fn simulator(policy: PolicyKind, processes: Vec<ProcessSpec>) -> Simulator {
    Simulator::new(&scenario(policy, processes)).unwrap()
}

fn scheduler(policy: PolicyKind) -> Scheduler {
    Scheduler::new(&SchedulerConfig::default().with_policy(policy).with_resources(2))
}

/// Steps the simulator `ticks` times
fn advance(simulator: &mut Simulator, ticks: usize) {
    for _ in 0..ticks {
        simulator.step().unwrap();
    }
}

/// The timeline as plain numbers, 0 for idle ticks
fn timeline(trace: &Trace) -> Vec<usize> {
    trace
        .timeline
        .iter()
        .map(|slot| slot.map_or(0, |pid| pid.get()))
        .collect()
}

fn pid(pid: usize) -> Pid {
    Pid::new(pid)
}

fn priority_of(simulator: &Simulator, pid: Pid) -> u32 {
    simulator.scheduler().process(pid).unwrap().priority()
}
