use crate::common_types::{Priority, ResourceId};
use crate::scheduler::Pid;

pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Misuse of the scheduler by the driver
///
/// Broken process or resource invariants are not reported here, they
/// panic on the spot.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulerError {
    #[error("resource {0} does not exist")]
    UnknownResource(ResourceId),

    #[error("no process is running")]
    NoRunningProcess,

    #[error("a process needs a lifespan of at least one tick")]
    ZeroLifespan,

    #[error("priority {priority} is above the maximum of {max}")]
    PriorityOutOfRange { priority: Priority, max: Priority },
}

/// Errors while reading a scenario or a scheduler configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown scheduling policy: {0}")]
    UnknownPolicy(String),

    #[error("max_prio must be greater than zero")]
    InvalidMaxPrio,

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid workload: {0}")]
    Workload(#[from] WorkloadError),
}

/// A process description that cannot be simulated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkloadError {
    #[error("process #{index} has a lifespan of zero")]
    ZeroLifespan { index: usize },

    #[error("process #{index} has priority {priority}, the maximum is {max}")]
    PriorityOutOfRange {
        index: usize,
        priority: Priority,
        max: Priority,
    },

    #[error("process #{index} requests {resource}, only {available} resources exist")]
    UnknownResource {
        index: usize,
        resource: ResourceId,
        available: usize,
    },

    #[error("process #{index} holds {resource} for zero ticks")]
    EmptyHold { index: usize, resource: ResourceId },

    #[error("process #{index} holds {resource} past its lifespan")]
    HoldPastLifespan { index: usize, resource: ResourceId },

    #[error("process #{index} holds {resource} twice at the same time")]
    OverlappingHold { index: usize, resource: ResourceId },
}

/// Reasons a simulation stops before every process finished
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("deadlock at tick {tick}: {blocked:?} wait forever")]
    Deadlock { tick: usize, blocked: Vec<Pid> },

    #[error("simulation did not finish within {0} ticks")]
    TickLimit(usize),

    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
