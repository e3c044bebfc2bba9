use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common_types::{Priority, ResourceId};
use crate::config::SchedulerConfig;
use crate::error::{ConfigError, WorkloadError};

/// A resource a process holds for part of its life
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceRequest {
    /// The resource to acquire
    pub resource: ResourceId,
    /// Age of the process when it asks for the resource
    pub at: usize,
    /// Ticks of execution after which the resource is released
    pub duration: usize,
}

impl ResourceRequest {
    /// Ticks of the process life covered by this hold, as `[start, end)`
    fn span(&self) -> (usize, usize) {
        (self.at, self.at.saturating_add(self.duration))
    }
}

/// Description of a process to be forked during the simulation
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessSpec {
    /// Tick at which the process is forked
    #[serde(default)]
    pub arrival: usize,
    /// Ticks of execution the process needs
    pub lifespan: usize,
    /// Baseline priority
    #[serde(default)]
    pub priority: Priority,
    /// Resources the process holds during its life
    #[serde(default)]
    pub acquire: Vec<ResourceRequest>,
}

impl ProcessSpec {
    pub fn new(arrival: usize, lifespan: usize) -> Self {
        Self {
            arrival,
            lifespan,
            priority: 0,
            acquire: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Adds a hold of `resource` from age `at` for `duration` ticks
    pub fn with_request(mut self, resource: usize, at: usize, duration: usize) -> Self {
        self.acquire.push(ResourceRequest {
            resource: ResourceId::new(resource),
            at,
            duration,
        });
        self
    }

    /// Checks the process against the scheduler it will run on
    ///
    /// * `index` - position of the process in the workload, for errors
    /// * `config` - the scheduler configuration
    pub fn validate(&self, index: usize, config: &SchedulerConfig) -> Result<(), WorkloadError> {
        if self.lifespan == 0 {
            return Err(WorkloadError::ZeroLifespan { index });
        }

        if self.priority > config.max_prio {
            return Err(WorkloadError::PriorityOutOfRange {
                index,
                priority: self.priority,
                max: config.max_prio,
            });
        }

        for (position, request) in self.acquire.iter().enumerate() {
            let resource = request.resource;

            if resource.get() >= config.resources {
                return Err(WorkloadError::UnknownResource {
                    index,
                    resource,
                    available: config.resources,
                });
            }

            if request.duration == 0 {
                return Err(WorkloadError::EmptyHold { index, resource });
            }

            if request.span().1 > self.lifespan {
                return Err(WorkloadError::HoldPastLifespan { index, resource });
            }

            let (start, end) = request.span();
            let overlaps = self.acquire[..position]
                .iter()
                .filter(|other| other.resource == resource)
                .any(|other| {
                    let (other_start, other_end) = other.span();
                    start < other_end && other_start < end
                });

            if overlaps {
                return Err(WorkloadError::OverlappingHold { index, resource });
            }
        }

        Ok(())
    }
}

/// A scheduler configuration together with the processes to run on it
///
/// ```toml
/// [scheduler]
/// policy = "pip"
/// resources = 2
///
/// [[process]]
/// arrival = 0
/// lifespan = 6
/// priority = 1
/// acquire = [{ resource = 0, at = 1, duration = 4 }]
/// ```
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default, rename = "process")]
    pub processes: Vec<ProcessSpec>,
}

impl Scenario {
    pub fn new(scheduler: SchedulerConfig, processes: Vec<ProcessSpec>) -> Self {
        Self {
            scheduler,
            processes,
        }
    }

    /// Parses and validates a scenario
    pub fn from_toml(content: &str) -> Result<Scenario, ConfigError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;

        Ok(scenario)
    }

    /// Reads a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Scenario, ConfigError> {
        let content = fs::read_to_string(path)?;
        Scenario::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduler.validate()?;

        for (index, process) in self.processes.iter().enumerate() {
            process.validate(index, &self.scheduler)?;
        }

        Ok(())
    }
}
