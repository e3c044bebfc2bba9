use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::common_types::{Priority, MAX_PRIO};
use crate::error::ConfigError;
use crate::scheduler::Policy;
use crate::schedulers::{
    Fcfs, PriorityAging, PriorityCeiling, PriorityInheritance, PriorityScheduler, RoundRobin,
    ShortestJobFirst, ShortestTimeToComplete,
};

/// The scheduling algorithms that can be selected by name
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum PolicyKind {
    #[default]
    Fcfs,
    Sjf,
    Stcf,
    RoundRobin,
    Priority,
    PriorityAging,
    PriorityCeiling,
    PriorityInheritance,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 8] = [
        PolicyKind::Fcfs,
        PolicyKind::Sjf,
        PolicyKind::Stcf,
        PolicyKind::RoundRobin,
        PolicyKind::Priority,
        PolicyKind::PriorityAging,
        PolicyKind::PriorityCeiling,
        PolicyKind::PriorityInheritance,
    ];

    /// Short name, as accepted on the command line
    pub fn short_name(&self) -> &'static str {
        match self {
            PolicyKind::Fcfs => "fcfs",
            PolicyKind::Sjf => "sjf",
            PolicyKind::Stcf => "stcf",
            PolicyKind::RoundRobin => "rr",
            PolicyKind::Priority => "prio",
            PolicyKind::PriorityAging => "pa",
            PolicyKind::PriorityCeiling => "pcp",
            PolicyKind::PriorityInheritance => "pip",
        }
    }

    /// Returns a fresh instance of the policy
    pub fn build(&self) -> Box<dyn Policy> {
        match self {
            PolicyKind::Fcfs => Box::new(Fcfs),
            PolicyKind::Sjf => Box::new(ShortestJobFirst),
            PolicyKind::Stcf => Box::new(ShortestTimeToComplete),
            PolicyKind::RoundRobin => Box::new(RoundRobin),
            PolicyKind::Priority => Box::new(PriorityScheduler),
            PolicyKind::PriorityAging => Box::new(PriorityAging),
            PolicyKind::PriorityCeiling => Box::new(PriorityCeiling),
            PolicyKind::PriorityInheritance => Box::new(PriorityInheritance),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace(&['-', ' ', '+'][..], "_");

        match name.as_str() {
            "fcfs" => Ok(PolicyKind::Fcfs),
            "sjf" | "shortest_job_first" => Ok(PolicyKind::Sjf),
            "stcf" | "shortest_time_to_complete_first" => Ok(PolicyKind::Stcf),
            "rr" | "round_robin" => Ok(PolicyKind::RoundRobin),
            "prio" | "priority" => Ok(PolicyKind::Priority),
            "pa" | "priority_aging" | "priority___aging" => Ok(PolicyKind::PriorityAging),
            "pcp" | "priority_ceiling" | "priority___pcp_protocol" => {
                Ok(PolicyKind::PriorityCeiling)
            }
            "pip" | "priority_inheritance" | "priority___pip_protocol" => {
                Ok(PolicyKind::PriorityInheritance)
            }
            _ => Err(ConfigError::UnknownPolicy(s.to_string())),
        }
    }
}

impl TryFrom<String> for PolicyKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Scheduler settings fixed at simulation start
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// The policy deciding who runs
    pub policy: PolicyKind,
    /// Number of exclusive resources
    pub resources: usize,
    /// Ceiling priority and aging cap
    pub max_prio: Priority,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            policy: PolicyKind::default(),
            resources: 8,
            max_prio: MAX_PRIO,
        }
    }
}

impl SchedulerConfig {
    pub fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_resources(mut self, resources: usize) -> Self {
        self.resources = resources;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_prio == 0 {
            return Err(ConfigError::InvalidMaxPrio);
        }

        Ok(())
    }
}
