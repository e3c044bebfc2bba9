use std::fmt;
use std::ops::Add;

use serde::Deserialize;

/// Numeric priority of a process, higher runs first
pub type Priority = u32;

pub const MIN_PRIO: Priority = 0;
/// Default ceiling used by the ceiling protocol and as the aging cap
pub const MAX_PRIO: Priority = 100;

/// A point in simulated time, counted in ticks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(usize);

impl Timestamp {
    /// Creates a new Timestamp object
    ///
    /// * `time` - inital value of the Timestamp
    pub fn new(time: usize) -> Timestamp {
        Timestamp(time)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Add<usize> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: usize) -> Self::Output {
        Timestamp::new(self.0 + rhs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an exclusive resource
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(usize);

impl ResourceId {
    /// Creates a new ResourceId object
    ///
    /// * `id` - index of the resource in the resource table
    pub fn new(id: usize) -> ResourceId {
        ResourceId(id)
    }

    /// Gets the resource id as a usize value
    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}
