use crate::common_types::{Priority, ResourceId, Timestamp};
use crate::scheduler::{Pid, ProcessStatus};

/// The queue a process is currently linked into
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Membership {
    /// The ready queue
    Ready,
    /// The wait queue of a resource
    Wait(ResourceId),
}

/// The record the scheduler keeps for every live process
#[derive(Clone, Debug)]
pub struct ProcessControlBlock {
    /// The PID of the process
    pid: Pid,
    /// The state of the process
    status: ProcessStatus,
    /// Ticks the process has executed so far
    ///
    /// Never exceeds `lifespan`
    age: usize,
    /// Ticks the process needs before it finishes
    lifespan: usize,
    /// The effective priority
    ///
    /// Aging, inheritance and the ceiling protocol move it away
    /// from `priority_orig`
    priority: Priority,
    /// The priority that process had when it was created
    priority_orig: Priority,
    /// The timestamp when process was forked
    arrival_time: Timestamp,
    /// The queue that currently holds the process, if any
    membership: Option<Membership>,
}

impl ProcessControlBlock {
    /// Creates a new Process Control Block in the ready state
    ///
    /// * `pid` - PID of the new process
    /// * `lifespan` - number of ticks the process has to execute
    /// * `priority` - baseline priority of the new process
    /// * `arrival` - timestamp when process is created
    pub fn new(pid: Pid, lifespan: usize, priority: Priority, arrival: Timestamp) -> Self {
        ProcessControlBlock {
            pid,
            status: ProcessStatus::Ready,
            age: 0,
            lifespan,
            priority,
            priority_orig: priority,
            arrival_time: arrival,
            membership: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn status(&self) -> ProcessStatus {
        self.status
    }

    pub fn age(&self) -> usize {
        self.age
    }

    pub fn lifespan(&self) -> usize {
        self.lifespan
    }

    /// Ticks left until the process finishes
    pub fn remaining(&self) -> usize {
        self.lifespan - self.age
    }

    pub fn is_complete(&self) -> bool {
        self.age >= self.lifespan
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn priority_orig(&self) -> Priority {
        self.priority_orig
    }

    pub fn arrival_time(&self) -> Timestamp {
        self.arrival_time
    }

    pub fn membership(&self) -> Option<Membership> {
        self.membership
    }

    pub fn is_blocked(&self) -> bool {
        self.status == ProcessStatus::Blocked
    }

    pub(crate) fn set_state(&mut self, status: ProcessStatus) {
        self.status = status;
    }

    pub(crate) fn set_running(&mut self) {
        self.set_state(ProcessStatus::Running);
    }

    pub(crate) fn set_membership(&mut self, membership: Option<Membership>) {
        self.membership = membership;
    }

    pub(crate) fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Drops any boost and goes back to the priority at fork time
    pub(crate) fn reset_priority(&mut self) {
        self.priority = self.priority_orig;
    }

    /// Raises the priority by one step, never above `max`
    pub(crate) fn inc_priority(&mut self, max: Priority) {
        if self.priority < max {
            self.priority += 1;
        }
    }

    /// Accounts one tick of execution
    pub(crate) fn execute(&mut self) {
        assert!(
            self.age < self.lifespan,
            "{} executed past its lifespan of {}",
            self.pid,
            self.lifespan
        );

        self.age += 1;
    }
}
