use std::collections::VecDeque;

use crate::scheduler::Pid;

/// An ordered sequence of processes, referenced by PID
///
/// Used for the ready queue and for the wait queue of every resource.
/// The records themselves live in the process table; membership tags
/// on the records are kept in sync by `SchedulerInfo`.
#[derive(Clone, Debug, Default)]
pub struct ProcessQueue {
    items: VecDeque<Pid>,
}

impl ProcessQueue {
    pub fn new() -> ProcessQueue {
        ProcessQueue {
            items: VecDeque::new(),
        }
    }

    pub fn push_back(&mut self, pid: Pid) {
        self.items.push_back(pid);
    }

    pub fn pop_front(&mut self) -> Option<Pid> {
        self.items.pop_front()
    }

    pub fn front(&self) -> Option<Pid> {
        self.items.front().copied()
    }

    /// Unlinks `pid` from the queue, keeping the order of the others
    ///
    /// Returns false if the process was not queued here
    pub fn remove(&mut self, pid: Pid) -> bool {
        match self.items.iter().position(|item| *item == pid) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.items.contains(&pid)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Iterates from head to tail
    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.items.iter().copied()
    }
}
