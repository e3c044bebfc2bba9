use std::collections::BTreeMap;

use crate::common_types::{Priority, ResourceId, Timestamp};
use crate::process_control_block::{Membership, ProcessControlBlock};
use crate::process_manager::ProcessManager;
use crate::queue::ProcessQueue;
use crate::resource::Resource;
use crate::scheduler::{Pid, ProcessStatus};

/// Everything a policy reads and mutates while taking a decision
///
/// Owns the process table, the ready queue, the resources with their
/// wait queues and the current slot. Queues only hold PIDs, the records
/// stay in the table.
#[derive(Debug)]
pub struct SchedulerInfo {
    /// Process table, keyed by PID
    pub(crate) processes: BTreeMap<Pid, ProcessControlBlock>,
    /// READY processes that are not running
    pub(crate) ready: ProcessQueue,
    /// Resource table, indexed by `ResourceId`
    pub(crate) resources: Vec<Resource>,
    /// The process that runs in this tick
    pub(crate) current: Option<Pid>,
    /// Set when the current process finished after the last decision
    pub(crate) current_finished: bool,
    /// The pid of the next process that will be forked
    next_pid: Pid,
    /// Current time
    timestamp: Timestamp,
    /// Ceiling priority, also the cap for aging
    max_prio: Priority,
}

impl SchedulerInfo {
    pub fn new(resources: usize, max_prio: Priority) -> SchedulerInfo {
        SchedulerInfo {
            processes: BTreeMap::new(),
            ready: ProcessQueue::new(),
            resources: (0..resources)
                .map(|id| Resource::new(ResourceId::new(id)))
                .collect(),
            current: None,
            current_finished: false,
            next_pid: Pid::new(1),
            timestamp: Timestamp::new(0),
            max_prio,
        }
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessControlBlock> {
        self.processes.get(&pid)
    }

    pub fn processes(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.processes.values()
    }

    pub fn has_processes(&self) -> bool {
        !self.processes.is_empty()
    }

    /// Looks up a record that must exist
    pub(crate) fn pcb(&self, pid: Pid) -> &ProcessControlBlock {
        match self.processes.get(&pid) {
            Some(pcb) => pcb,
            None => panic!("{pid} is not in the process table"),
        }
    }

    pub(crate) fn pcb_mut(&mut self, pid: Pid) -> &mut ProcessControlBlock {
        match self.processes.get_mut(&pid) {
            Some(pcb) => pcb,
            None => panic!("{pid} is not in the process table"),
        }
    }

    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    pub(crate) fn set_current(&mut self, pid: Option<Pid>) {
        self.current = pid;
    }

    /// The current process, if it can keep running
    ///
    /// A current process that blocked on a resource or used up its
    /// lifespan has to be replaced.
    pub fn runnable_current(&self) -> Option<Pid> {
        let pid = self.current?;
        let pcb = self.pcb(pid);

        if pcb.is_blocked() || pcb.is_complete() {
            return None;
        }

        Some(pid)
    }

    pub fn ready(&self) -> &ProcessQueue {
        &self.ready
    }

    /// True if the slot was emptied by a process that finished, rather
    /// than left empty or given up by a blocked process
    pub fn current_finished(&self) -> bool {
        self.current_finished
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.get())
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Looks up a resource that must exist
    pub(crate) fn res(&self, id: ResourceId) -> &Resource {
        match self.resources.get(id.get()) {
            Some(resource) => resource,
            None => panic!("{id} is not in the resource table"),
        }
    }

    pub(crate) fn res_mut(&mut self, id: ResourceId) -> &mut Resource {
        match self.resources.get_mut(id.get()) {
            Some(resource) => resource,
            None => panic!("{id} is not in the resource table"),
        }
    }

    /// Resources currently owned by `pid`
    pub fn held_by(&self, pid: Pid) -> impl Iterator<Item = ResourceId> + '_ {
        self.resources
            .iter()
            .filter(move |resource| resource.owner() == Some(pid))
            .map(|resource| resource.id())
    }

    pub fn max_prio(&self) -> Priority {
        self.max_prio
    }

    pub fn get_timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub(crate) fn make_timeskip(&mut self, time: usize) {
        self.timestamp = self.timestamp + time;
    }

    fn inc_pid(&mut self) {
        self.next_pid = self.next_pid + 1;
    }

    /// Creates a READY process and appends it to the ready queue
    pub(crate) fn spawn_process(&mut self, lifespan: usize, priority: Priority) -> Pid {
        let pid = self.next_pid;
        self.inc_pid();

        let pcb = ProcessControlBlock::new(pid, lifespan, priority, self.timestamp);
        self.processes.insert(pid, pcb);
        self.enqueue_process(pid);

        pid
    }

    /// Drops a finished process from every structure
    pub(crate) fn remove_process(&mut self, pid: Pid) -> ProcessControlBlock {
        let pcb = self.pcb(pid);
        assert!(
            pcb.membership().is_none(),
            "{pid} exits while linked into {:?}",
            pcb.membership()
        );

        if let Some(resource) = self.held_by(pid).next() {
            panic!("{pid} exits while holding {resource}");
        }

        if self.current == Some(pid) {
            self.current = None;
            self.current_finished = true;
        }

        let mut pcb = match self.processes.remove(&pid) {
            Some(pcb) => pcb,
            None => panic!("{pid} is not in the process table"),
        };
        pcb.set_state(ProcessStatus::Finished);

        pcb
    }

    /// Panics if the process, resource and queue structures disagree
    pub fn check_invariants(&self) {
        if let Some(pid) = self.current {
            let pcb = self.pcb(pid);
            assert_eq!(pcb.status(), ProcessStatus::Running, "current {pid} is not running");
            assert!(pcb.membership().is_none(), "current {pid} is queued");
        }

        for pcb in self.processes.values() {
            let pid = pcb.pid();
            assert!(pcb.age() <= pcb.lifespan(), "{pid} is older than its lifespan");

            match (pcb.status(), pcb.membership()) {
                (ProcessStatus::Ready, Some(Membership::Ready)) => {
                    assert!(self.ready.contains(pid), "{pid} is tagged ready but not queued");
                }
                (ProcessStatus::Blocked, Some(Membership::Wait(id))) => {
                    assert!(
                        self.res(id).waitqueue().contains(pid),
                        "{pid} is tagged waiting on {id} but not queued"
                    );
                }
                (ProcessStatus::Running, None) => {
                    assert_eq!(self.current, Some(pid), "{pid} runs outside the current slot");
                }
                (status, membership) => {
                    panic!("{pid} is {status:?} with membership {membership:?}");
                }
            }
        }

        let ready_tagged = self
            .processes
            .values()
            .filter(|pcb| pcb.membership() == Some(Membership::Ready))
            .count();
        assert_eq!(ready_tagged, self.ready.len(), "ready queue holds strangers");

        for resource in self.resources.iter() {
            let waiting_tagged = self
                .processes
                .values()
                .filter(|pcb| pcb.membership() == Some(Membership::Wait(resource.id())))
                .count();
            assert_eq!(
                waiting_tagged,
                resource.waitqueue().len(),
                "wait queue of {} holds strangers",
                resource.id()
            );

            if let Some(owner) = resource.owner() {
                assert!(
                    self.processes.contains_key(&owner),
                    "{} is owned by dead {owner}",
                    resource.id()
                );
            }
        }
    }
}
