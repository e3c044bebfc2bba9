use crate::common_types::ResourceId;
use crate::process_control_block::Membership;
use crate::scheduler::{Pid, ProcessStatus};
use crate::scheduler_info::SchedulerInfo;

/// Queue transitions shared by every policy
///
/// Each method moves a process between the ready queue, a wait queue
/// and the current slot, keeping its status and membership tag in sync.
pub trait ProcessManager {
    /// Marks the process READY and appends it to the ready queue
    ///
    /// * `pid` - process to be enqueued, must not be in any queue
    fn enqueue_process(&mut self, pid: Pid);

    /// Unlinks the head of the ready queue
    fn dequeue_process(&mut self) -> Option<Pid>;

    /// Unlinks a process from anywhere in the ready queue
    ///
    /// * `pid` - process to be removed, must be in the ready queue
    fn remove_from_ready(&mut self, pid: Pid);

    /// Blocks the process until `resource` is released
    ///
    /// * `pid` - process to be blocked
    /// * `resource` - the resource that process waits for
    fn block_process(&mut self, pid: Pid, resource: ResourceId);

    /// Moves a waiter of `resource` back to the ready queue
    ///
    /// * `pid` - process to be woken, must be BLOCKED on `resource`
    /// * `resource` - the resource that was released
    fn unblock_process(&mut self, pid: Pid, resource: ResourceId);
}

impl ProcessManager for SchedulerInfo {
    fn enqueue_process(&mut self, pid: Pid) {
        let pcb = self.pcb_mut(pid);
        assert!(
            pcb.membership().is_none(),
            "{pid} is already linked into {:?}",
            pcb.membership()
        );

        pcb.set_state(ProcessStatus::Ready);
        pcb.set_membership(Some(Membership::Ready));
        self.ready.push_back(pid);
    }

    fn dequeue_process(&mut self) -> Option<Pid> {
        let pid = self.ready.pop_front()?;
        self.pcb_mut(pid).set_membership(None);

        Some(pid)
    }

    fn remove_from_ready(&mut self, pid: Pid) {
        assert!(self.ready.remove(pid), "{pid} is not in the ready queue");
        self.pcb_mut(pid).set_membership(None);
    }

    fn block_process(&mut self, pid: Pid, resource: ResourceId) {
        let pcb = self.pcb_mut(pid);
        assert!(
            pcb.membership().is_none(),
            "{pid} blocks while linked into {:?}",
            pcb.membership()
        );

        pcb.set_state(ProcessStatus::Blocked);
        pcb.set_membership(Some(Membership::Wait(resource)));
        self.res_mut(resource).waitqueue_mut().push_back(pid);
    }

    fn unblock_process(&mut self, pid: Pid, resource: ResourceId) {
        let pcb = self.pcb_mut(pid);
        assert_eq!(
            pcb.status(),
            ProcessStatus::Blocked,
            "waking {pid} which is not blocked"
        );
        assert_eq!(
            pcb.membership(),
            Some(Membership::Wait(resource)),
            "waking {pid} which does not wait on {resource}"
        );

        pcb.set_membership(None);
        assert!(self.res_mut(resource).waitqueue_mut().remove(pid));

        self.enqueue_process(pid);
    }
}
