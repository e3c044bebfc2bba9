use crate::common_funcs::{acquire_or_block, pick_by_priority, release_ownership, wake_highest_waiter};
use crate::common_types::{Priority, ResourceId};
use crate::process_control_block::Membership;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Priority scheduling with the priority inheritance protocol
///
/// A process that blocks on a resource lends its priority to the owner,
/// and through it to the owner of whatever the owner is blocked on. The
/// loan ends when the owner releases the resource.
pub struct PriorityInheritance;

impl PriorityInheritance {
    /// Raises the owners along the blocking chain that starts at `resource`
    fn inherit(info: &mut SchedulerInfo, resource: ResourceId, priority: Priority) {
        let mut resource = resource;

        /* A chain can't be longer than the number of processes */
        for _ in 0..info.processes.len() {
            let Some(owner) = info.res(resource).owner() else {
                return;
            };

            let pcb = info.pcb_mut(owner);
            if pcb.priority() >= priority {
                return;
            }

            pcb.set_priority(priority);
            log::debug!("{owner} inherits priority {priority} through {resource}");

            match pcb.membership() {
                Some(Membership::Wait(next)) => resource = next,
                _ => return,
            }
        }
    }

    /// The priority `pid` is entitled to from the waiters of what it still holds
    fn entitled_priority(info: &SchedulerInfo, pid: Pid) -> Priority {
        let baseline = info.pcb(pid).priority_orig();

        info.held_by(pid)
            .flat_map(move |resource| info.res(resource).waitqueue().iter())
            .map(move |waiter| info.pcb(waiter).priority())
            .fold(baseline, Priority::max)
    }
}

impl Policy for PriorityInheritance {
    fn name(&self) -> &'static str {
        "Priority + PIP Protocol"
    }

    fn acquire(&mut self, info: &mut SchedulerInfo, resource: ResourceId) -> bool {
        if let (Some(pid), true) = (info.current(), info.res(resource).is_owned()) {
            let priority = info.pcb(pid).priority();
            Self::inherit(info, resource, priority);
        }

        acquire_or_block(info, resource)
    }

    fn release(&mut self, info: &mut SchedulerInfo, resource: ResourceId) {
        let owner = release_ownership(info, resource);

        let priority = Self::entitled_priority(info, owner);
        info.pcb_mut(owner).set_priority(priority);

        wake_highest_waiter(info, resource);
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        pick_by_priority(info)
    }
}
