use crate::common_funcs::{acquire_or_block, pick_by_priority, release_ownership, wake_highest_waiter};
use crate::common_types::ResourceId;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Priority scheduling with the priority ceiling protocol
///
/// Whoever holds a resource runs at the ceiling priority, so no other
/// process can preempt it until it gives everything back.
pub struct PriorityCeiling;

impl Policy for PriorityCeiling {
    fn name(&self) -> &'static str {
        "Priority + PCP Protocol"
    }

    fn acquire(&mut self, info: &mut SchedulerInfo, resource: ResourceId) -> bool {
        if !acquire_or_block(info, resource) {
            return false;
        }

        if let Some(pid) = info.current() {
            let ceiling = info.max_prio();
            info.pcb_mut(pid).set_priority(ceiling);
            log::debug!("{pid} holds {resource}, raised to the ceiling {ceiling}");
        }

        true
    }

    fn release(&mut self, info: &mut SchedulerInfo, resource: ResourceId) {
        let owner = release_ownership(info, resource);

        /* Still holding something else, stay at the ceiling */
        if info.held_by(owner).next().is_none() {
            info.pcb_mut(owner).reset_priority();
        }

        wake_highest_waiter(info, resource);
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        pick_by_priority(info)
    }
}
