use crate::common_funcs::{acquire_or_block, pick_by_priority, release_ownership, wake_highest_waiter};
use crate::common_types::ResourceId;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Strict priority scheduling
///
/// A running process is only preempted by a strictly higher priority.
/// Released resources go to the highest priority waiter instead of the
/// first one.
pub struct PriorityScheduler;

impl Policy for PriorityScheduler {
    fn name(&self) -> &'static str {
        "Priority"
    }

    fn acquire(&mut self, info: &mut SchedulerInfo, resource: ResourceId) -> bool {
        acquire_or_block(info, resource)
    }

    fn release(&mut self, info: &mut SchedulerInfo, resource: ResourceId) {
        release_ownership(info, resource);
        wake_highest_waiter(info, resource);
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        pick_by_priority(info)
    }
}
