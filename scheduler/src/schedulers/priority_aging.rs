use crate::common_funcs::{
    acquire_or_block, highest_priority, preempt, release_ownership, wake_highest_waiter,
};
use crate::common_types::ResourceId;
use crate::process_manager::ProcessManager;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Priority scheduling with aging
///
/// Every tick the running process drops back to its original priority
/// while each waiting process gains one level, up to the maximum. A low
/// priority process therefore overtakes any running process after a
/// bounded number of ticks. The ready processes also age when the
/// previous process finished, but not when it blocked or the CPU idled.
pub struct PriorityAging;

impl PriorityAging {
    fn age_ready_processes(info: &mut SchedulerInfo) {
        let max = info.max_prio();
        let waiting: Vec<Pid> = info.ready().iter().collect();

        for pid in waiting {
            info.pcb_mut(pid).inc_priority(max);
        }
    }
}

impl Policy for PriorityAging {
    fn name(&self) -> &'static str {
        "Priority + aging"
    }

    fn acquire(&mut self, info: &mut SchedulerInfo, resource: ResourceId) -> bool {
        acquire_or_block(info, resource)
    }

    /// Wakes the highest priority waiter of `resource` itself
    fn release(&mut self, info: &mut SchedulerInfo, resource: ResourceId) {
        release_ownership(info, resource);
        wake_highest_waiter(info, resource);
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        let Some(current) = info.runnable_current() else {
            /* Aging still happens after the runner finished, not after it blocked */
            if info.current_finished() {
                Self::age_ready_processes(info);
            }

            let next = highest_priority(info, info.ready())?;
            info.remove_from_ready(next);
            return Some(next);
        };

        info.pcb_mut(current).reset_priority();
        Self::age_ready_processes(info);

        let Some(next) = highest_priority(info, info.ready()) else {
            return Some(current);
        };

        if info.pcb(next).priority() > info.pcb(current).priority() {
            preempt(info, current, next);
            return Some(next);
        }

        Some(current)
    }
}
