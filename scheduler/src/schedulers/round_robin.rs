use crate::process_manager::ProcessManager;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Round robin with a quanta of one tick
pub struct RoundRobin;

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "Round-Robin"
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        let current = info.runnable_current();

        let Some(next) = info.dequeue_process() else {
            /* Nobody is waiting, the current process goes on */
            return current;
        };

        /* The preempted process lines up behind the ones already waiting */
        if let Some(pid) = current {
            info.enqueue_process(pid);
        }

        Some(next)
    }
}
