use crate::common_funcs::min_by_key;
use crate::process_manager::ProcessManager;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Shortest job first
///
/// Non-preemptive like FCFS, but a free CPU goes to the ready process
/// with the shortest total lifespan.
pub struct ShortestJobFirst;

impl Policy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        "Shortest-Job First"
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        if let Some(pid) = info.runnable_current() {
            return Some(pid);
        }

        let next = min_by_key(info, info.ready(), |pcb| pcb.lifespan())?;
        info.remove_from_ready(next);

        Some(next)
    }
}
