use crate::common_funcs::{min_by_key, preempt};
use crate::process_manager::ProcessManager;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// Shortest time-to-complete first
///
/// Preemptive. Every tick the process with the fewest remaining ticks
/// runs. On a tie the current process stays, to avoid a useless switch.
pub struct ShortestTimeToComplete;

impl Policy for ShortestTimeToComplete {
    fn name(&self) -> &'static str {
        "Shortest Time-to-Complete First"
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        let candidate = min_by_key(info, info.ready(), |pcb| pcb.remaining());

        match (info.runnable_current(), candidate) {
            (current, None) => current,
            (None, Some(next)) => {
                info.remove_from_ready(next);
                Some(next)
            }
            (Some(current), Some(next)) => {
                if info.pcb(next).remaining() < info.pcb(current).remaining() {
                    preempt(info, current, next);
                    Some(next)
                } else {
                    Some(current)
                }
            }
        }
    }
}
