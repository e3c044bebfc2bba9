use crate::process_manager::ProcessManager;
use crate::scheduler::{Pid, Policy};
use crate::scheduler_info::SchedulerInfo;

/// First come, first served
///
/// Non-preemptive. A process keeps the CPU until it finishes or blocks
/// on a resource, then the head of the ready queue takes over.
pub struct Fcfs;

impl Policy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn initialize(&mut self, info: &mut SchedulerInfo) {
        log::info!(
            "{} starts with {} resources",
            self.name(),
            info.resources().len()
        );
    }

    fn finalize(&mut self, info: &mut SchedulerInfo) {
        log::info!("{} done at tick {}", self.name(), info.get_timestamp());
    }

    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid> {
        if let Some(pid) = info.runnable_current() {
            return Some(pid);
        }

        info.dequeue_process()
    }
}
