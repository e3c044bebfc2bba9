use crate::process_control_block::ProcessControlBlock;
use crate::scheduler_info::SchedulerInfo;

pub trait Collector {
    // Returns the running process, if any
    fn collect_running(&self) -> Vec<&ProcessControlBlock>;

    // Returns the ready processes in queue order
    fn collect_ready(&self) -> Vec<&ProcessControlBlock>;

    // Returns the processes blocked on resources, by resource
    fn collect_blocked(&self) -> Vec<&ProcessControlBlock>;
}

pub fn collect_all(scheduler: &dyn Collector) -> Vec<&ProcessControlBlock> {
    let mut procs: Vec<&ProcessControlBlock> = Vec::new();

    procs.extend(scheduler.collect_running());
    procs.extend(scheduler.collect_ready());
    procs.extend(scheduler.collect_blocked());

    procs
}

impl Collector for SchedulerInfo {
    fn collect_running(&self) -> Vec<&ProcessControlBlock> {
        match self.current() {
            Some(pid) => vec![self.pcb(pid)],
            None => Vec::new(),
        }
    }

    fn collect_ready(&self) -> Vec<&ProcessControlBlock> {
        self.ready().iter().map(|pid| self.pcb(pid)).collect()
    }

    fn collect_blocked(&self) -> Vec<&ProcessControlBlock> {
        let mut procs: Vec<&ProcessControlBlock> = Vec::new();

        for resource in self.resources() {
            for pid in resource.waitqueue().iter() {
                procs.push(self.pcb(pid));
            }
        }

        procs
    }
}
