use std::fmt;
use std::ops::Add;

use crate::collector::Collector;
use crate::common_funcs;
use crate::common_types::{Priority, ResourceId};
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult};
use crate::process_control_block::ProcessControlBlock;
use crate::scheduler_info::SchedulerInfo;

/// The process id
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(usize);

impl Pid {
    pub fn new(pid: usize) -> Pid {
        Pid(pid)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Add<usize> for Pid {
    type Output = Pid;

    fn add(self, rhs: usize) -> Self::Output {
        Pid::new(self.0 + rhs)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// The state of a process
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Waiting in the ready queue
    Ready,
    /// Owns the CPU in the current tick
    Running,
    /// Waiting in the wait queue of a resource
    Blocked,
    /// Executed its whole lifespan
    Finished,
}

/// A scheduling algorithm together with its resource arbitration
///
/// The default `acquire` and `release` serve a resource in request
/// order, without looking at priorities. Policies that arbitrate by
/// priority override them.
pub trait Policy {
    /// Human readable name of the policy
    fn name(&self) -> &'static str;

    /// Called once, before the first tick
    fn initialize(&mut self, _info: &mut SchedulerInfo) {}

    /// Called once, after the last process finished
    fn finalize(&mut self, _info: &mut SchedulerInfo) {}

    /// The current process requests `resource`
    ///
    /// Returns false if the process got blocked instead.
    fn acquire(&mut self, info: &mut SchedulerInfo, resource: ResourceId) -> bool {
        common_funcs::acquire_or_block(info, resource)
    }

    /// The current process gives `resource` back
    ///
    /// Wakes up the waiter that came first, if there is one.
    fn release(&mut self, info: &mut SchedulerInfo, resource: ResourceId) {
        common_funcs::release_ownership(info, resource);
        common_funcs::wake_first_waiter(info, resource);
    }

    /// Picks the process for the next tick
    ///
    /// The returned process must not be linked into any queue. A current
    /// process that is replaced while still runnable has to be put back
    /// into the ready queue by the policy.
    fn schedule(&mut self, info: &mut SchedulerInfo) -> Option<Pid>;
}

/// A policy bound to the state it decides on
pub struct Scheduler {
    info: SchedulerInfo,
    policy: Box<dyn Policy>,
}

impl Scheduler {
    /// Returns a scheduler running the policy named in `config`
    pub fn new(config: &SchedulerConfig) -> Scheduler {
        Scheduler::with_policy(config.policy.build(), config.resources, config.max_prio)
    }

    /// Returns a scheduler running `policy`
    ///
    /// * `policy` - the algorithm that takes the decisions
    /// * `resources` - number of exclusive resources, named `0..resources`
    /// * `max_prio` - the ceiling priority, also the cap for aging
    pub fn with_policy(policy: Box<dyn Policy>, resources: usize, max_prio: Priority) -> Scheduler {
        let mut scheduler = Scheduler {
            info: SchedulerInfo::new(resources, max_prio),
            policy,
        };

        scheduler.policy.initialize(&mut scheduler.info);
        scheduler
    }

    pub fn name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn info(&self) -> &SchedulerInfo {
        &self.info
    }

    pub fn process(&self, pid: Pid) -> Option<&ProcessControlBlock> {
        self.info.process(pid)
    }

    pub fn current(&self) -> Option<Pid> {
        self.info.current()
    }

    /// Creates a new READY process at the tail of the ready queue
    ///
    /// * `lifespan` - number of ticks the process has to execute
    /// * `priority` - baseline priority of the process
    pub fn fork(&mut self, lifespan: usize, priority: Priority) -> SchedulerResult<Pid> {
        if lifespan == 0 {
            return Err(SchedulerError::ZeroLifespan);
        }

        let max = self.info.max_prio();
        if priority > max {
            return Err(SchedulerError::PriorityOutOfRange { priority, max });
        }

        let pid = self.info.spawn_process(lifespan, priority);
        log::info!(
            "forked {pid} at {} (lifespan {lifespan}, priority {priority})",
            self.info.get_timestamp()
        );

        Ok(pid)
    }

    /// Asks the policy for the process to run next and makes it current
    ///
    /// A current process that used up its lifespan is dropped first.
    /// Returns `None` when nothing is runnable.
    pub fn schedule(&mut self) -> Option<Pid> {
        self.reap_current();

        let previous = self.info.runnable_current();
        let next = self.policy.schedule(&mut self.info);

        if let Some(pid) = next {
            let pcb = self.info.pcb_mut(pid);
            assert!(
                pcb.membership().is_none(),
                "{} picked {pid} while it is still queued",
                self.policy.name()
            );
            pcb.set_running();
        }

        if let Some(pid) = previous {
            if Some(pid) != next {
                assert!(
                    self.info.pcb(pid).membership().is_some(),
                    "{} dropped the preempted {pid}",
                    self.policy.name()
                );
            }
        }

        self.info.set_current(next);
        self.info.current_finished = false;
        log::trace!("{}: tick {} runs {next:?}", self.name(), self.info.get_timestamp());

        next
    }

    /// The current process requests `resource`
    ///
    /// Returns false when the process got blocked on it.
    pub fn acquire(&mut self, resource: ResourceId) -> SchedulerResult<bool> {
        self.check_request(resource)?;

        let granted = self.policy.acquire(&mut self.info, resource);
        Ok(granted)
    }

    /// The current process releases `resource`
    ///
    /// # Panics
    ///
    /// If the current process does not own `resource`.
    pub fn release(&mut self, resource: ResourceId) -> SchedulerResult<()> {
        self.check_request(resource)?;

        self.policy.release(&mut self.info, resource);
        Ok(())
    }

    /// Runs the current process for one tick
    ///
    /// A current process that blocked on a resource does not age.
    pub fn execute(&mut self) -> Option<Pid> {
        let pid = self.info.current()?;
        if self.info.pcb(pid).is_blocked() {
            return None;
        }

        self.info.pcb_mut(pid).execute();

        Some(pid)
    }

    /// Removes the current process if it executed its whole lifespan
    ///
    /// Returns the record of the finished process.
    pub fn reap_current(&mut self) -> Option<ProcessControlBlock> {
        let pid = self.info.current()?;
        if !self.info.pcb(pid).is_complete() {
            return None;
        }

        let pcb = self.info.remove_process(pid);
        log::info!("{pid} finished at {}", self.info.get_timestamp());

        Some(pcb)
    }

    /// Advances the clock
    pub fn make_timeskip(&mut self, time: usize) {
        self.info.make_timeskip(time);
    }

    /// Tears the policy down
    pub fn finish(mut self) -> SchedulerInfo {
        self.policy.finalize(&mut self.info);
        self.info
    }

    /// Logs the current slot, the ready queue and every resource
    pub fn dump_status(&self) {
        let ready: Vec<String> = self
            .info
            .collect_ready()
            .iter()
            .map(|pcb| format!("{}({})", pcb.pid(), pcb.priority()))
            .collect();

        log::debug!("***** CURRENT *********");
        if let Some(pcb) = self.info.collect_running().first() {
            log::debug!(
                "{} at {}/{} priority {} (orig {})",
                pcb.pid(),
                pcb.age(),
                pcb.lifespan(),
                pcb.priority(),
                pcb.priority_orig()
            );
        }
        log::debug!("***** READY QUEUE *****");
        log::debug!("[{}]", ready.join(", "));
        log::debug!("***** RESOURCES *******");
        for resource in self.info.resources() {
            if resource.owner().is_none() && resource.waitqueue().is_empty() {
                continue;
            }

            let waiters: Vec<String> = resource.waitqueue().iter().map(|pid| pid.to_string()).collect();
            log::debug!(
                "{}: owner {:?}, waiting [{}]",
                resource.id(),
                resource.owner(),
                waiters.join(", ")
            );
        }
    }

    fn check_request(&self, resource: ResourceId) -> SchedulerResult<()> {
        if self.info.resource(resource).is_none() {
            return Err(SchedulerError::UnknownResource(resource));
        }

        match self.info.current() {
            Some(pid) if !self.info.pcb(pid).is_blocked() => Ok(()),
            _ => Err(SchedulerError::NoRunningProcess),
        }
    }
}
