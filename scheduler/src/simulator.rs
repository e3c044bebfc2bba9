use std::collections::{BTreeMap, VecDeque};

use crate::common_types::{Priority, ResourceId};
use crate::error::{ConfigError, SimulationError};
use crate::scheduler::{Pid, ProcessStatus, Scheduler};
use crate::workload::{ProcessSpec, ResourceRequest, Scenario};

/// Something that happened to a process during the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Forked,
    Acquired(ResourceId),
    Blocked(ResourceId),
    Released(ResourceId),
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    pub tick: usize,
    pub pid: Pid,
    pub kind: EventKind,
}

/// Lifetime summary of one process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival: usize,
    pub lifespan: usize,
    pub priority: Priority,
    /// First tick the process ran
    pub start: Option<usize>,
    /// Tick at whose end the process finished
    pub finish: Option<usize>,
}

impl ProcessRecord {
    /// Ticks from fork until the end of the last executed tick
    pub fn turnaround(&self) -> Option<usize> {
        self.finish.map(|finish| finish + 1 - self.arrival)
    }

    /// Ticks spent in the system without running
    pub fn waiting(&self) -> Option<usize> {
        self.turnaround().map(|turnaround| turnaround - self.lifespan)
    }
}

/// Everything a finished simulation has to report
#[derive(Clone, Debug, Default)]
pub struct Trace {
    /// The process that ran in every tick, `None` for an idle tick
    pub timeline: Vec<Option<Pid>>,
    pub events: Vec<TraceEvent>,
    pub records: BTreeMap<Pid, ProcessRecord>,
}

impl Trace {
    pub fn record(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.records.get(&pid)
    }

    /// The processes that got `resource`, in the order they got it
    pub fn grants(&self, resource: ResourceId) -> Vec<Pid> {
        self.events
            .iter()
            .filter(|event| event.kind == EventKind::Acquired(resource))
            .map(|event| event.pid)
            .collect()
    }

    /// One column per tick, `-` for idle ticks
    pub fn render(&self) -> String {
        self.timeline
            .iter()
            .map(|slot| match slot {
                Some(pid) => pid.get().to_string(),
                None => "-".to_string(),
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Per process bookkeeping of the driver
struct Task {
    requests: Vec<ResourceRequest>,
    /// `held[i]` is set while `requests[i]` is granted
    held: Vec<bool>,
}

/// The tick driver
///
/// Forks the processes of a workload when they arrive, asks the
/// scheduler who runs in every tick, performs the resource requests of
/// the running process and ages it.
pub struct Simulator {
    scheduler: Scheduler,
    /// Processes not forked yet, ordered by arrival
    pending: VecDeque<ProcessSpec>,
    tasks: BTreeMap<Pid, Task>,
    trace: Trace,
    tick: usize,
    max_ticks: usize,
}

impl Simulator {
    /// Prepares a validated scenario for running
    pub fn new(scenario: &Scenario) -> Result<Simulator, ConfigError> {
        scenario.validate()?;

        let mut processes = scenario.processes.clone();
        processes.sort_by_key(|spec| spec.arrival);

        /* Every tick either runs a process or waits for an arrival */
        let last_arrival = processes.last().map_or(0, |spec| spec.arrival);
        let total_work = processes
            .iter()
            .fold(0usize, |total, spec| total.saturating_add(spec.lifespan));

        Ok(Simulator {
            scheduler: Scheduler::new(&scenario.scheduler),
            pending: processes.into(),
            tasks: BTreeMap::new(),
            trace: Trace::default(),
            tick: 0,
            max_ticks: last_arrival.saturating_add(total_work).saturating_add(1),
        })
    }

    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    /// True once every process was forked and has finished
    pub fn is_finished(&self) -> bool {
        self.pending.is_empty() && !self.scheduler.info().has_processes()
    }

    /// Runs ticks until every process finished
    pub fn run(mut self) -> Result<Trace, SimulationError> {
        while !self.is_finished() {
            self.step()?;
        }

        Ok(self.finish())
    }

    /// Simulates a single tick
    ///
    /// Returns the process that ran, `None` for an idle tick.
    pub fn step(&mut self) -> Result<Option<Pid>, SimulationError> {
        if self.tick >= self.max_ticks {
            return Err(SimulationError::TickLimit(self.max_ticks));
        }

        self.admit_arrivals()?;

        let running = self.dispatch()?;
        match running {
            Some(pid) => {
                self.scheduler.execute();
                self.release_due(pid)?;
                self.reap(pid);
            }
            None => {
                if self.pending.is_empty() && self.scheduler.info().has_processes() {
                    return Err(self.deadlock());
                }
            }
        }

        self.trace.timeline.push(running);
        if cfg!(debug_assertions) {
            self.scheduler.info().check_invariants();
        }

        self.scheduler.make_timeskip(1);
        self.tick += 1;

        Ok(running)
    }

    /// Tears the policy down and hands out the trace
    pub fn finish(self) -> Trace {
        self.scheduler.finish();
        self.trace
    }

    fn push_event(&mut self, pid: Pid, kind: EventKind) {
        self.trace.events.push(TraceEvent {
            tick: self.tick,
            pid,
            kind,
        });
    }

    /// Forks every process that arrives in this tick
    fn admit_arrivals(&mut self) -> Result<(), SimulationError> {
        while self
            .pending
            .front()
            .is_some_and(|spec| spec.arrival <= self.tick)
        {
            let Some(spec) = self.pending.pop_front() else {
                break;
            };

            let pid = self.scheduler.fork(spec.lifespan, spec.priority)?;
            let arrival = self
                .scheduler
                .process(pid)
                .map_or(self.tick, |pcb| pcb.arrival_time().get());

            self.trace.records.insert(
                pid,
                ProcessRecord {
                    pid,
                    arrival,
                    lifespan: spec.lifespan,
                    priority: spec.priority,
                    start: None,
                    finish: None,
                },
            );
            self.tasks.insert(
                pid,
                Task {
                    held: vec![false; spec.acquire.len()],
                    requests: spec.acquire,
                },
            );
            self.push_event(pid, EventKind::Forked);
        }

        Ok(())
    }

    /// Picks the process for this tick
    ///
    /// A process that blocks on one of its requests gives the tick to the
    /// next pick.
    fn dispatch(&mut self) -> Result<Option<Pid>, SimulationError> {
        loop {
            let Some(pid) = self.scheduler.schedule() else {
                return Ok(None);
            };

            if self.acquire_due(pid)? {
                if let Some(record) = self.trace.records.get_mut(&pid) {
                    record.start.get_or_insert(self.tick);
                }

                return Ok(Some(pid));
            }

            log::trace!("{pid} blocked at tick {}, picking again", self.tick);
        }
    }

    /// Performs the requests `pid` makes at its current age
    ///
    /// Returns false if the process got blocked.
    fn acquire_due(&mut self, pid: Pid) -> Result<bool, SimulationError> {
        let age = match self.scheduler.process(pid) {
            Some(pcb) => pcb.age(),
            None => return Ok(true),
        };

        let Some(task) = self.tasks.get_mut(&pid) else {
            return Ok(true);
        };

        for (index, request) in task.requests.iter().enumerate() {
            if request.at != age || task.held[index] {
                continue;
            }

            let granted = self.scheduler.acquire(request.resource)?;
            let kind = if granted {
                task.held[index] = true;
                EventKind::Acquired(request.resource)
            } else {
                EventKind::Blocked(request.resource)
            };

            self.trace.events.push(TraceEvent {
                tick: self.tick,
                pid,
                kind,
            });

            if !granted {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Releases the holds of `pid` that end at its new age
    fn release_due(&mut self, pid: Pid) -> Result<(), SimulationError> {
        let age = match self.scheduler.process(pid) {
            Some(pcb) => pcb.age(),
            None => return Ok(()),
        };

        let Some(task) = self.tasks.get_mut(&pid) else {
            return Ok(());
        };

        for (index, request) in task.requests.iter().enumerate() {
            if !task.held[index] || request.at + request.duration != age {
                continue;
            }

            self.scheduler.release(request.resource)?;
            task.held[index] = false;

            self.trace.events.push(TraceEvent {
                tick: self.tick,
                pid,
                kind: EventKind::Released(request.resource),
            });
        }

        Ok(())
    }

    fn reap(&mut self, pid: Pid) {
        if self.scheduler.reap_current().is_none() {
            return;
        }

        self.tasks.remove(&pid);
        if let Some(record) = self.trace.records.get_mut(&pid) {
            record.finish = Some(self.tick);
        }
        self.push_event(pid, EventKind::Finished);
    }

    fn deadlock(&self) -> SimulationError {
        let blocked = self
            .scheduler
            .info()
            .processes()
            .filter(|pcb| pcb.status() == ProcessStatus::Blocked)
            .map(|pcb| pcb.pid())
            .collect();

        self.scheduler.dump_status();
        SimulationError::Deadlock {
            tick: self.tick,
            blocked,
        }
    }
}
