use std::collections::BTreeMap;

use super::*;
use crate::{EventKind, ResourceId, SchedulerError, SimulationError};

/// Holds one resource at a time, so no policy can deadlock on it
fn mixed_workload() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new(0, 5).with_priority(3).with_request(0, 1, 2),
        ProcessSpec::new(0, 3).with_priority(7).with_request(1, 0, 2),
        ProcessSpec::new(1, 4)
            .with_priority(1)
            .with_request(0, 0, 2)
            .with_request(1, 2, 2),
        ProcessSpec::new(2, 2).with_priority(9).with_request(0, 1, 1),
        ProcessSpec::new(4, 6).with_priority(5).with_request(1, 3, 3),
        ProcessSpec::new(6, 1),
    ]
}

#[test]
fn every_policy_runs_the_workload_to_completion() {
    for policy in PolicyKind::ALL {
        let mut simulator = simulator(policy, mixed_workload());

        while !simulator.is_finished() {
            simulator.step().unwrap();
            simulator.scheduler().info().check_invariants();
        }

        let trace = simulator.finish();
        let mut ticks: BTreeMap<usize, usize> = BTreeMap::new();
        for slot in trace.timeline.iter().flatten() {
            *ticks.entry(slot.get()).or_default() += 1;
        }

        for (index, spec) in mixed_workload().iter().enumerate() {
            let record = trace.record(pid(index + 1)).unwrap();
            assert!(record.finish.is_some(), "{policy}: {} never finished", record.pid);
            assert_eq!(ticks.get(&(index + 1)), Some(&spec.lifespan), "{policy}");
        }

        let acquired = trace
            .events
            .iter()
            .filter(|event| matches!(event.kind, EventKind::Acquired(_)))
            .count();
        let released = trace
            .events
            .iter()
            .filter(|event| matches!(event.kind, EventKind::Released(_)))
            .count();
        assert_eq!(acquired, 6, "{policy}");
        assert_eq!(released, 6, "{policy}");
    }
}

#[test]
fn crossed_requests_deadlock() {
    let result = simulate(&scenario(
        PolicyKind::RoundRobin,
        vec![
            ProcessSpec::new(0, 4).with_request(0, 0, 3).with_request(1, 1, 2),
            ProcessSpec::new(0, 4).with_request(1, 0, 3).with_request(0, 1, 2),
        ],
    ));

    match result {
        Err(SimulationError::Deadlock { tick, blocked }) => {
            assert_eq!(tick, 2);
            assert_eq!(blocked, vec![pid(1), pid(2)]);
        }
        other => panic!("expected a deadlock, got {other:?}"),
    }
}

#[test]
fn tick_limit_stops_the_run() {
    let result = simulator(PolicyKind::Fcfs, vec![ProcessSpec::new(0, 10)])
        .with_max_ticks(4)
        .run();

    assert!(matches!(result, Err(SimulationError::TickLimit(4))));
}

#[test]
fn turnaround_and_waiting_times() {
    let trace = run(
        PolicyKind::Fcfs,
        vec![ProcessSpec::new(0, 3), ProcessSpec::new(1, 2)],
    );

    let first = trace.record(pid(1)).unwrap();
    assert_eq!(first.turnaround(), Some(3));
    assert_eq!(first.waiting(), Some(0));

    let second = trace.record(pid(2)).unwrap();
    assert_eq!(second.start, Some(3));
    assert_eq!(second.turnaround(), Some(4));
    assert_eq!(second.waiting(), Some(2));
}

#[test]
fn render_marks_idle_ticks() {
    let trace = run(
        PolicyKind::Fcfs,
        vec![ProcessSpec::new(0, 1), ProcessSpec::new(2, 1)],
    );

    assert_eq!(trace.render(), "1 - 2");
}

#[test]
fn requests_without_a_running_process_are_refused() {
    let mut scheduler = scheduler(PolicyKind::Fcfs);
    let only = scheduler.fork(1, 0).unwrap();

    scheduler.schedule();
    scheduler.execute();
    assert_eq!(scheduler.reap_current().map(|pcb| pcb.pid()), Some(only));

    assert_eq!(
        scheduler.release(ResourceId::new(0)),
        Err(SchedulerError::NoRunningProcess)
    );
    assert_eq!(
        scheduler.acquire(ResourceId::new(7)),
        Err(SchedulerError::UnknownResource(ResourceId::new(7)))
    );
}

#[test]
fn huge_lifespans_do_not_overflow_the_tick_limit() {
    let result = Simulator::new(&scenario(
        PolicyKind::Fcfs,
        vec![
            ProcessSpec::new(usize::MAX, usize::MAX),
            ProcessSpec::new(0, usize::MAX),
        ],
    ));

    assert!(result.is_ok());
}
