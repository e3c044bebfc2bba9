use super::*;

#[test]
fn shorter_remaining_time_preempts() {
    let trace = run(
        PolicyKind::Stcf,
        vec![ProcessSpec::new(0, 4), ProcessSpec::new(1, 1)],
    );

    assert_eq!(timeline(&trace), vec![1, 2, 1, 1, 1]);
}

#[test]
fn tie_keeps_the_current_process() {
    let trace = run(
        PolicyKind::Stcf,
        vec![ProcessSpec::new(0, 3), ProcessSpec::new(1, 2)],
    );

    assert_eq!(timeline(&trace), vec![1, 1, 1, 2, 2]);
}

#[test]
fn preemption_happens_on_the_next_schedule() {
    let mut scheduler = scheduler(PolicyKind::Stcf);
    let long = scheduler.fork(4, 0).unwrap();

    assert_eq!(scheduler.schedule(), Some(long));
    scheduler.execute();

    let short = scheduler.fork(1, 0).unwrap();
    assert_eq!(scheduler.schedule(), Some(short));
    assert_eq!(scheduler.info().ready().iter().collect::<Vec<_>>(), vec![long]);
}

#[test]
fn picks_the_smallest_remaining_time_among_waiters() {
    let trace = run(
        PolicyKind::Stcf,
        vec![
            ProcessSpec::new(0, 6),
            ProcessSpec::new(1, 4),
            ProcessSpec::new(1, 2),
        ],
    );

    assert_eq!(timeline(&trace), vec![1, 3, 3, 2, 2, 2, 2, 1, 1, 1, 1, 1]);
}

#[test]
fn empty_ready_queue_keeps_the_current_process() {
    let mut scheduler = scheduler(PolicyKind::Stcf);
    assert_eq!(scheduler.schedule(), None);

    let only = scheduler.fork(2, 0).unwrap();
    assert_eq!(scheduler.schedule(), Some(only));
    scheduler.execute();
    assert_eq!(scheduler.schedule(), Some(only));
}
