use super::*;
use crate::ResourceId;

#[test]
fn only_strictly_higher_priority_preempts() {
    let trace = run(
        PolicyKind::Priority,
        vec![
            ProcessSpec::new(0, 3).with_priority(5),
            ProcessSpec::new(1, 1).with_priority(5),
            ProcessSpec::new(2, 1).with_priority(9),
        ],
    );

    assert_eq!(timeline(&trace), vec![1, 1, 3, 2, 1]);
}

#[test]
fn released_resource_goes_to_the_highest_waiter() {
    let trace = run(
        PolicyKind::Priority,
        vec![
            ProcessSpec::new(0, 4).with_priority(1).with_request(0, 0, 3),
            ProcessSpec::new(1, 2).with_priority(5).with_request(0, 0, 1),
            ProcessSpec::new(2, 2).with_priority(9).with_request(0, 0, 1),
        ],
    );

    assert_eq!(trace.grants(ResourceId::new(0)), vec![pid(1), pid(3), pid(2)]);
    assert_eq!(timeline(&trace), vec![1, 1, 1, 3, 3, 2, 2, 1]);
}

#[test]
fn blocked_current_is_replaced_in_the_same_tick() {
    let mut scheduler = scheduler(PolicyKind::Priority);
    let low = scheduler.fork(4, 1).unwrap();

    assert_eq!(scheduler.schedule(), Some(low));
    assert_eq!(scheduler.acquire(ResourceId::new(0)), Ok(true));
    scheduler.execute();

    let high = scheduler.fork(2, 8).unwrap();
    assert_eq!(scheduler.schedule(), Some(high));
    assert_eq!(scheduler.acquire(ResourceId::new(0)), Ok(false));

    assert_eq!(scheduler.schedule(), Some(low));
    assert!(scheduler
        .info()
        .resource(ResourceId::new(0))
        .unwrap()
        .waitqueue()
        .contains(high));
}
