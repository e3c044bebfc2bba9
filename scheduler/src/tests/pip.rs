use super::*;
use crate::ResourceId;

#[test]
fn owner_inherits_the_priority_of_a_blocked_waiter() {
    let mut simulator = simulator(
        PolicyKind::PriorityInheritance,
        vec![
            ProcessSpec::new(0, 5).with_priority(1).with_request(0, 0, 4),
            ProcessSpec::new(1, 2).with_priority(9).with_request(0, 0, 1),
            ProcessSpec::new(2, 2).with_priority(5),
        ],
    );

    advance(&mut simulator, 2);
    assert_eq!(priority_of(&simulator, pid(1)), 9);

    advance(&mut simulator, 2);
    assert_eq!(priority_of(&simulator, pid(1)), 1);

    /* The medium process can't get in while the loan lasts */
    let trace = simulator.run().unwrap();
    assert_eq!(timeline(&trace), vec![1, 1, 1, 1, 2, 2, 3, 3, 1]);
}

#[test]
fn inheritance_follows_the_blocking_chain() {
    let mut simulator = simulator(
        PolicyKind::PriorityInheritance,
        vec![
            ProcessSpec::new(0, 6).with_request(0, 0, 5),
            ProcessSpec::new(1, 4)
                .with_priority(5)
                .with_request(1, 0, 3)
                .with_request(0, 1, 1),
            ProcessSpec::new(3, 1).with_priority(9).with_request(1, 0, 1),
        ],
    );

    advance(&mut simulator, 4);
    assert_eq!(priority_of(&simulator, pid(1)), 9);
    assert_eq!(priority_of(&simulator, pid(2)), 9);

    /* Still holding R1 with the high priority process waiting on it */
    advance(&mut simulator, 3);
    assert_eq!(priority_of(&simulator, pid(1)), 0);
    assert_eq!(priority_of(&simulator, pid(2)), 9);

    advance(&mut simulator, 1);
    assert_eq!(priority_of(&simulator, pid(2)), 5);

    let trace = simulator.run().unwrap();
    assert_eq!(timeline(&trace), vec![1, 2, 1, 1, 1, 1, 2, 2, 3, 2, 1]);
}

#[test]
fn release_returns_the_loan() {
    let mut scheduler = scheduler(PolicyKind::PriorityInheritance);
    let low = scheduler.fork(5, 1).unwrap();

    assert_eq!(scheduler.schedule(), Some(low));
    assert_eq!(scheduler.acquire(ResourceId::new(0)), Ok(true));
    scheduler.execute();

    let high = scheduler.fork(2, 9).unwrap();
    assert_eq!(scheduler.schedule(), Some(high));
    assert_eq!(scheduler.acquire(ResourceId::new(0)), Ok(false));
    assert_eq!(scheduler.process(low).unwrap().priority(), 9);

    assert_eq!(scheduler.schedule(), Some(low));
    assert_eq!(scheduler.release(ResourceId::new(0)), Ok(()));
    assert_eq!(scheduler.process(low).unwrap().priority(), 1);
    assert!(scheduler.info().ready().contains(high));
    assert!(!scheduler.process(high).unwrap().is_blocked());
}
