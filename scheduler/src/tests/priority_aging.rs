use super::*;
use crate::ResourceId;

#[test]
fn starving_process_eventually_runs() {
    let trace = run(
        PolicyKind::PriorityAging,
        vec![
            ProcessSpec::new(0, 100).with_priority(50),
            ProcessSpec::new(0, 1).with_priority(0),
        ],
    );

    /* One level per tick until it passes the running process */
    assert_eq!(trace.record(pid(2)).unwrap().start, Some(51));
}

#[test]
fn waiting_processes_gain_one_level_per_tick() {
    let mut simulator = simulator(
        PolicyKind::PriorityAging,
        vec![
            ProcessSpec::new(0, 10).with_priority(5),
            ProcessSpec::new(0, 1).with_priority(0),
        ],
    );

    advance(&mut simulator, 3);
    assert_eq!(priority_of(&simulator, pid(2)), 2);
    assert_eq!(priority_of(&simulator, pid(1)), 5);
}

#[test]
fn aging_saturates_at_the_maximum() {
    let config = SchedulerConfig {
        policy: PolicyKind::PriorityAging,
        resources: 1,
        max_prio: 3,
    };
    let scenario = Scenario::new(
        config,
        vec![
            ProcessSpec::new(0, 10).with_priority(3),
            ProcessSpec::new(0, 1).with_priority(0),
        ],
    );

    let mut simulator = Simulator::new(&scenario).unwrap();
    advance(&mut simulator, 8);
    assert_eq!(priority_of(&simulator, pid(2)), 3);

    let trace = simulator.run().unwrap();
    assert_eq!(trace.record(pid(2)).unwrap().start, Some(10));
}

#[test]
fn preempted_process_drops_back_to_its_baseline() {
    let mut simulator = simulator(
        PolicyKind::PriorityAging,
        vec![
            ProcessSpec::new(0, 10).with_priority(2),
            ProcessSpec::new(0, 10).with_priority(0),
        ],
    );

    /* The second process passes priority 2 at tick 3 */
    advance(&mut simulator, 4);
    assert_eq!(simulator.trace().timeline[3], Some(pid(2)));
    assert_eq!(simulator.scheduler().current(), Some(pid(2)));

    advance(&mut simulator, 1);
    assert_eq!(priority_of(&simulator, pid(2)), 0);
}

#[test]
fn release_wakes_a_waiter_of_that_resource() {
    let trace = run(
        PolicyKind::PriorityAging,
        vec![
            ProcessSpec::new(0, 4).with_priority(10).with_request(0, 0, 3),
            ProcessSpec::new(1, 2).with_priority(20).with_request(0, 0, 1),
            ProcessSpec::new(1, 1).with_priority(0),
        ],
    );

    assert_eq!(trace.grants(ResourceId::new(0)), vec![pid(1), pid(2)]);
    assert_eq!(timeline(&trace), vec![1, 1, 1, 2, 2, 1, 3]);
}

#[test]
fn waiting_processes_age_when_the_runner_finishes() {
    let trace = run(
        PolicyKind::PriorityAging,
        vec![
            ProcessSpec::new(0, 1).with_priority(9),
            ProcessSpec::new(0, 5).with_priority(1),
            ProcessSpec::new(0, 5).with_priority(0),
        ],
    );

    /* Both waiters gain a level at tick 1, so the third passes the second at tick 2 */
    assert_eq!(timeline(&trace), vec![1, 2, 3, 2, 2, 3, 2, 2, 3, 3, 3]);
}

#[test]
fn blocked_slot_does_not_age() {
    let mut scheduler = scheduler(PolicyKind::PriorityAging);
    let holder = scheduler.fork(4, 5).unwrap();

    assert_eq!(scheduler.schedule(), Some(holder));
    assert_eq!(scheduler.acquire(ResourceId::new(0)), Ok(true));
    scheduler.execute();

    let waiter = scheduler.fork(2, 9).unwrap();
    let bystander = scheduler.fork(2, 0).unwrap();
    assert_eq!(scheduler.schedule(), Some(waiter));
    assert_eq!(scheduler.acquire(ResourceId::new(0)), Ok(false));

    /* Picking again after the block ages nobody */
    assert_eq!(scheduler.schedule(), Some(holder));
    assert_eq!(scheduler.process(bystander).unwrap().priority(), 1);
    assert_eq!(scheduler.process(holder).unwrap().priority(), 5);
}
