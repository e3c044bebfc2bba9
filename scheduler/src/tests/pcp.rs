use super::*;
use crate::{EventKind, ResourceId};

#[test]
fn holder_runs_at_the_ceiling() {
    let mut simulator = simulator(
        PolicyKind::PriorityCeiling,
        vec![
            ProcessSpec::new(0, 5).with_priority(1).with_request(0, 0, 4),
            ProcessSpec::new(1, 1).with_priority(90),
        ],
    );

    advance(&mut simulator, 1);
    assert_eq!(priority_of(&simulator, pid(1)), 100);

    advance(&mut simulator, 3);
    assert_eq!(priority_of(&simulator, pid(1)), 1);

    let trace = simulator.run().unwrap();
    assert_eq!(timeline(&trace), vec![1, 1, 1, 1, 2, 1]);
}

#[test]
fn ceiling_stays_while_another_resource_is_held() {
    let mut simulator = simulator(
        PolicyKind::PriorityCeiling,
        vec![ProcessSpec::new(0, 5)
            .with_priority(1)
            .with_request(0, 0, 4)
            .with_request(1, 1, 1)],
    );

    /* R1 is given back at the end of the second tick */
    advance(&mut simulator, 2);
    assert_eq!(priority_of(&simulator, pid(1)), 100);

    advance(&mut simulator, 2);
    assert_eq!(priority_of(&simulator, pid(1)), 1);
}

#[test]
fn nobody_blocks_under_the_ceiling() {
    let trace = run(
        PolicyKind::PriorityCeiling,
        vec![
            ProcessSpec::new(0, 4).with_priority(1).with_request(0, 1, 2),
            ProcessSpec::new(1, 3).with_priority(50).with_request(0, 0, 2),
            ProcessSpec::new(2, 2).with_priority(99).with_request(1, 0, 1),
        ],
    );

    assert!(trace
        .events
        .iter()
        .all(|event| !matches!(event.kind, EventKind::Blocked(_))));
    assert_eq!(trace.grants(ResourceId::new(0)), vec![pid(2), pid(1)]);
}
