// Unit tests for the superseded-run guard shared by the workflows

use crate::workflow::flow_cell::FlowCell;

#[test]
fn given_current_ticket_when_publishing_then_state_replaced() {
    let cell = FlowCell::new("idle");

    let ticket = cell.begin("uploading");
    assert_eq!(cell.snapshot(), "uploading");

    assert!(cell.publish(ticket, "generating"));
    assert_eq!(cell.snapshot(), "generating");
}

/// **VALUE**: Verifies a run that was superseded cannot overwrite the newer
/// run's state.
///
/// **BUG THIS CATCHES**: A slow first upload finishing after a second upload
/// started and replacing the second run's progress.
#[test]
fn given_superseded_ticket_when_publishing_then_discarded() {
    let cell = FlowCell::new("idle");

    let first = cell.begin("first running");
    let second = cell.begin("second running");
    assert!(second > first);

    assert!(!cell.publish(first, "first done"));
    assert_eq!(cell.snapshot(), "second running");

    assert!(cell.publish(second, "second done"));
    assert_eq!(cell.snapshot(), "second done");
}

#[tokio::test]
async fn given_subscriber_when_run_begins_then_change_observed() {
    let cell = FlowCell::new(0u32);
    let mut receiver = cell.subscribe();

    cell.begin(1);
    receiver.changed().await.unwrap();
    assert_eq!(*receiver.borrow_and_update(), 1);

    let stale = 0;
    cell.publish(stale, 99);
    assert!(!receiver.has_changed().unwrap());
}

#[test]
fn given_modify_when_change_declined_then_state_kept() {
    let cell = FlowCell::new(vec![1, 2]);

    assert!(!cell.modify(|_| false));
    assert!(cell.modify(|items| {
        items.push(3);
        true
    }));

    assert_eq!(cell.snapshot(), vec![1, 2, 3]);
}
