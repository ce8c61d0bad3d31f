use crate::helpers::{event_payload, ready_provider, CountingObserver, CURRENT_ACTOR};

use capability_core::client::{CapabilityClient, FixedActor};
use capability_core::observer::InventoryObserver;
use capability_core::{CHANNEL_ITEM_ADDED, CHANNEL_ITEM_REMOVED};

use std::sync::Arc;

use serde_json::json;

/// **VALUE**: Verifies item events reach observers with named fields intact.
///
/// **WHY THIS MATTERS**: The payload crosses the gateway as JSON; a field
/// rename on either side would silently zero out quantities or owners.
#[tokio::test]
async fn given_registered_client_when_items_emitted_then_observer_sees_them() {
    // GIVEN: A registered client with an observer
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    let observer = Arc::new(CountingObserver::default());
    client.add_observer(Arc::clone(&observer) as Arc<dyn InventoryObserver>).await;

    // WHEN: The provider pushes one added and one removed item
    fixture
        .gateway
        .emit(CHANNEL_ITEM_ADDED, event_payload(1234, 555, 3))
        .await;
    fixture
        .gateway
        .emit(CHANNEL_ITEM_REMOVED, event_payload(1234, 555, 1))
        .await;
    client.pump().await;

    // THEN: Both deliveries arrive, fields intact
    let added = observer.added_events();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].item_id, 1234);
    assert_eq!(added[0].owner_id, 555);
    assert_eq!(added[0].quantity, 3);

    let removed = observer.removed_events();
    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].quantity, 1);
}

/// **VALUE**: Verifies events are held until the consumer pumps.
///
/// **WHY THIS MATTERS**: This is the marshaling contract made observable:
/// the provider's emission thread must never run observer code. Delivery
/// happens only inside pump(), on the consumer's context.
#[tokio::test]
async fn given_emitted_events_when_not_yet_pumped_then_observer_sees_nothing() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    let observer = Arc::new(CountingObserver::default());
    client.add_observer(Arc::clone(&observer) as Arc<dyn InventoryObserver>).await;

    fixture
        .gateway
        .emit(CHANNEL_ITEM_ADDED, event_payload(1, 2, 3))
        .await;

    // Not pumped yet: the emission thread must not have run the observer
    assert!(observer.added_events().is_empty());

    let processed = client.pump().await;
    assert_eq!(processed, 1);
    assert_eq!(observer.added_events().len(), 1);
}

/// **VALUE**: Verifies delivery order across multiple events is FIFO.
#[tokio::test]
async fn given_multiple_events_when_pumped_then_fifo_order() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    let observer = Arc::new(CountingObserver::default());
    client.add_observer(Arc::clone(&observer) as Arc<dyn InventoryObserver>).await;

    for quantity in 1..=4u32 {
        fixture
            .gateway
            .emit(CHANNEL_ITEM_ADDED, event_payload(10, 20, quantity))
            .await;
    }
    client.pump().await;

    let quantities: Vec<u32> = observer.added_events().iter().map(|e| e.quantity).collect();
    assert_eq!(quantities, vec![1, 2, 3, 4]);
}

/// **VALUE**: Verifies a malformed payload is dropped without poisoning the
/// channel for later, well-formed events.
///
/// **BUG THIS CATCHES**: Would catch the event handler unwrapping the serde
/// decode, where one bad payload from a mismatched provider version would
/// panic inside the provider's emission thread.
#[tokio::test]
async fn given_malformed_payload_when_emitted_then_dropped_and_channel_survives() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    let observer = Arc::new(CountingObserver::default());
    client.add_observer(Arc::clone(&observer) as Arc<dyn InventoryObserver>).await;

    // WHEN: Garbage, then a valid event
    fixture
        .gateway
        .emit(CHANNEL_ITEM_ADDED, json!({"wrong": "shape"}))
        .await;
    fixture
        .gateway
        .emit(CHANNEL_ITEM_ADDED, event_payload(99, 1, 5))
        .await;
    client.pump().await;

    // THEN: Only the valid event arrives
    let added = observer.added_events();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].item_id, 99);
}

/// **VALUE**: Verifies every registered observer receives each event.
#[tokio::test]
async fn given_two_observers_when_event_pumped_then_both_notified() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    let first = Arc::new(CountingObserver::default());
    let second = Arc::new(CountingObserver::default());
    client.add_observer(Arc::clone(&first) as Arc<dyn InventoryObserver>).await;
    client.add_observer(Arc::clone(&second) as Arc<dyn InventoryObserver>).await;

    fixture
        .gateway
        .emit(CHANNEL_ITEM_REMOVED, event_payload(7, 8, 9))
        .await;
    client.pump().await;

    assert_eq!(first.removed_events().len(), 1);
    assert_eq!(second.removed_events().len(), 1);
}
