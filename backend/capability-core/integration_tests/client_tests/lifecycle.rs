use crate::helpers::{ready_provider, register_provider_procedures, CountingObserver, CURRENT_ACTOR};

use capability_core::client::{CapabilityClient, FixedActor, ProviderState};
use capability_core::gateway::LocalGateway;
use capability_core::observer::InventoryObserver;
use capability_core::{CHANNEL_AVAILABILITY, CHANNEL_ITEM_ADDED, CHANNEL_ITEM_REMOVED};

use common::OwnerScope;

use std::sync::Arc;

use serde_json::json;

/// **VALUE**: Verifies a present, initialized provider yields a Registered
/// client with exactly one subscription per event channel.
///
/// **WHY THIS MATTERS**: This is the happy construction path. A duplicate
/// subscription here would double every item event for the whole session.
#[tokio::test]
async fn given_ready_provider_when_connected_then_registered_with_single_subscriptions() {
    // GIVEN: A provider answering the probe with true
    let fixture = ready_provider().await;

    // WHEN: Connecting
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    // THEN: Registered, one subscription per channel
    assert_eq!(client.state().await, ProviderState::Registered);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_ADDED).await, 1);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_REMOVED).await, 1);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_AVAILABILITY).await, 1);
}

/// **VALUE**: Verifies an absent provider still produces a working client.
///
/// **WHY THIS MATTERS**: Construction must never fail (the host loads the
/// consumer whether or not the provider is installed). The availability
/// watch must be attached anyway, or a late-arriving provider would never
/// be noticed.
#[tokio::test]
async fn given_absent_provider_when_connected_then_unregistered_but_watching() {
    // GIVEN: A gateway with no procedures at all
    let gateway = Arc::new(LocalGateway::new());

    // WHEN: Connecting (probe faults with ProviderAbsent)
    let client =
        CapabilityClient::connect(gateway.clone(), Arc::new(FixedActor(CURRENT_ACTOR))).await;

    // THEN: Unregistered, but the availability watch is live
    assert_eq!(client.state().await, ProviderState::Unregistered);
    assert_eq!(gateway.subscriber_count(CHANNEL_AVAILABILITY).await, 1);
    assert_eq!(gateway.subscriber_count(CHANNEL_ITEM_ADDED).await, 0);
}

/// **VALUE**: Verifies the late-arrival path: availability `true` after an
/// unregistered start registers the client and attaches event channels.
///
/// **BUG THIS CATCHES**: Would catch the availability handler being dropped
/// when the probe fails, which would permanently lock the client out of a
/// provider installed after startup.
#[tokio::test]
async fn given_unregistered_client_when_provider_announces_then_late_registered() {
    // GIVEN: A client connected before the provider existed
    let gateway = Arc::new(LocalGateway::new());
    let client =
        CapabilityClient::connect(gateway.clone(), Arc::new(FixedActor(CURRENT_ACTOR))).await;
    assert_eq!(client.state().await, ProviderState::Unregistered);

    // WHEN: The provider registers its procedures and announces itself
    register_provider_procedures(&gateway).await;
    gateway.emit(CHANNEL_AVAILABILITY, json!(true)).await;
    client.pump().await;

    // THEN: Late-registered, event channels attached, queries flow
    assert_eq!(client.state().await, ProviderState::LateRegistered);
    assert_eq!(gateway.subscriber_count(CHANNEL_ITEM_ADDED).await, 1);
    assert_eq!(client.item_count(1, OwnerScope::UseDefault).await, 7);
}

/// **VALUE**: Verifies repeated availability announcements stay idempotent.
///
/// **WHY THIS MATTERS**: The provider re-announces on every reload. Firing
/// the notification three times must still leave exactly one subscription
/// per channel, or events get delivered in triplicate.
#[tokio::test]
async fn given_triple_availability_when_pumped_then_still_single_subscriptions() {
    // GIVEN: A registered client
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    // WHEN: The provider announces availability three times in a row
    for _ in 0..3 {
        fixture.gateway.emit(CHANNEL_AVAILABILITY, json!(true)).await;
    }
    client.pump().await;

    // THEN: Still exactly one subscription per event channel
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_ADDED).await, 1);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_REMOVED).await, 1);
    assert_eq!(client.state().await, ProviderState::Registered);
}

/// **VALUE**: Verifies availability `false` demotes to Unregistered and
/// queries fall back to defaults immediately.
#[tokio::test]
async fn given_registered_client_when_provider_withdraws_then_queries_default() {
    // GIVEN: A registered client whose provider would answer 7
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    assert_eq!(client.item_count(1, OwnerScope::UseDefault).await, 7);

    // WHEN: The provider withdraws
    fixture.gateway.emit(CHANNEL_AVAILABILITY, json!(false)).await;
    client.pump().await;

    // THEN: Unregistered; the query defaults even though the procedure is
    // still registered on the gateway
    assert_eq!(client.state().await, ProviderState::Unregistered);
    assert_eq!(client.item_count(1, OwnerScope::UseDefault).await, 0);
}

/// **VALUE**: Verifies a withdraw/announce cycle restores full service.
///
/// **BUG THIS CATCHES**: Would catch one-way state transitions, where a
/// provider reload leaves the client permanently degraded.
#[tokio::test]
async fn given_withdrawn_provider_when_it_returns_then_queries_flow_again() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    fixture.gateway.emit(CHANNEL_AVAILABILITY, json!(false)).await;
    client.pump().await;
    assert_eq!(client.item_count(1, OwnerScope::UseDefault).await, 0);

    fixture.gateway.emit(CHANNEL_AVAILABILITY, json!(true)).await;
    client.pump().await;

    assert_eq!(client.state().await, ProviderState::LateRegistered);
    assert_eq!(client.item_count(1, OwnerScope::UseDefault).await, 7);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_ADDED).await, 1);
}

/// **VALUE**: Verifies shutdown detaches everything and silences observers,
/// even when the provider keeps emitting.
///
/// **WHY THIS MATTERS**: This is the no-dangling-callback invariant. An
/// observer firing after teardown would touch a consumer that is mid-
/// destruction.
#[tokio::test]
async fn given_shutdown_when_provider_emits_then_no_observer_fires() {
    // GIVEN: A registered client with an observer
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;
    let observer = Arc::new(CountingObserver::default());
    client.add_observer(Arc::clone(&observer) as Arc<dyn InventoryObserver>).await;

    // WHEN: Shutting down, then the provider emits anyway
    client.shutdown().await;
    fixture
        .gateway
        .emit(CHANNEL_ITEM_ADDED, crate::helpers::event_payload(1, 2, 3))
        .await;
    let processed = client.pump().await;

    // THEN: Nothing reaches the observer; every registration is gone
    assert_eq!(processed, 0, "Pump must refuse delivery after shutdown");
    assert!(observer.added_events().is_empty());
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_AVAILABILITY).await, 0);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_ADDED).await, 0);
    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_ITEM_REMOVED).await, 0);
}

/// **VALUE**: Verifies shutdown is idempotent.
#[tokio::test]
async fn given_shutdown_twice_when_called_then_second_is_noop() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    client.shutdown().await;
    client.shutdown().await;

    assert_eq!(fixture.gateway.subscriber_count(CHANNEL_AVAILABILITY).await, 0);
}
