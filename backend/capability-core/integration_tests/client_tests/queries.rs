use crate::helpers::{
    ready_provider, CountingGateway, CURRENT_ACTOR, PROVIDER_CHARACTER, PROVIDED_ITEM_COUNT,
};

use capability_core::client::{CapabilityClient, FixedActor};
use capability_core::gateway::LocalGateway;
use capability_core::{CHANNEL_CURRENT_CHARACTER, CHANNEL_ITEM_COUNT};

use common::OwnerScope;

use std::sync::Arc;

use serde_json::json;

/// **VALUE**: Verifies unregistered queries return defaults without a single
/// remote call.
///
/// **WHY THIS MATTERS**: The best-effort contract says callers may query
/// unconditionally. When the provider is absent that must cost nothing and
/// risk nothing - not even a gateway round trip.
#[tokio::test]
async fn given_unregistered_client_when_queried_then_defaults_without_remote_calls() {
    // GIVEN: An empty gateway behind an invoke counter
    let gateway = Arc::new(CountingGateway::new(LocalGateway::new()));
    let client =
        CapabilityClient::connect(gateway.clone(), Arc::new(FixedActor(CURRENT_ACTOR))).await;

    // Construction probe is the only invoke so far
    let probes = gateway.invoke_count();
    assert_eq!(probes, 1);

    // WHEN: Calling every query in Unregistered state
    let count = client.item_count(1234, OwnerScope::UseDefault).await;
    let character = client.current_character().await;
    let by_type = client.inventory_count_by_type(3, None).await;
    let toggled = client.toggle_background_filter("crafting").await;

    // THEN: All defaults, and the invoke counter never moved
    assert_eq!(count, 0);
    assert_eq!(character, 0);
    assert_eq!(by_type, 0);
    assert!(!toggled);
    assert_eq!(gateway.invoke_count(), probes, "No remote call may be issued");
}

/// **VALUE**: Verifies the exact item-count wire shape: defaulted owner is
/// resolved to the current local actor before the call goes out.
///
/// **BUG THIS CATCHES**: Would catch the owner default being resolved
/// provider-side, or the retainer selector being dropped from the argument
/// list - both would silently change what gets counted.
#[tokio::test]
async fn given_defaulted_owner_when_item_count_called_then_actor_resolved_in_args() {
    // GIVEN: A registered client with current actor 555
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    // WHEN: Querying without naming an owner
    let count = client.item_count(1234, OwnerScope::UseDefault).await;

    // THEN: The provider saw [item, actor, 0] and the answer came through
    assert_eq!(count, PROVIDED_ITEM_COUNT);
    let args = fixture
        .item_count_args
        .lock()
        .expect("args mutex poisoned")
        .clone();
    assert_eq!(args, Some(json!([1234, CURRENT_ACTOR, 0])));
}

/// **VALUE**: Verifies an explicit owner bypasses the local-actor default.
#[tokio::test]
async fn given_specified_owner_when_item_count_called_then_owner_forwarded() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    client.item_count(1234, OwnerScope::Specified(777)).await;

    let args = fixture
        .item_count_args
        .lock()
        .expect("args mutex poisoned")
        .clone();
    assert_eq!(args, Some(json!([1234, 777, 0])));
}

/// **VALUE**: Verifies inventory-count-by-type forwards a missing owner as
/// null instead of resolving it locally.
///
/// **WHY THIS MATTERS**: The provider treats null as "every owner it
/// tracks"; resolving it to the current actor here would quietly shrink the
/// result.
#[tokio::test]
async fn given_no_owner_when_inventory_count_by_type_called_then_null_forwarded() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    let count = client.inventory_count_by_type(5, None).await;

    assert_eq!(count, 42);
    let args = fixture
        .by_type_args
        .lock()
        .expect("args mutex poisoned")
        .clone();
    assert_eq!(args, Some(json!([5, null])));
}

/// **VALUE**: Verifies current-character and the filter toggle pass through.
#[tokio::test]
async fn given_registered_client_when_simple_queries_called_then_provider_answers() {
    let fixture = ready_provider().await;
    let client = CapabilityClient::connect(
        fixture.gateway.clone(),
        Arc::new(FixedActor(CURRENT_ACTOR)),
    )
    .await;

    assert_eq!(client.current_character().await, PROVIDER_CHARACTER);
    assert!(client.toggle_background_filter("crafting").await);
}

/// **VALUE**: Verifies a provider-side fault never escapes a query.
///
/// **WHY THIS MATTERS**: This is the heart of the error-handling design:
/// every public operation is total. A panicking or erroring provider must
/// degrade to defaults, not take the caller down.
#[tokio::test]
async fn given_faulting_provider_when_queried_then_default_returned() {
    // GIVEN: A provider that registers fine but faults on every query
    let gateway = Arc::new(LocalGateway::new());
    gateway
        .register_procedure(
            capability_core::CHANNEL_IS_INITIALIZED,
            Arc::new(|_| Ok(json!(true))),
        )
        .await;
    gateway
        .register_procedure(
            CHANNEL_ITEM_COUNT,
            Arc::new(|_| Err("provider exploded".to_string())),
        )
        .await;
    gateway
        .register_procedure(
            CHANNEL_CURRENT_CHARACTER,
            Arc::new(|_| Err("provider exploded".to_string())),
        )
        .await;

    let client =
        CapabilityClient::connect(gateway.clone(), Arc::new(FixedActor(CURRENT_ACTOR))).await;

    // WHEN / THEN: Queries return defaults, no panic, no error surfaces
    assert_eq!(client.item_count(1234, OwnerScope::UseDefault).await, 0);
    assert_eq!(client.current_character().await, 0);
    assert!(!client.toggle_background_filter("anything").await);
}

/// **VALUE**: Verifies a shape mismatch in the result counts as a fault.
///
/// **BUG THIS CATCHES**: Would catch the decode step unwrapping, where a
/// provider version skew (string instead of number) would panic the caller
/// instead of defaulting.
#[tokio::test]
async fn given_mistyped_result_when_queried_then_default_returned() {
    let gateway = Arc::new(LocalGateway::new());
    gateway
        .register_procedure(
            capability_core::CHANNEL_IS_INITIALIZED,
            Arc::new(|_| Ok(json!(true))),
        )
        .await;
    gateway
        .register_procedure(
            CHANNEL_ITEM_COUNT,
            Arc::new(|_| Ok(json!("seven"))),
        )
        .await;

    let client =
        CapabilityClient::connect(gateway.clone(), Arc::new(FixedActor(CURRENT_ACTOR))).await;

    assert_eq!(client.item_count(1234, OwnerScope::UseDefault).await, 0);
}
