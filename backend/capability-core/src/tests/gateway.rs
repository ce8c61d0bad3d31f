use crate::error::gateway::GatewayError;
use crate::gateway::{CallGateway, EventHandler, LocalGateway};

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::{Value, json};

fn recording_handler(log: Arc<Mutex<Vec<String>>>, tag: &'static str) -> EventHandler {
    Arc::new(move |payload| {
        log.lock()
            .expect("handler log poisoned")
            .push(format!("{tag}:{payload}"));
    })
}

/// **VALUE**: Verifies invoke on an empty channel reports ProviderAbsent.
///
/// **WHY THIS MATTERS**: The client's construction probe relies on this
/// error to decide it should start unregistered instead of panicking.
#[tokio::test]
async fn given_no_procedure_when_invoked_then_provider_absent() {
    // GIVEN: A gateway with nothing registered
    let gateway = LocalGateway::new();

    // WHEN: Invoking an unknown channel
    let result = gateway.invoke("Nobody.Home", Value::Null).await;

    // THEN: ProviderAbsent names the channel
    match result {
        Err(GatewayError::ProviderAbsent { channel, .. }) => {
            assert_eq!(channel, "Nobody.Home");
        }
        other => panic!("Expected ProviderAbsent, got {other:?}"),
    }
}

/// **VALUE**: Verifies a procedure fault surfaces as CallFault, not a panic.
///
/// **BUG THIS CATCHES**: Would catch the gateway unwrapping provider errors,
/// which would take the whole consumer down with a misbehaving provider.
#[tokio::test]
async fn given_faulting_procedure_when_invoked_then_call_fault() {
    let gateway = LocalGateway::new();
    gateway
        .register_procedure("Broken.Call", Arc::new(|_| Err("boom".to_string())))
        .await;

    let result = gateway.invoke("Broken.Call", Value::Null).await;

    match result {
        Err(GatewayError::CallFault { channel, message, .. }) => {
            assert_eq!(channel, "Broken.Call");
            assert_eq!(message, "boom");
        }
        other => panic!("Expected CallFault, got {other:?}"),
    }
}

/// **VALUE**: Verifies fan-out hits subscribers in subscription order.
///
/// **WHY THIS MATTERS**: Delivery order on a channel is FIFO as produced;
/// within one emission the gateway must not reorder subscribers either, or
/// interleaved logs become useless for debugging.
#[tokio::test]
async fn given_two_subscribers_when_emit_then_fifo_in_subscription_order() {
    let gateway = LocalGateway::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    gateway
        .subscribe("Items", "first".to_string(), recording_handler(Arc::clone(&log), "a"))
        .await
        .expect("subscribe failed");
    gateway
        .subscribe("Items", "second".to_string(), recording_handler(Arc::clone(&log), "b"))
        .await
        .expect("subscribe failed");

    let delivered = gateway.emit("Items", json!(1)).await;

    assert_eq!(delivered, 2, "Both handlers should run");
    let entries = log.lock().expect("handler log poisoned").clone();
    assert_eq!(entries, vec!["a:1", "b:1"], "Subscription order preserved");
}

/// **VALUE**: Verifies re-subscribing under the same key replaces the
/// handler instead of adding a second one.
///
/// **WHY THIS MATTERS**: This is the gateway half of the no-duplicate-
/// delivery invariant; the client leans on it every time the provider
/// re-announces availability.
#[tokio::test]
async fn given_same_key_when_resubscribed_then_single_delivery() {
    let gateway = LocalGateway::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    gateway
        .subscribe("Items", "client".to_string(), recording_handler(Arc::clone(&log), "old"))
        .await
        .expect("subscribe failed");
    gateway
        .subscribe("Items", "client".to_string(), recording_handler(Arc::clone(&log), "new"))
        .await
        .expect("subscribe failed");

    assert_eq!(gateway.subscriber_count("Items").await, 1);

    gateway.emit("Items", json!(7)).await;

    let entries = log.lock().expect("handler log poisoned").clone();
    assert_eq!(entries, vec!["new:7"], "Only the replacement handler runs");
}

/// **VALUE**: Verifies unsubscribe detaches exactly the named key.
#[tokio::test]
async fn given_unsubscribed_key_when_emit_then_not_delivered() {
    let gateway = LocalGateway::new();
    let log = Arc::new(Mutex::new(Vec::new()));

    gateway
        .subscribe("Items", "keep".to_string(), recording_handler(Arc::clone(&log), "keep"))
        .await
        .expect("subscribe failed");
    gateway
        .subscribe("Items", "drop".to_string(), recording_handler(Arc::clone(&log), "drop"))
        .await
        .expect("subscribe failed");

    gateway
        .unsubscribe("Items", "drop")
        .await
        .expect("unsubscribe failed");

    gateway.emit("Items", json!(3)).await;

    let entries = log.lock().expect("handler log poisoned").clone();
    assert_eq!(entries, vec!["keep:3"]);
    assert_eq!(gateway.subscriber_count("Items").await, 1);
}

/// **VALUE**: Verifies unsubscribing an unknown key is a harmless no-op.
#[tokio::test]
async fn given_unknown_key_when_unsubscribed_then_ok() {
    let gateway = LocalGateway::new();

    let result = gateway.unsubscribe("Items", "ghost").await;

    assert!(result.is_ok(), "Unknown keys should not error");
}
