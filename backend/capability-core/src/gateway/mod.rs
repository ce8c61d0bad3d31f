//! The call-gateway boundary.
//!
//! Everything the client knows about the provider goes through
//! [`CallGateway`]: a synchronous-from-the-caller's-view `invoke`, plus
//! `subscribe`/`unsubscribe` for push channels. Payloads cross the boundary
//! as JSON values; typed encoding and decoding happen at the client edge.
//!
//! # Threading
//!
//! Push handlers run on whatever thread the provider emits from. A handler
//! must only hand the payload off (the client enqueues a notice for its
//! consumer pump) and never touch consumer-side state directly.

pub mod local;

pub use local::LocalGateway;

use crate::error::gateway::GatewayError;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// Push-notification handler attached to one channel.
pub type EventHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Identifies one subscriber on one channel.
///
/// Subscribing again under the same key replaces the previous handler in
/// place, so a (channel, key) pair can never receive duplicate delivery.
pub type SubscriberKey = String;

/// Host-level mechanism for reaching a capability provider.
#[async_trait]
pub trait CallGateway: Send + Sync {
    /// Remote procedure call on `channel`. Blocks the caller until the
    /// provider answers or faults.
    async fn invoke(&self, channel: &str, args: Value) -> Result<Value, GatewayError>;

    /// Attach a push handler to `channel`. Delivery is FIFO per channel in
    /// provider emission order; the delivery thread is provider-controlled.
    async fn subscribe(
        &self,
        channel: &str,
        key: SubscriberKey,
        handler: EventHandler,
    ) -> Result<(), GatewayError>;

    /// Detach the handler registered under `key`. Unknown keys are a no-op.
    async fn unsubscribe(&self, channel: &str, key: &str) -> Result<(), GatewayError>;
}
