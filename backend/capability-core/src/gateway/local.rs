//! In-process call gateway.
//!
//! Backs [`CallGateway`] with a procedure registry and per-channel
//! subscriber lists. The watcher binary and the test suite run against this;
//! a real deployment would put the host's IPC transport behind the same
//! trait instead.

use super::{CallGateway, EventHandler, SubscriberKey};
use crate::error::gateway::GatewayError;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use tokio::sync::RwLock;

/// Provider-side procedure: takes the raw argument payload and returns a
/// result payload or a fault message.
pub type Procedure = Arc<dyn Fn(Value) -> Result<Value, String> + Send + Sync>;

#[derive(Default)]
pub struct LocalGateway {
    procedures: RwLock<HashMap<String, Procedure>>,

    // Vec rather than map so fan-out keeps subscription order.
    channels: RwLock<HashMap<String, Vec<(SubscriberKey, EventHandler)>>>,
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the procedure behind `channel`.
    pub async fn register_procedure(&self, channel: &str, procedure: Procedure) {
        self.procedures
            .write()
            .await
            .insert(channel.to_string(), procedure);
        debug!("Registered procedure on {channel}");
    }

    /// Drop the procedure behind `channel`, if any. Invokes on the channel
    /// fail with `ProviderAbsent` afterwards.
    pub async fn unregister_procedure(&self, channel: &str) {
        self.procedures.write().await.remove(channel);
        debug!("Unregistered procedure on {channel}");
    }

    /// Fan a payload out to every subscriber on `channel`, in subscription
    /// order. Returns how many handlers ran.
    pub async fn emit(&self, channel: &str, payload: Value) -> usize {
        let handlers: Vec<EventHandler> = {
            let channels = self.channels.read().await;
            match channels.get(channel) {
                Some(subscribers) => subscribers
                    .iter()
                    .map(|(_, handler)| Arc::clone(handler))
                    .collect(),
                None => Vec::new(),
            }
        };

        // Lock released above: a handler may re-enter the gateway.
        for handler in &handlers {
            handler(payload.clone());
        }
        handlers.len()
    }

    /// Number of active subscriptions on `channel`.
    pub async fn subscriber_count(&self, channel: &str) -> usize {
        self.channels
            .read()
            .await
            .get(channel)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl CallGateway for LocalGateway {
    async fn invoke(&self, channel: &str, args: Value) -> Result<Value, GatewayError> {
        let procedure = {
            let procedures = self.procedures.read().await;
            procedures.get(channel).cloned()
        };

        let procedure = procedure.ok_or_else(|| GatewayError::provider_absent(channel))?;
        procedure(args).map_err(|message| GatewayError::call_fault(channel, message))
    }

    async fn subscribe(
        &self,
        channel: &str,
        key: SubscriberKey,
        handler: EventHandler,
    ) -> Result<(), GatewayError> {
        let mut channels = self.channels.write().await;
        let subscribers = channels.entry(channel.to_string()).or_default();

        match subscribers.iter().position(|(existing, _)| *existing == key) {
            // Replace in place so the subscriber keeps its delivery slot.
            Some(index) => subscribers[index].1 = handler,
            None => subscribers.push((key, handler)),
        }
        Ok(())
    }

    async fn unsubscribe(&self, channel: &str, key: &str) -> Result<(), GatewayError> {
        let mut channels = self.channels.write().await;
        if let Some(subscribers) = channels.get_mut(channel) {
            subscribers.retain(|(existing, _)| existing != key);
        }
        Ok(())
    }
}
