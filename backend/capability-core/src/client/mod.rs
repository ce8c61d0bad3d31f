//! Resilient client for the inventory capability provider.
//!
//! The provider is optional, may be absent at startup, and may arrive or
//! vanish at any point afterwards. This client absorbs all of that:
//!
//! - Construction never fails. A probe decides the starting state; a durable
//!   watch on the availability channel handles late arrival.
//! - Every query is total. Unregistered state or a faulting remote call both
//!   reduce to the query's default value, logged but never propagated.
//! - Push events and availability flips are queued by the gateway handlers
//!   and only applied when the consumer drains them with [`pump`], so all
//!   state transitions and observer dispatch happen on the consumer's own
//!   execution context.
//!
//! [`pump`]: CapabilityClient::pump

mod notice;
mod state;

pub use notice::ClientNotice;
pub use state::ProviderState;

use crate::error::gateway::GatewayError;
use crate::gateway::{CallGateway, EventHandler, SubscriberKey};
use crate::observer::InventoryObserver;
use crate::{
    CHANNEL_AVAILABILITY, CHANNEL_CURRENT_CHARACTER, CHANNEL_INVENTORY_COUNT_BY_TYPE,
    CHANNEL_IS_INITIALIZED, CHANNEL_ITEM_ADDED, CHANNEL_ITEM_COUNT, CHANNEL_ITEM_REMOVED,
    CHANNEL_TOGGLE_BACKGROUND_FILTER,
};

use common::{ItemEvent, OwnerScope};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tokio::sync::{Mutex, RwLock, mpsc};
use uuid::Uuid;

/// Source of the "current local actor" identity used when an item-count
/// query does not name an owner. Supplied by the host, not the provider.
pub trait LocalActorSource: Send + Sync {
    fn current_actor_id(&self) -> u64;
}

/// A fixed actor identity, for tests and hosts without a dynamic actor
/// concept.
pub struct FixedActor(pub u64);

impl LocalActorSource for FixedActor {
    fn current_actor_id(&self) -> u64 {
        self.0
    }
}

pub struct CapabilityClient {
    gateway: Arc<dyn CallGateway>,
    actors: Arc<dyn LocalActorSource>,
    state: RwLock<ProviderState>,
    observers: RwLock<Vec<Arc<dyn InventoryObserver>>>,

    // Producer half is cloned into gateway handlers; the consumer drains the
    // receiver inside pump().
    notice_tx: mpsc::UnboundedSender<ClientNotice>,
    notice_rx: Mutex<mpsc::UnboundedReceiver<ClientNotice>>,

    // Suffix for gateway subscriber keys so two clients sharing a gateway
    // never clobber each other's registrations.
    instance_id: Uuid,

    shut_down: AtomicBool,
}

impl CapabilityClient {
    /// Connect to the provider through `gateway`.
    ///
    /// Never fails: if the availability probe errors or answers `false`, the
    /// client starts in [`ProviderState::Unregistered`] and every query
    /// returns its default until the provider announces itself on the
    /// availability channel.
    pub async fn connect(
        gateway: Arc<dyn CallGateway>,
        actors: Arc<dyn LocalActorSource>,
    ) -> Self {
        let (notice_tx, notice_rx) = mpsc::unbounded_channel();
        let client = Self {
            gateway,
            actors,
            state: RwLock::new(ProviderState::Unregistered),
            observers: RwLock::new(Vec::new()),
            notice_tx,
            notice_rx: Mutex::new(notice_rx),
            instance_id: Uuid::new_v4(),
            shut_down: AtomicBool::new(false),
        };

        match client
            .gateway
            .invoke(CHANNEL_IS_INITIALIZED, Value::Null)
            .await
        {
            Ok(answer) if answer.as_bool() == Some(true) => {
                info!("Provider answered the construction probe; registering");
                *client.state.write().await = ProviderState::Registered;
                client.attach_event_channels().await;
            }
            Ok(_) => {
                info!("Provider reachable but not initialized yet");
            }
            Err(error) => {
                warn!("Construction probe failed, starting unregistered: {error}");
            }
        }

        // Watch availability regardless of the probe outcome. This
        // subscription is durable for the client's whole lifetime.
        let tx = client.notice_tx.clone();
        let handler: EventHandler = Arc::new(move |payload| {
            let ready = payload.as_bool().unwrap_or(false);
            let _ = tx.send(ClientNotice::AvailabilityChanged(ready));
        });
        if let Err(error) = client
            .gateway
            .subscribe(
                CHANNEL_AVAILABILITY,
                client.subscriber_key(CHANNEL_AVAILABILITY),
                handler,
            )
            .await
        {
            warn!("Failed to watch provider availability: {error}");
        }

        client
    }

    /// Register a consumer-side observer for item events.
    pub async fn add_observer(&self, observer: Arc<dyn InventoryObserver>) {
        self.observers.write().await.push(observer);
    }

    /// Current registration state.
    pub async fn state(&self) -> ProviderState {
        *self.state.read().await
    }

    /// Drain every queued notification on the caller's execution context.
    ///
    /// This is the only place state transitions are applied and the only
    /// place observers run; call it from the consumer thread, typically once
    /// per frame or tick. Returns the number of notices processed.
    pub async fn pump(&self) -> usize {
        if self.shut_down.load(Ordering::SeqCst) {
            return 0;
        }

        let mut notice_rx = self.notice_rx.lock().await;
        let mut processed = 0;
        while let Ok(notice) = notice_rx.try_recv() {
            if self.shut_down.load(Ordering::SeqCst) {
                break;
            }
            self.apply(notice).await;
            processed += 1;
        }
        processed
    }

    /// Count of `item_id` held by `owner`.
    ///
    /// Total: returns 0 when the provider is unregistered or the call
    /// faults. `OwnerScope::UseDefault` resolves to the injected local-actor
    /// identity before the call is issued.
    pub async fn item_count(&self, item_id: u32, owner: OwnerScope) -> u32 {
        if !self.state().await.is_registered() {
            return 0;
        }

        let owner_id = match owner {
            OwnerScope::Specified(id) => id,
            OwnerScope::UseDefault => self.actors.current_actor_id(),
        };

        // Trailing 0 selects the provider's default retainer bucket.
        self.query(CHANNEL_ITEM_COUNT, json!([item_id, owner_id, 0]))
            .await
    }

    /// Content id of the character the provider considers current, or 0.
    pub async fn current_character(&self) -> u64 {
        if !self.state().await.is_registered() {
            return 0;
        }
        self.query(CHANNEL_CURRENT_CHARACTER, Value::Null).await
    }

    /// Total stacks in `inventory_type`, or 0.
    ///
    /// The owner is forwarded unresolved; the provider treats `null` as
    /// "every owner it tracks", so no local defaulting applies here.
    pub async fn inventory_count_by_type(&self, inventory_type: u32, owner: Option<u64>) -> u32 {
        if !self.state().await.is_registered() {
            return 0;
        }
        self.query(
            CHANNEL_INVENTORY_COUNT_BY_TYPE,
            json!([inventory_type, owner]),
        )
        .await
    }

    /// Flip a provider-side background filter. Returns whether the provider
    /// accepted the toggle, or `false` on any failure.
    pub async fn toggle_background_filter(&self, filter: &str) -> bool {
        if !self.state().await.is_registered() {
            return false;
        }
        self.query(CHANNEL_TOGGLE_BACKGROUND_FILTER, json!([filter]))
            .await
    }

    /// Tear down every gateway registration.
    ///
    /// Idempotent. No observer fires after this returns, even if the
    /// provider emits concurrently: the flag is set before the channels are
    /// detached, and [`pump`](Self::pump) refuses delivery once it is set.
    pub async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            return;
        }

        info!("Capability client shutting down");
        for channel in [CHANNEL_AVAILABILITY, CHANNEL_ITEM_ADDED, CHANNEL_ITEM_REMOVED] {
            let key = self.subscriber_key(channel);
            if let Err(error) = self.gateway.unsubscribe(channel, &key).await {
                warn!("Failed to unsubscribe from {channel}: {error}");
            }
        }
    }

    fn subscriber_key(&self, channel: &str) -> SubscriberKey {
        format!("capability-client/{}/{channel}", self.instance_id)
    }

    /// Attach handlers for both item channels. Idempotent: any prior
    /// registration under this client's key is dropped first, so repeated
    /// availability notifications cannot cause duplicate delivery.
    async fn attach_event_channels(&self) {
        self.attach_item_channel(CHANNEL_ITEM_ADDED, ClientNotice::ItemAdded)
            .await;
        self.attach_item_channel(CHANNEL_ITEM_REMOVED, ClientNotice::ItemRemoved)
            .await;
    }

    async fn attach_item_channel(
        &self,
        channel: &'static str,
        wrap: fn(ItemEvent) -> ClientNotice,
    ) {
        let key = self.subscriber_key(channel);
        if let Err(error) = self.gateway.unsubscribe(channel, &key).await {
            warn!("Failed to clear stale subscription on {channel}: {error}");
        }

        let tx = self.notice_tx.clone();
        let handler: EventHandler = Arc::new(move |payload| {
            match serde_json::from_value::<ItemEvent>(payload) {
                Ok(event) => {
                    let _ = tx.send(wrap(event));
                }
                Err(error) => warn!("Dropped malformed payload on {channel}: {error}"),
            }
        });

        if let Err(error) = self.gateway.subscribe(channel, key, handler).await {
            warn!("Failed to subscribe to {channel}: {error}");
        }
    }

    async fn apply(&self, notice: ClientNotice) {
        match notice {
            ClientNotice::AvailabilityChanged(true) => {
                {
                    let mut state = self.state.write().await;
                    if !state.is_registered() {
                        info!("Provider arrived late; registering");
                        *state = ProviderState::LateRegistered;
                    }
                }
                // Re-attach on every announcement; safe across provider
                // reloads because attachment is unsubscribe-then-subscribe.
                self.attach_event_channels().await;
            }
            ClientNotice::AvailabilityChanged(false) => {
                info!("Provider went away; queries fall back to defaults");
                *self.state.write().await = ProviderState::Unregistered;
                // Event subscriptions stay attached: an absent provider
                // emits nothing, and arrival re-establishes them anyway.
            }
            ClientNotice::ItemAdded(event) => {
                for observer in self.observers.read().await.iter() {
                    observer.on_item_added(event);
                }
            }
            ClientNotice::ItemRemoved(event) => {
                for observer in self.observers.read().await.iter() {
                    observer.on_item_removed(event);
                }
            }
        }
    }

    /// Issue a remote call and decode the result, reducing every failure to
    /// the type's default. Faults are logged, never propagated.
    async fn query<T>(&self, channel: &str, args: Value) -> T
    where
        T: DeserializeOwned + Default,
    {
        let result = self
            .gateway
            .invoke(channel, args)
            .await
            .and_then(|value| {
                serde_json::from_value(value).map_err(|error| GatewayError::codec(channel, &error))
            });

        match result {
            Ok(value) => value,
            Err(error) => {
                warn!("Failed to call {channel}: {error}");
                T::default()
            }
        }
    }
}
