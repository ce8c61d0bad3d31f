//! Shared fixtures for client integration tests.

use capability_core::error::gateway::GatewayError;
use capability_core::gateway::{CallGateway, EventHandler, LocalGateway, SubscriberKey};
use capability_core::observer::InventoryObserver;
use capability_core::{
    CHANNEL_CURRENT_CHARACTER, CHANNEL_INVENTORY_COUNT_BY_TYPE, CHANNEL_IS_INITIALIZED,
    CHANNEL_ITEM_COUNT, CHANNEL_TOGGLE_BACKGROUND_FILTER,
};

use common::{ItemEvent, ItemFlags};

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

/// Actor id the test client injects as "current local actor".
pub const CURRENT_ACTOR: u64 = 555;

/// Character id the fake provider reports as current.
pub const PROVIDER_CHARACTER: u64 = 900_001;

/// Item count the fake provider answers with.
pub const PROVIDED_ITEM_COUNT: u32 = 7;

/// A gateway plus handles onto the arguments the fake provider received.
pub struct ProviderFixture {
    pub gateway: Arc<LocalGateway>,
    pub item_count_args: Arc<Mutex<Option<Value>>>,
    pub by_type_args: Arc<Mutex<Option<Value>>>,
}

/// Register every provider procedure on `gateway`, all answering happily.
pub async fn register_provider_procedures(
    gateway: &LocalGateway,
) -> (Arc<Mutex<Option<Value>>>, Arc<Mutex<Option<Value>>>) {
    gateway
        .register_procedure(CHANNEL_IS_INITIALIZED, Arc::new(|_| Ok(json!(true))))
        .await;
    gateway
        .register_procedure(
            CHANNEL_CURRENT_CHARACTER,
            Arc::new(|_| Ok(json!(PROVIDER_CHARACTER))),
        )
        .await;
    gateway
        .register_procedure(CHANNEL_TOGGLE_BACKGROUND_FILTER, Arc::new(|_| Ok(json!(true))))
        .await;

    let item_count_args = Arc::new(Mutex::new(None));
    let recorded = Arc::clone(&item_count_args);
    gateway
        .register_procedure(
            CHANNEL_ITEM_COUNT,
            Arc::new(move |args| {
                *recorded.lock().expect("args mutex poisoned") = Some(args);
                Ok(json!(PROVIDED_ITEM_COUNT))
            }),
        )
        .await;

    let by_type_args = Arc::new(Mutex::new(None));
    let recorded = Arc::clone(&by_type_args);
    gateway
        .register_procedure(
            CHANNEL_INVENTORY_COUNT_BY_TYPE,
            Arc::new(move |args| {
                *recorded.lock().expect("args mutex poisoned") = Some(args);
                Ok(json!(42))
            }),
        )
        .await;

    (item_count_args, by_type_args)
}

/// A gateway whose provider is present and initialized.
pub async fn ready_provider() -> ProviderFixture {
    let gateway = Arc::new(LocalGateway::new());
    let (item_count_args, by_type_args) = register_provider_procedures(&gateway).await;
    ProviderFixture {
        gateway,
        item_count_args,
        by_type_args,
    }
}

/// An event payload shaped the way the provider emits it.
pub fn event_payload(item_id: u32, owner_id: u64, quantity: u32) -> Value {
    serde_json::to_value(ItemEvent {
        item_id,
        flags: ItemFlags::None,
        owner_id,
        quantity,
    })
    .expect("event serialization cannot fail")
}

/// Observer that records every delivery.
#[derive(Default)]
pub struct CountingObserver {
    pub added: Mutex<Vec<ItemEvent>>,
    pub removed: Mutex<Vec<ItemEvent>>,
}

impl CountingObserver {
    pub fn added_events(&self) -> Vec<ItemEvent> {
        self.added.lock().expect("observer mutex poisoned").clone()
    }

    pub fn removed_events(&self) -> Vec<ItemEvent> {
        self.removed.lock().expect("observer mutex poisoned").clone()
    }
}

impl InventoryObserver for CountingObserver {
    fn on_item_added(&self, event: ItemEvent) {
        self.added
            .lock()
            .expect("observer mutex poisoned")
            .push(event);
    }

    fn on_item_removed(&self, event: ItemEvent) {
        self.removed
            .lock()
            .expect("observer mutex poisoned")
            .push(event);
    }
}

/// Gateway decorator that counts remote invokes, for asserting that
/// unregistered queries never reach the provider.
pub struct CountingGateway {
    inner: LocalGateway,
    invokes: AtomicU32,
}

impl CountingGateway {
    pub fn new(inner: LocalGateway) -> Self {
        Self {
            inner,
            invokes: AtomicU32::new(0),
        }
    }

    pub fn invoke_count(&self) -> u32 {
        self.invokes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallGateway for CountingGateway {
    async fn invoke(&self, channel: &str, args: Value) -> Result<Value, GatewayError> {
        self.invokes.fetch_add(1, Ordering::SeqCst);
        self.inner.invoke(channel, args).await
    }

    async fn subscribe(
        &self,
        channel: &str,
        key: SubscriberKey,
        handler: EventHandler,
    ) -> Result<(), GatewayError> {
        self.inner.subscribe(channel, key, handler).await
    }

    async fn unsubscribe(&self, channel: &str, key: &str) -> Result<(), GatewayError> {
        self.inner.unsubscribe(channel, key).await
    }
}
