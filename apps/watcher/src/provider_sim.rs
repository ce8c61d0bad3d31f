//! A stand-in inventory provider.
//!
//! Registers the provider procedures after a configurable delay and then
//! emits alternating item events, so a normal run exercises the client's
//! late-registration path end to end.

use capability_core::config::SimulatorPrefs;
use capability_core::gateway::LocalGateway;
use capability_core::{
    CHANNEL_AVAILABILITY, CHANNEL_CURRENT_CHARACTER, CHANNEL_INVENTORY_COUNT_BY_TYPE,
    CHANNEL_IS_INITIALIZED, CHANNEL_ITEM_ADDED, CHANNEL_ITEM_COUNT, CHANNEL_ITEM_REMOVED,
    CHANNEL_TOGGLE_BACKGROUND_FILTER,
};

use common::{ItemEvent, ItemFlags};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;
use serde_json::{Value, json};

/// Character the simulated provider reports as current.
const SIM_CHARACTER: u64 = 9_000_123;

/// Item pool the simulator cycles through.
const SIM_ITEM_IDS: [u32; 3] = [4551, 5530, 27850];

/// Run the simulated provider on `gateway` until the task is dropped.
pub async fn run(gateway: Arc<LocalGateway>, prefs: SimulatorPrefs) {
    tokio::time::sleep(Duration::from_millis(prefs.availability_delay_ms)).await;

    register_procedures(&gateway).await;
    info!("Simulated provider up, announcing availability");
    gateway.emit(CHANNEL_AVAILABILITY, json!(true)).await;

    let mut ticker = tokio::time::interval(Duration::from_millis(prefs.emit_interval_ms));
    let mut sequence: u32 = 0;
    loop {
        ticker.tick().await;
        sequence = sequence.wrapping_add(1);

        let event = ItemEvent {
            item_id: SIM_ITEM_IDS[sequence as usize % SIM_ITEM_IDS.len()],
            flags: if sequence % 5 == 0 {
                ItemFlags::HighQuality
            } else {
                ItemFlags::None
            },
            owner_id: SIM_CHARACTER,
            quantity: 1 + sequence % 3,
        };

        let channel = if sequence % 4 == 0 {
            CHANNEL_ITEM_REMOVED
        } else {
            CHANNEL_ITEM_ADDED
        };
        let payload = serde_json::to_value(event).expect("event serialization cannot fail");
        gateway.emit(channel, payload).await;
    }
}

async fn register_procedures(gateway: &LocalGateway) {
    gateway
        .register_procedure(CHANNEL_IS_INITIALIZED, Arc::new(|_| Ok(json!(true))))
        .await;
    gateway
        .register_procedure(
            CHANNEL_CURRENT_CHARACTER,
            Arc::new(|_| Ok(json!(SIM_CHARACTER))),
        )
        .await;

    // Deterministic pseudo-counts derived from the arguments, so repeated
    // queries in the log are easy to eyeball.
    gateway
        .register_procedure(
            CHANNEL_ITEM_COUNT,
            Arc::new(|args| {
                let item_id = args.get(0).and_then(Value::as_u64).unwrap_or(0);
                Ok(json!(item_id % 50))
            }),
        )
        .await;
    gateway
        .register_procedure(
            CHANNEL_INVENTORY_COUNT_BY_TYPE,
            Arc::new(|args| {
                let inventory_type = args.get(0).and_then(Value::as_u64).unwrap_or(0);
                Ok(json!(inventory_type * 10 + 5))
            }),
        )
        .await;

    let filter_enabled = Arc::new(AtomicBool::new(false));
    gateway
        .register_procedure(
            CHANNEL_TOGGLE_BACKGROUND_FILTER,
            Arc::new(move |_| {
                let now_enabled = !filter_enabled.fetch_xor(true, Ordering::SeqCst);
                Ok(json!(now_enabled))
            }),
        )
        .await;
}
