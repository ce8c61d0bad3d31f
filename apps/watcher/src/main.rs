mod error;
mod logger;
mod provider_sim;

use crate::error::WatcherError;

use capability_core::client::{CapabilityClient, FixedActor};
use capability_core::config::WatchConfig;
use capability_core::gateway::LocalGateway;
use capability_core::observer::InventoryObserver;

use common::{ItemEvent, OwnerScope};

use std::fs::create_dir_all;
use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};

/// Actor identity used when no owner override is configured.
const LOCAL_ACTOR_ID: u64 = 555_000_001;

/// The query showcase runs once every this many pump ticks.
const QUERY_EVERY_TICKS: u32 = 20;

/// Item the showcase asks the provider to count.
const SHOWCASE_ITEM_ID: u32 = 4551;

/// Logs every inventory change, the way a UI panel would render it.
struct LogObserver;

impl InventoryObserver for LogObserver {
    fn on_item_added(&self, event: ItemEvent) {
        info!(
            "Item received: {} x{} (owner {}, {:?})",
            event.item_id, event.quantity, event.owner_id, event.flags
        );
    }

    fn on_item_removed(&self, event: ItemEvent) {
        info!(
            "Item removed: {} x{} (owner {}, {:?})",
            event.item_id, event.quantity, event.owner_id, event.flags
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), WatcherError> {
    let data_dir = dirs::config_dir()
        .ok_or_else(|| WatcherError::new("No config directory on this platform"))?
        .join("stockwatch");
    create_dir_all(&data_dir)
        .map_err(|e| WatcherError::new(format!("Failed to create data directory: {e}")))?;

    logger::initialize(&data_dir)?;
    info!("Stockwatch starting");
    info!("Data directory: {}", data_dir.display());

    let config = WatchConfig::load(&data_dir).unwrap_or_else(|error| {
        warn!("Falling back to default config: {error}");
        WatchConfig::default()
    });

    let gateway = Arc::new(LocalGateway::new());
    tokio::spawn(provider_sim::run(
        Arc::clone(&gateway),
        config.simulator.clone(),
    ));

    let actor_id = config.provider.owner_override.unwrap_or(LOCAL_ACTOR_ID);
    let client =
        CapabilityClient::connect(gateway.clone(), Arc::new(FixedActor(actor_id))).await;
    client.add_observer(Arc::new(LogObserver)).await;

    let mut ticker =
        tokio::time::interval(Duration::from_millis(config.provider.pump_interval_ms));
    let shutdown_signal = tokio::signal::ctrl_c();
    tokio::pin!(shutdown_signal);

    let mut ticks: u32 = 0;
    loop {
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Interrupt received");
                break;
            }
            _ = ticker.tick() => {
                client.pump().await;
                ticks = ticks.wrapping_add(1);
                if ticks % QUERY_EVERY_TICKS == 0 {
                    showcase_queries(&client).await;
                }
            }
        }
    }

    client.shutdown().await;
    info!("Stockwatch stopped");
    Ok(())
}

/// Issue one of each query and log the snapshot. All of these are safe to
/// call in any state; before the provider arrives they just report zeros.
async fn showcase_queries(client: &CapabilityClient) {
    let character = client.current_character().await;
    let sample_count = client.item_count(SHOWCASE_ITEM_ID, OwnerScope::UseDefault).await;
    let bag_total = client.inventory_count_by_type(0, None).await;
    info!(
        "Provider snapshot: state={:?} character={character} item {SHOWCASE_ITEM_ID} count={sample_count} bag stacks={bag_total}",
        client.state().await
    );
}
