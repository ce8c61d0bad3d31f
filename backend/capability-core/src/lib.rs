pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod observer;

#[cfg(test)]
mod tests;

use const_format::concatcp;

/// Name of the capability provider this client binds to. Every channel the
/// provider exposes is prefixed with it.
pub const PROVIDER_NAME: &str = "InventoryTracker";

/// Synchronous probe: is the provider up right now?
pub const CHANNEL_IS_INITIALIZED: &str = concatcp!(PROVIDER_NAME, ".IsInitialized");

/// Availability push channel; fires whenever the provider comes up or goes away.
pub const CHANNEL_AVAILABILITY: &str = concatcp!(PROVIDER_NAME, ".Initialized");

/// Query: content id of the character the provider considers current.
pub const CHANNEL_CURRENT_CHARACTER: &str = concatcp!(PROVIDER_NAME, ".CurrentCharacter");

/// Query: count of one item for one owner.
pub const CHANNEL_ITEM_COUNT: &str = concatcp!(PROVIDER_NAME, ".ItemCount");

/// Query: total stacks in one inventory type, optionally scoped to an owner.
pub const CHANNEL_INVENTORY_COUNT_BY_TYPE: &str =
    concatcp!(PROVIDER_NAME, ".InventoryCountByType");

/// Command: flip a provider-side background filter on or off.
pub const CHANNEL_TOGGLE_BACKGROUND_FILTER: &str =
    concatcp!(PROVIDER_NAME, ".ToggleBackgroundFilter");

/// Push channel: an item entered an inventory the provider watches.
pub const CHANNEL_ITEM_ADDED: &str = concatcp!(PROVIDER_NAME, ".ItemAdded");

/// Push channel: an item left an inventory the provider watches.
pub const CHANNEL_ITEM_REMOVED: &str = concatcp!(PROVIDER_NAME, ".ItemRemoved");
