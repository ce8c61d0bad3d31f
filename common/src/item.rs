use serde::{Deserialize, Serialize};

/// Quality flags the provider reports on an item stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemFlags {
    #[default]
    None,
    HighQuality,
    Collectable,
}

/// A single inventory change pushed by the provider.
///
/// Immutable and value-typed; handed to subscribers by copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEvent {
    /// The item that changed.
    pub item_id: u32,
    /// Quality flags on the changed stack.
    pub flags: ItemFlags,
    /// Character or retainer holding the stack.
    pub owner_id: u64,
    /// Quantity added or removed.
    pub quantity: u32,
}
