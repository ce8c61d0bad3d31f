//! Shared data types for Stockwatch.
//!
//! This crate contains pure data structures passed between the capability
//! client, its consumers, and the watcher binary. Nothing in here has
//! business logic - that lives in `capability-core`.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure data structures and error plumbing
//! - **capability-core**: The provider client, gateway abstraction, config
//! - **stockwatch**: Binary wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod error;
pub mod item;
pub mod owner;

pub use error::error_location::ErrorLocation;
pub use item::{ItemEvent, ItemFlags};
pub use owner::OwnerScope;

#[cfg(test)]
mod tests;
