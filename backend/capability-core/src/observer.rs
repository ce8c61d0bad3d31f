use common::ItemEvent;

/// Consumer-side sink for provider push events.
///
/// Observers are only ever invoked from the consumer's
/// [`pump`](crate::client::CapabilityClient::pump) context, never from a
/// provider thread, so implementations are free to touch frame-local state.
pub trait InventoryObserver: Send + Sync {
    fn on_item_added(&self, event: ItemEvent);
    fn on_item_removed(&self, event: ItemEvent);
}
