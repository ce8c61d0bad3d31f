use common::ItemEvent;

/// One marshaled notification.
///
/// Gateway handlers construct these on the provider's delivery thread and
/// queue them; the consumer applies them inside
/// [`pump`](super::CapabilityClient::pump) on its own execution context.
/// That queue hop is the entire thread-marshaling story: no shared client
/// state is touched from a provider thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientNotice {
    /// The provider announced it came up (`true`) or went away (`false`).
    AvailabilityChanged(bool),
    ItemAdded(ItemEvent),
    ItemRemoved(ItemEvent),
}
