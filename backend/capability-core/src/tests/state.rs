use crate::client::ProviderState;

/// **VALUE**: Verifies both registered flavors count as registered.
///
/// **WHY THIS MATTERS**: Every query gates on `is_registered()`. If
/// `LateRegistered` fell out of the predicate, a provider arriving after
/// startup would register but all queries would still return defaults.
#[test]
fn given_each_state_when_is_registered_checked_then_only_unregistered_is_false() {
    assert!(!ProviderState::Unregistered.is_registered());
    assert!(ProviderState::Registered.is_registered());
    assert!(ProviderState::LateRegistered.is_registered());
}

/// **VALUE**: Verifies the client starts life unregistered.
///
/// **BUG THIS CATCHES**: Would catch the `Default` derive landing on a
/// registered variant, which would let queries hit the gateway before any
/// probe succeeded.
#[test]
fn given_default_state_then_unregistered() {
    assert_eq!(ProviderState::default(), ProviderState::Unregistered);
}
