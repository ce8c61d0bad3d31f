/// Where the client currently stands with the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderState {
    /// Provider not confirmed present; every query short-circuits to its
    /// default without touching the gateway.
    #[default]
    Unregistered,

    /// Provider answered the construction probe; event channels attached.
    Registered,

    /// Provider arrived after a failed or negative probe. Behaviorally
    /// identical to `Registered`; kept distinct so the logs show which path
    /// a session took.
    LateRegistered,
}

impl ProviderState {
    /// True in both registered flavors.
    pub fn is_registered(self) -> bool {
        matches!(
            self,
            ProviderState::Registered | ProviderState::LateRegistered
        )
    }
}
