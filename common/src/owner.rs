/// Owner selector for item-count queries.
///
/// Replaces an optional owner id so the defaulting rule is visible at the
/// call boundary: `UseDefault` resolves to the current local actor exactly
/// once, inside the client, before the remote call is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    /// Query this exact character or retainer.
    Specified(u64),
    /// Query whoever the host considers the current local actor.
    UseDefault,
}

impl From<Option<u64>> for OwnerScope {
    fn from(owner: Option<u64>) -> Self {
        match owner {
            Some(id) => OwnerScope::Specified(id),
            None => OwnerScope::UseDefault,
        }
    }
}
