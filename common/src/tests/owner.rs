use crate::OwnerScope;

/// **VALUE**: Verifies the `Option<u64>` bridge maps `Some` to `Specified`.
///
/// **WHY THIS MATTERS**: Callers holding a plain optional owner id (config
/// overrides, UI input) rely on this conversion; a swap here would silently
/// query the wrong character.
#[test]
fn given_some_owner_when_converted_then_specified() {
    // GIVEN: An explicit owner id
    let owner: OwnerScope = Some(42u64).into();

    // THEN: It stays explicit
    assert_eq!(owner, OwnerScope::Specified(42));
}

/// **VALUE**: Verifies the `None` branch maps to `UseDefault`.
///
/// **BUG THIS CATCHES**: Would catch `None` being turned into
/// `Specified(0)`, which would query a nonexistent owner instead of the
/// current local actor.
#[test]
fn given_no_owner_when_converted_then_use_default() {
    let owner: OwnerScope = None.into();

    assert_eq!(owner, OwnerScope::UseDefault);
}
