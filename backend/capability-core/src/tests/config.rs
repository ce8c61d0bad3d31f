use crate::config::WatchConfig;
use crate::error::config::ConfigError;

use tempfile::tempdir;

/// **VALUE**: Verifies a missing config file yields defaults, not an error.
///
/// **WHY THIS MATTERS**: First launch has no config file; the watcher must
/// come up with sane defaults instead of refusing to start.
#[test]
fn given_missing_file_when_loaded_then_defaults() {
    // GIVEN: An empty config directory
    let dir = tempdir().expect("tempdir failed");

    // WHEN: Loading
    let config = WatchConfig::load(dir.path()).expect("load should fall back to defaults");

    // THEN: Defaults
    assert_eq!(config.version, 1);
    assert_eq!(config.provider.pump_interval_ms, 250);
    assert!(config.provider.owner_override.is_none());
}

/// **VALUE**: Verifies a save/load round trip preserves every field.
///
/// **BUG THIS CATCHES**: Would catch a serde rename or a field dropped from
/// serialization, which would silently reset preferences on restart.
#[test]
fn given_saved_config_when_reloaded_then_round_trips() {
    let dir = tempdir().expect("tempdir failed");

    let mut config = WatchConfig::default();
    config.provider.pump_interval_ms = 100;
    config.provider.owner_override = Some(123_456);
    config.simulator.availability_delay_ms = 50;

    config.save(dir.path()).expect("save failed");
    let reloaded = WatchConfig::load(dir.path()).expect("reload failed");

    assert_eq!(reloaded.provider.pump_interval_ms, 100);
    assert_eq!(reloaded.provider.owner_override, Some(123_456));
    assert_eq!(reloaded.simulator.availability_delay_ms, 50);
}

/// **VALUE**: Verifies out-of-range pump intervals are rejected on save.
///
/// **WHY THIS MATTERS**: A zero interval would spin the consumer loop; a
/// huge one would make the client look dead. Validation keeps both out of
/// the file.
#[test]
fn given_bad_pump_interval_when_validated_then_rejected() {
    let mut config = WatchConfig::default();
    config.provider.pump_interval_ms = 0;

    let result = config.validate();

    assert!(
        matches!(result, Err(ConfigError::Validation { .. })),
        "Zero interval should fail validation"
    );
}

/// **VALUE**: Verifies corrupted JSON is an explicit parse error.
///
/// **WHY THIS MATTERS**: A present-but-broken file must not silently reset
/// preferences; the caller decides whether to fall back.
#[test]
fn given_corrupt_file_when_loaded_then_parse_error() {
    let dir = tempdir().expect("tempdir failed");
    std::fs::write(dir.path().join("watch.json"), "{not json").expect("write failed");

    let result = WatchConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

/// **VALUE**: Verifies unknown future versions are rejected.
#[test]
fn given_future_version_when_validated_then_rejected() {
    let mut config = WatchConfig::default();
    config.version = 99;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::Validation { .. })
    ));
}
