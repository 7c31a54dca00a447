use drawkit_settings::{Config, ConfigError, SettingsError, SettingsManager};
use tempfile::tempdir;

#[test]
fn test_toml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");

    let mut config = Config::default();
    config.editor.history_limit = 17;
    config.style.fill = Some("#ff000080".to_string());
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let mut config = Config::default();
    config.font.family = "Sans".to_string();
    config.grid.visible = false;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.font.family, "Sans");
    assert!(!loaded.grid.visible);
}

#[test]
fn test_partial_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[editor]\nhistory_limit = 5\n").unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.editor.history_limit, 5);
    assert_eq!(loaded.style, Config::default().style);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.ini");
    let err = Config::default().save_to_file(&path).unwrap_err();
    assert!(matches!(
        err,
        SettingsError::Config(ConfigError::UnsupportedFormat(_))
    ));
}

#[test]
fn test_validation_rejects_bad_values() {
    let mut config = Config::default();
    config.editor.history_limit = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.style.stroke = Some("black".to_string());
    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidColor {
            key: "style.stroke".to_string(),
            value: "black".to_string(),
        })
    );

    let mut config = Config::default();
    config.editor.hit_tolerance = -1.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_grid_spacing_in_storage_units() {
    let config = Config::default();
    assert_eq!(config.grid.spacing_storage(), 50.0);
}

#[test]
fn test_manager_load_missing_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");

    let mut manager = SettingsManager::load_or_default(&path).unwrap();
    assert_eq!(manager.config(), &Config::default());

    manager.config_mut().editor.hotspot_tolerance = 6.0;
    manager.save().unwrap();
    assert!(path.exists());

    let reloaded = SettingsManager::load_or_default(&path).unwrap();
    assert_eq!(reloaded.config().editor.hotspot_tolerance, 6.0);
}
