use tempfile::tempdir;

use subtally_config::{Config, ConfigManager};

#[test]
fn default_config_has_sane_windows() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert!(!cfg.locale.is_empty());
    assert_eq!(cfg.upcoming_horizon_days, 7);
    assert_eq!(cfg.urgent_window_days, 2);
    assert!(!cfg.focus_mode);
    assert_eq!(cfg.projection_years, vec![5, 10]);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"));

    let mut cfg = Config::default();
    cfg.currency = "EUR".to_string();
    cfg.focus_mode = true;
    cfg.last_opened_tracker = Some("personal".into());

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "EUR");
    assert!(loaded.focus_mode);
    assert_eq!(loaded.last_opened_tracker.as_deref(), Some("personal"));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("absent.json"));

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded.currency, Config::default().currency);
}

#[test]
fn older_config_files_gain_defaulted_fields() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"locale":"en-GB","currency":"GBP"}"#).expect("write legacy");

    let manager = ConfigManager::new(path);
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.upcoming_horizon_days, 7);
    assert_eq!(loaded.projection_years, vec![5, 10]);
}
