use std::env;

use grievance_autofill::cli::runtime::{apply_runtime_overrides, load_config};
use grievance_autofill::config::BASE_URL_ENV;
use grievance_autofill::Config;
use serial_test::serial;

#[test]
#[serial]
fn env_base_url_wins_over_file() {
    env::set_var(BASE_URL_ENV, "http://grievance.internal:9000/");
    let mut config = Config::default();
    apply_runtime_overrides(&mut config);
    env::remove_var(BASE_URL_ENV);

    assert_eq!(
        config.backend.write_urls(),
        vec![
            "http://grievance.internal:9000/api/update-grievance-status",
            "http://grievance.internal:9000/update-grievance-status",
        ]
    );
}

#[test]
#[serial]
fn blank_env_value_is_ignored() {
    env::set_var(BASE_URL_ENV, "   ");
    let mut config = Config::default();
    apply_runtime_overrides(&mut config);
    env::remove_var(BASE_URL_ENV);

    assert_eq!(config.backend.base_url, "http://localhost:5000");
}

#[tokio::test]
#[serial]
async fn shipped_config_matches_defaults() {
    let path = std::path::PathBuf::from("config/config.yaml");
    let loaded = load_config(Some(&path)).await.unwrap();
    assert_eq!(loaded.config, Config::default());
}
