// tests/infra_test.rs

use std::collections::HashMap;
use std::time::Duration;

use holdem_table::infra::config::{
    ConfigError, RemoteConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, ENV_API_KEY, ENV_ENDPOINT,
    ENV_MODEL, ENV_TIMEOUT_SECS,
};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn missing_key_disables_remote() {
    assert_eq!(
        RemoteConfig::from_lookup(lookup(&[])),
        Err(ConfigError::MissingApiKey(ENV_API_KEY))
    );
    assert_eq!(
        RemoteConfig::from_lookup(lookup(&[(ENV_API_KEY, "   ")])),
        Err(ConfigError::MissingApiKey(ENV_API_KEY))
    );
}

#[test]
fn defaults_are_applied() {
    let cfg = RemoteConfig::from_lookup(lookup(&[(ENV_API_KEY, "secret")])).unwrap();

    assert_eq!(cfg.api_key, "secret");
    assert_eq!(cfg.model, DEFAULT_MODEL);
    assert_eq!(cfg.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert!(cfg.endpoint.ends_with(&format!("models/{DEFAULT_MODEL}:generateContent")));
    assert_eq!(cfg, RemoteConfig::new("secret"));
}

#[test]
fn overrides_are_read() {
    let cfg = RemoteConfig::from_lookup(lookup(&[
        (ENV_API_KEY, "k"),
        (ENV_MODEL, "gemini-pro"),
        (ENV_TIMEOUT_SECS, "5"),
    ]))
    .unwrap();
    assert_eq!(cfg.model, "gemini-pro");
    assert!(cfg.endpoint.contains("models/gemini-pro:generateContent"));
    assert_eq!(cfg.timeout, Duration::from_secs(5));

    let cfg = RemoteConfig::from_lookup(lookup(&[
        (ENV_API_KEY, "k"),
        (ENV_ENDPOINT, "http://127.0.0.1:9000/generate"),
    ]))
    .unwrap();
    assert_eq!(cfg.endpoint, "http://127.0.0.1:9000/generate");
}

#[test]
fn bad_timeout_is_rejected() {
    for raw in ["abc", "0", "-3"] {
        let err = RemoteConfig::from_lookup(lookup(&[(ENV_API_KEY, "k"), (ENV_TIMEOUT_SECS, raw)]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                name: ENV_TIMEOUT_SECS,
                value: raw.to_string(),
            }
        );
    }
}
