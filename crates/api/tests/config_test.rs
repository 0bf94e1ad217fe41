use std::collections::HashMap;

use chrono::{NaiveTime, Weekday};
use pretty_assertions::assert_eq;
use standby_api::config::ApiConfig;
use standby_core::rotation::RotationPolicy;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config =
        ApiConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/standby")]))
            .unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.rotation, RotationPolicy::default());
}

#[test]
fn test_missing_database_url() {
    assert!(ApiConfig::from_lookup(lookup(&[])).is_err());
}

#[test]
fn test_rotation_overrides() {
    let config = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/standby"),
        ("STANDBY_TIMEZONE", "America/Vancouver"),
        ("STANDBY_HANDOVER_DAY", "Mon"),
        ("STANDBY_SHIFT_START", "17:30"),
        ("API_CORS_ORIGINS", "http://a.test, http://b.test"),
    ]))
    .unwrap();

    assert_eq!(config.rotation.timezone, chrono_tz::America::Vancouver);
    assert_eq!(config.rotation.handover_day, Weekday::Mon);
    assert_eq!(config.rotation.shift_start, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
}

#[test]
fn test_invalid_timezone() {
    let result = ApiConfig::from_lookup(lookup(&[
        ("DATABASE_URL", "postgres://localhost/standby"),
        ("STANDBY_TIMEZONE", "Mars/Olympus"),
    ]));

    assert!(result.is_err());
}
