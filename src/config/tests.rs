use super::*;
use serial_test::serial;
use std::env;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_matchlane_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("MATCHLANE_FRESHNESS_HOURS");
        env::remove_var("MATCHLANE_OFFER_PAGE_SIZE");
        env::remove_var("MATCHLANE_MIN_COMPLETENESS");
        env::remove_var("MATCHLANE_MAX_RESULTS");
        env::remove_var("MATCHLANE_MAX_CONCURRENCY");
        env::remove_var("MATCHLANE_DEDUPE_IN_FLIGHT");
        env::remove_var("MATCHLANE_CACHE_CAPACITY");
        env::remove_var("MATCHLANE_PRIMARY_MODEL");
        env::remove_var("MATCHLANE_FALLBACK_MODEL");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.freshness_hours, 24);
    assert_eq!(config.offer_page_size, 50);
    assert_eq!(config.min_completeness, 30);
    assert_eq!(config.max_results, 20);
    assert!(config.dedupe_in_flight);
    assert_eq!(config.primary_model, "gemini-1.5-flash");
    assert_eq!(config.fallback_model, "llama-3.3-70b-versatile");
    assert!(config.validate().is_ok());
}

#[test]
fn test_freshness_window_in_hours() {
    let config = Config {
        freshness_hours: 6,
        ..Default::default()
    };
    assert_eq!(config.freshness_window(), TimeDelta::hours(6));
}

#[test]
fn test_freshness_window_saturates_on_overflow() {
    let config = Config {
        freshness_hours: u64::MAX,
        ..Default::default()
    };
    assert_eq!(config.freshness_window(), TimeDelta::MAX);
}

#[test]
fn test_clamp_limit() {
    let config = Config::default();
    assert_eq!(config.clamp_limit(5), 5);
    assert_eq!(config.clamp_limit(20), 20);
    assert_eq!(config.clamp_limit(500), 20);
    assert_eq!(config.clamp_limit(0), 0);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_matchlane_env();

    let config = Config::from_env().expect("should parse with defaults");

    assert_eq!(config.freshness_hours, 24);
    assert_eq!(config.offer_page_size, 50);
    assert_eq!(config.max_concurrency, 8);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_matchlane_env();

    let config = with_env_vars(
        &[
            ("MATCHLANE_FRESHNESS_HOURS", "48"),
            ("MATCHLANE_OFFER_PAGE_SIZE", "10"),
            ("MATCHLANE_MIN_COMPLETENESS", "55"),
            ("MATCHLANE_MAX_RESULTS", " 7 "),
            ("MATCHLANE_DEDUPE_IN_FLIGHT", "false"),
            ("MATCHLANE_PRIMARY_MODEL", "gemini-2.0-flash"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.freshness_hours, 48);
    assert_eq!(config.offer_page_size, 10);
    assert_eq!(config.min_completeness, 55);
    assert_eq!(config.max_results, 7);
    assert!(!config.dedupe_in_flight);
    assert_eq!(config.primary_model, "gemini-2.0-flash");
    assert_eq!(config.fallback_model, "llama-3.3-70b-versatile");
}

#[test]
#[serial]
fn test_from_env_rejects_non_numeric() {
    clear_matchlane_env();

    let result = with_env_vars(&[("MATCHLANE_FRESHNESS_HOURS", "a day")], Config::from_env);

    match result {
        Err(ConfigError::InvalidNumber { name, value, .. }) => {
            assert_eq!(name, "MATCHLANE_FRESHNESS_HOURS");
            assert_eq!(value, "a day");
        }
        other => panic!("expected InvalidNumber, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_from_env_rejects_completeness_overflowing_u8() {
    clear_matchlane_env();

    let result = with_env_vars(&[("MATCHLANE_MIN_COMPLETENESS", "300")], Config::from_env);

    assert!(matches!(result, Err(ConfigError::InvalidNumber { .. })));
}

#[test]
#[serial]
fn test_from_env_blank_model_uses_default() {
    clear_matchlane_env();

    let config = with_env_vars(&[("MATCHLANE_FALLBACK_MODEL", "   ")], Config::from_env)
        .expect("should parse");

    assert_eq!(config.fallback_model, "llama-3.3-70b-versatile");
}

#[test]
fn test_validate_rejects_zero_page_size() {
    let config = Config {
        offer_page_size: 0,
        ..Default::default()
    };

    match config.validate() {
        Err(ConfigError::OutOfRange { name, .. }) => {
            assert_eq!(name, "MATCHLANE_OFFER_PAGE_SIZE")
        }
        other => panic!("expected OutOfRange, got {:?}", other),
    }
}

#[test]
fn test_validate_rejects_zero_concurrency_and_results() {
    let no_results = Config {
        max_results: 0,
        ..Default::default()
    };
    assert!(no_results.validate().is_err());

    let no_concurrency = Config {
        max_concurrency: 0,
        ..Default::default()
    };
    assert!(no_concurrency.validate().is_err());
}

#[test]
fn test_validate_rejects_completeness_above_100() {
    let config = Config {
        min_completeness: 101,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::OutOfRange { .. })
    ));
}

#[test]
fn test_validate_rejects_excessive_freshness() {
    let config = Config {
        freshness_hours: MAX_FRESHNESS_HOURS + 1,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_model() {
    let config = Config {
        primary_model: String::new(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyValue {
            name: "MATCHLANE_PRIMARY_MODEL"
        })
    ));
}

#[test]
fn test_error_display() {
    let err = ConfigError::OutOfRange {
        name: "MATCHLANE_MAX_RESULTS",
        value: "0".to_string(),
        reason: "must be greater than zero",
    };
    assert_eq!(
        err.to_string(),
        "invalid MATCHLANE_MAX_RESULTS='0': must be greater than zero"
    );
}
