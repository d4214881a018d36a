//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `MATCHLANE_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::TimeDelta;

use crate::constants::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_FALLBACK_MODEL, DEFAULT_FRESHNESS_HOURS,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_RESULTS, DEFAULT_MIN_COMPLETENESS,
    DEFAULT_OFFER_PAGE_SIZE, DEFAULT_PRIMARY_MODEL, MAX_COMPLETENESS,
};

/// Largest accepted freshness window (ten years).
pub const MAX_FRESHNESS_HOURS: u64 = 24 * 365 * 10;

/// Engine configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `MATCHLANE_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum age of a cached score record before it is recomputed. Default: `24`.
    pub freshness_hours: u64,

    /// Active offers considered per ranking request. Default: `50`.
    pub offer_page_size: usize,

    /// Minimum subject completeness for candidacy. Default: `30`.
    pub min_completeness: u8,

    /// Cap on ranked entries returned per request. Default: `20`.
    pub max_results: usize,

    /// Pair computations run concurrently within one request. Default: `8`.
    pub max_concurrency: usize,

    /// Share one computation between concurrent callers of the same pair. Default: `true`.
    pub dedupe_in_flight: bool,

    /// Max entries in the in-memory score store. Default: `100_000`.
    pub cache_capacity: u64,

    /// Model name used by the primary provider.
    pub primary_model: String,

    /// Model name used by the fallback provider.
    pub fallback_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            freshness_hours: DEFAULT_FRESHNESS_HOURS,
            offer_page_size: DEFAULT_OFFER_PAGE_SIZE,
            min_completeness: DEFAULT_MIN_COMPLETENESS,
            max_results: DEFAULT_MAX_RESULTS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            dedupe_in_flight: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            primary_model: DEFAULT_PRIMARY_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
        }
    }
}

impl Config {
    const ENV_FRESHNESS_HOURS: &'static str = "MATCHLANE_FRESHNESS_HOURS";
    const ENV_OFFER_PAGE_SIZE: &'static str = "MATCHLANE_OFFER_PAGE_SIZE";
    const ENV_MIN_COMPLETENESS: &'static str = "MATCHLANE_MIN_COMPLETENESS";
    const ENV_MAX_RESULTS: &'static str = "MATCHLANE_MAX_RESULTS";
    const ENV_MAX_CONCURRENCY: &'static str = "MATCHLANE_MAX_CONCURRENCY";
    const ENV_DEDUPE_IN_FLIGHT: &'static str = "MATCHLANE_DEDUPE_IN_FLIGHT";
    const ENV_CACHE_CAPACITY: &'static str = "MATCHLANE_CACHE_CAPACITY";
    const ENV_PRIMARY_MODEL: &'static str = "MATCHLANE_PRIMARY_MODEL";
    const ENV_FALLBACK_MODEL: &'static str = "MATCHLANE_FALLBACK_MODEL";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            freshness_hours: Self::parse_number_from_env(
                Self::ENV_FRESHNESS_HOURS,
                defaults.freshness_hours,
            )?,
            offer_page_size: Self::parse_number_from_env(
                Self::ENV_OFFER_PAGE_SIZE,
                defaults.offer_page_size,
            )?,
            min_completeness: Self::parse_number_from_env(
                Self::ENV_MIN_COMPLETENESS,
                defaults.min_completeness,
            )?,
            max_results: Self::parse_number_from_env(Self::ENV_MAX_RESULTS, defaults.max_results)?,
            max_concurrency: Self::parse_number_from_env(
                Self::ENV_MAX_CONCURRENCY,
                defaults.max_concurrency,
            )?,
            dedupe_in_flight: Self::parse_bool_from_env(
                Self::ENV_DEDUPE_IN_FLIGHT,
                defaults.dedupe_in_flight,
            ),
            cache_capacity: Self::parse_number_from_env(
                Self::ENV_CACHE_CAPACITY,
                defaults.cache_capacity,
            )?,
            primary_model: Self::parse_string_from_env(
                Self::ENV_PRIMARY_MODEL,
                defaults.primary_model,
            ),
            fallback_model: Self::parse_string_from_env(
                Self::ENV_FALLBACK_MODEL,
                defaults.fallback_model,
            ),
        })
    }

    /// Validates basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.freshness_hours > MAX_FRESHNESS_HOURS {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_FRESHNESS_HOURS,
                value: self.freshness_hours.to_string(),
                reason: "must not exceed ten years",
            });
        }

        Self::require_non_zero(Self::ENV_OFFER_PAGE_SIZE, self.offer_page_size as u64)?;
        Self::require_non_zero(Self::ENV_MAX_RESULTS, self.max_results as u64)?;
        Self::require_non_zero(Self::ENV_MAX_CONCURRENCY, self.max_concurrency as u64)?;
        Self::require_non_zero(Self::ENV_CACHE_CAPACITY, self.cache_capacity)?;

        if self.min_completeness > MAX_COMPLETENESS {
            return Err(ConfigError::OutOfRange {
                name: Self::ENV_MIN_COMPLETENESS,
                value: self.min_completeness.to_string(),
                reason: "must be between 0 and 100",
            });
        }

        if self.primary_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_PRIMARY_MODEL,
            });
        }
        if self.fallback_model.trim().is_empty() {
            return Err(ConfigError::EmptyValue {
                name: Self::ENV_FALLBACK_MODEL,
            });
        }

        Ok(())
    }

    /// Returns the freshness window as a signed time delta.
    ///
    /// Values beyond [`MAX_FRESHNESS_HOURS`] are rejected by [`Config::validate`]; an
    /// unvalidated out-of-range value saturates to the maximum representable delta.
    pub fn freshness_window(&self) -> TimeDelta {
        i64::try_from(self.freshness_hours)
            .ok()
            .and_then(TimeDelta::try_hours)
            .unwrap_or(TimeDelta::MAX)
    }

    /// Clamps a caller-supplied result limit to [`Config::max_results`].
    pub fn clamp_limit(&self, limit: usize) -> usize {
        limit.min(self.max_results)
    }

    fn require_non_zero(name: &'static str, value: u64) -> Result<(), ConfigError> {
        if value == 0 {
            return Err(ConfigError::OutOfRange {
                name,
                value: value.to_string(),
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        env::var(var_name)
            .map(|s| s != "false" && s != "0")
            .unwrap_or(default)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
