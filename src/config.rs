// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use crate::db::is_valid_key;
use crate::models::Coordinate;
use crate::services::validation::ValidationRules;
use std::env;
use std::path::PathBuf;

/// Storage key under which the whole workout collection is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "workouts";
/// Zoom level used for the initial map view and when panning to a workout.
pub const DEFAULT_MAP_ZOOM: u8 = 13;
/// Pan animation length in seconds.
pub const DEFAULT_PAN_DURATION_SECS: f64 = 1.0;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key used with the persistence collaborator
    pub storage_key: String,
    /// Directory for file-backed storage
    pub data_dir: PathBuf,
    /// Map zoom level
    pub map_zoom: u8,
    /// Pan animation duration (seconds)
    pub pan_duration_secs: f64,
    /// Form validation rules
    pub validation: ValidationRules,
    /// Fixed position reported by the terminal geolocation (none = unavailable)
    pub home_position: Option<Coordinate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(".workout-map"),
            map_zoom: DEFAULT_MAP_ZOOM,
            pan_duration_secs: DEFAULT_PAN_DURATION_SECS,
            validation: ValidationRules::default(),
            home_position: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Self::default();

        let storage_key = env::var("WORKOUT_STORAGE_KEY")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.storage_key);
        if !is_valid_key(&storage_key) {
            return Err(ConfigError::Invalid {
                name: "WORKOUT_STORAGE_KEY",
                value: storage_key,
            });
        }

        let home_position = match (env::var("HOME_LAT"), env::var("HOME_LNG")) {
            (Ok(lat), Ok(lng)) => Some(Coordinate::new(
                parse_in_range("HOME_LAT", &lat, -90.0, 90.0)?,
                parse_in_range("HOME_LNG", &lng, -180.0, 180.0)?,
            )),
            (Err(_), Err(_)) => None,
            (Ok(_), Err(_)) => return Err(ConfigError::Missing("HOME_LNG")),
            (Err(_), Ok(_)) => return Err(ConfigError::Missing("HOME_LAT")),
        };

        Ok(Self {
            storage_key,
            data_dir: env::var("WORKOUT_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            map_zoom: optional_var("MAP_ZOOM")?.unwrap_or(defaults.map_zoom),
            pan_duration_secs: match env::var("MAP_PAN_DURATION_SECS") {
                Ok(value) => parse_in_range("MAP_PAN_DURATION_SECS", &value, 0.0, f64::MAX)?,
                Err(_) => defaults.pan_duration_secs,
            },
            validation: ValidationRules {
                require_positive_elevation: optional_var("REQUIRE_POSITIVE_ELEVATION")?
                    .unwrap_or(defaults.validation.require_positive_elevation),
                ..defaults.validation
            },
            home_position,
        })
    }
}

fn optional_var<T: std::str::FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(value) => parse_var(name, &value).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Parse a number that must be finite and within `min..=max`.
fn parse_in_range(name: &'static str, value: &str, min: f64, max: f64) -> Result<f64, ConfigError> {
    let parsed: f64 = parse_var(name, value)?;
    if parsed.is_finite() && (min..=max).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
