// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout record model.
//!
//! A workout is created once from validated form input and never changes
//! afterwards, apart from its interaction counter. The kind-specific derived
//! metric (pace for running, speed for cycling) is computed at construction
//! and stored alongside the inputs, so restored records carry exactly the
//! values they were created with.

use super::Coordinate;
use crate::time_utils::format_month_day;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Activity kind selected in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Capitalized name used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

/// Error for a kind name that is neither running nor cycling.
#[derive(Debug, thiserror::Error)]
#[error("Unknown workout kind: {0}")]
pub struct UnknownKind(pub String);

/// Kind-specific input used to create a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindInput {
    /// Cadence in steps per minute
    Running { cadence: u32 },
    /// Elevation gain in meters (negative for descent)
    Cycling { elevation_gain: f64 },
}

impl KindInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            KindInput::Running { .. } => WorkoutKind::Running,
            KindInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Kind-specific attributes, including the derived metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub enum WorkoutDetails {
    Running {
        /// Steps per minute
        cadence: u32,
        /// Minutes per kilometer
        pace: f64,
    },
    Cycling {
        /// Meters
        #[serde(rename = "elevationGain")]
        elevation_gain: f64,
        /// Kilometers per hour
        speed: f64,
    },
}

impl WorkoutDetails {
    /// Attach the derived metric to kind-specific input.
    ///
    /// Pace is minutes per kilometer, speed is kilometers per hour. Nothing
    /// is checked: a zero distance yields an infinite pace.
    pub fn from_input(input: KindInput, distance: f64, duration: f64) -> Self {
        match input {
            KindInput::Running { cadence } => WorkoutDetails::Running {
                cadence,
                pace: duration / distance,
            },
            KindInput::Cycling { elevation_gain } => WorkoutDetails::Cycling {
                elevation_gain,
                speed: distance / (duration / 60.0),
            },
        }
    }

    /// Pace for running, speed for cycling.
    pub fn derived_metric(&self) -> f64 {
        match self {
            WorkoutDetails::Running { pace, .. } => *pace,
            WorkoutDetails::Cycling { speed, .. } => *speed,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            WorkoutDetails::Running { .. } => WorkoutKind::Running,
            WorkoutDetails::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A single recorded workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "bindings/")
)]
pub struct Workout {
    id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    date: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "[number, number]"))]
    coords: Coordinate,
    /// Kilometers
    distance: f64,
    /// Minutes
    duration: f64,
    description: String,
    #[serde(default)]
    clicks: u32,
    #[serde(flatten)]
    details: WorkoutDetails,
}

impl Workout {
    /// Build a workout and compute its derived metric and description.
    ///
    /// No validation happens here: a zero distance yields an infinite pace.
    pub fn create(
        input: KindInput,
        coords: Coordinate,
        distance: f64,
        duration: f64,
        id: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let details = WorkoutDetails::from_input(input, distance, duration);

        Self {
            description: describe(input.kind(), created_at),
            id,
            date: created_at,
            coords,
            distance,
            duration,
            clicks: 0,
            details,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation timestamp
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn coords(&self) -> Coordinate {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// How many times the workout's list entry has been activated.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn details(&self) -> &WorkoutDetails {
        &self.details
    }

    pub fn kind(&self) -> WorkoutKind {
        self.details.kind()
    }

    /// Minutes per kilometer, for running workouts.
    pub fn pace(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Running { pace, .. } => Some(pace),
            WorkoutDetails::Cycling { .. } => None,
        }
    }

    /// Kilometers per hour, for cycling workouts.
    pub fn speed(&self) -> Option<f64> {
        match self.details {
            WorkoutDetails::Cycling { speed, .. } => Some(speed),
            WorkoutDetails::Running { .. } => None,
        }
    }

    /// Record one activation of the workout's list entry.
    pub fn register_click(&mut self) -> u32 {
        self.clicks = self.clicks.saturating_add(1);
        self.clicks
    }
}

/// "Running on April 14"
fn describe(kind: WorkoutKind, date: DateTime<Utc>) -> String {
    format!("{} on {}", kind.label(), format_month_day(date))
}
