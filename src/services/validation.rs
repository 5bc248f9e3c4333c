// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout form parsing and validation.

use crate::models::{KindInput, WorkoutDetails, WorkoutKind};

/// Raw form field values, exactly as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct FormInput {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

impl FormInput {
    /// Empty form with the running kind selected.
    pub fn empty() -> Self {
        Self {
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation: String::new(),
        }
    }
}

impl Default for FormInput {
    fn default() -> Self {
        Self::empty()
    }
}

/// Positivity rules for the kind-specific metric.
///
/// Distance and duration must always be positive. By default cadence must be
/// positive while elevation gain is only required to be a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationRules {
    pub require_positive_cadence: bool,
    pub require_positive_elevation: bool,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            require_positive_cadence: true,
            require_positive_elevation: false,
        }
    }
}

/// Parsed, validated workout input ready for record creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub distance: f64,
    pub duration: f64,
    pub metric: KindInput,
}

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} is not a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be positive")]
    NotPositive { field: &'static str },

    #[error("{field} must be a whole number")]
    NotWholeNumber { field: &'static str },

    /// The inputs are individually valid but the derived pace or speed is not finite.
    #[error("{field} is out of range")]
    OutOfRange { field: &'static str },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotANumber { field }
            | ValidationError::NotPositive { field }
            | ValidationError::NotWholeNumber { field }
            | ValidationError::OutOfRange { field } => field,
        }
    }
}

/// Parse and validate the form fields relevant to the selected kind.
///
/// Only the metric field of the selected kind is read; the other one may
/// hold anything.
pub fn validate(input: &FormInput, rules: &ValidationRules) -> Result<WorkoutInput, ValidationError> {
    let distance = parse_finite("distance", &input.distance)?;
    let duration = parse_finite("duration", &input.duration)?;
    ensure_positive("distance", distance)?;
    ensure_positive("duration", duration)?;

    let metric = match input.kind {
        WorkoutKind::Running => {
            let cadence = parse_finite("cadence", &input.cadence)?;
            // Cadence is a step count, so it can never go below zero
            if cadence < 0.0 || (rules.require_positive_cadence && cadence == 0.0) {
                return Err(ValidationError::NotPositive { field: "cadence" });
            }
            if cadence.fract() != 0.0 || cadence > f64::from(u32::MAX) {
                return Err(ValidationError::NotWholeNumber { field: "cadence" });
            }
            KindInput::Running {
                cadence: cadence as u32,
            }
        }
        WorkoutKind::Cycling => {
            let elevation_gain = parse_finite("elevation", &input.elevation)?;
            if rules.require_positive_elevation && elevation_gain <= 0.0 {
                return Err(ValidationError::NotPositive { field: "elevation" });
            }
            KindInput::Cycling { elevation_gain }
        }
    };

    // Extreme ratios overflow, and a non-finite value cannot be stored
    if !WorkoutDetails::from_input(metric, distance, duration)
        .derived_metric()
        .is_finite()
    {
        let field = match input.kind {
            WorkoutKind::Running => "pace",
            WorkoutKind::Cycling => "speed",
        };
        return Err(ValidationError::OutOfRange { field });
    }

    Ok(WorkoutInput {
        distance,
        duration,
        metric,
    })
}

/// Parse a field, rejecting blanks and the non-finite spellings `f64` accepts.
fn parse_finite(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotANumber { field })
}

fn ensure_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NotPositive { field })
    }
}
