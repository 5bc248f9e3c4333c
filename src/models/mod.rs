// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod coordinate;
pub mod workout;

pub use coordinate::Coordinate;
pub use workout::{KindInput, UnknownKind, Workout, WorkoutDetails, WorkoutKind};
