// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session logic layer.

pub mod session;
pub mod store;
pub mod validation;

pub use session::{PositionStatus, SessionController, SessionEvent, SessionState};
pub use store::{IdGenerator, WorkoutStore};
pub use validation::{FormInput, ValidationError, ValidationRules, WorkoutInput};
