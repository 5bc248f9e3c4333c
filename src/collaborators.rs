// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interfaces to the host environment.
//!
//! The session controller drives these but never depends on how they are
//! implemented: a browser binding, the terminal host in `main.rs`, or the
//! recording fakes used by the tests.

use crate::db::Persistence;
use crate::models::{Coordinate, Workout, WorkoutKind};
use crate::services::validation::FormInput;
use chrono::{DateTime, Utc};

/// Animation options for moving the map view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanOptions {
    pub animate: bool,
    /// Seconds
    pub pan_duration: f64,
}

/// One-shot position lookup.
///
/// The outcome is delivered later, exactly once, as
/// `SessionEvent::PositionAcquired` or `SessionEvent::PositionUnavailable`.
pub trait Geolocation {
    fn request_current_position(&mut self);
}

/// Interactive map with a marker layer.
pub trait MapView {
    fn initialize(&mut self, center: Coordinate, zoom: u8);
    fn add_marker(&mut self, at: Coordinate, popup_content: &str, style_class: &str);
    fn set_view(&mut self, center: Coordinate, zoom: u8, options: PanOptions);
    /// Start forwarding map clicks as `SessionEvent::MapClicked`.
    fn subscribe_clicks(&mut self);
    fn clear_markers(&mut self);
}

/// Workout list.
pub trait ListRenderer {
    /// Render one entry carrying the workout identifier.
    fn render_entry(&mut self, workout: &Workout);
    fn clear(&mut self);
}

/// Input form for a new workout.
pub trait WorkoutForm {
    /// Current field values as typed.
    fn values(&self) -> FormInput;
    fn clear(&mut self);
    fn show(&mut self);
    fn hide(&mut self);
    /// Show the metric field that belongs to `kind` and hide the other one.
    fn show_metric_field(&mut self, kind: WorkoutKind);
}

/// User-visible notices.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Source of creation timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Everything a session talks to.
pub struct Collaborators {
    pub geolocation: Box<dyn Geolocation>,
    pub map: Box<dyn MapView>,
    pub list: Box<dyn ListRenderer>,
    pub form: Box<dyn WorkoutForm>,
    pub storage: Box<dyn Persistence>,
    pub notifier: Box<dyn Notifier>,
    pub clock: Box<dyn Clock>,
}
