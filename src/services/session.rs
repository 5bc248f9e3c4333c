// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Keeps the workout store, the map markers, the list and persisted storage
//! in step. Events are handled one at a time, in delivery order:
//! 1. Startup: restore stored workouts, render the list, request the position
//! 2. Position: initialize the map and draw a marker per restored workout
//! 3. Map click: remember the location and open the form
//! 4. Form submission: validate, create, render, persist
//! 5. List entry activation: pan the map to the workout
//! 6. Reset: drop stored workouts and start over

use crate::collaborators::{Collaborators, PanOptions};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{Coordinate, Workout, WorkoutKind};
use crate::render;
use crate::services::store::WorkoutStore;
use crate::services::validation::validate;

/// Events delivered by the host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Startup,
    PositionAcquired(Coordinate),
    PositionUnavailable(String),
    MapClicked(Coordinate),
    KindChanged(WorkoutKind),
    FormSubmitted,
    /// A list entry was activated; carries the entry's workout identifier.
    EntryActivated(String),
    Reset,
}

/// Interaction state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionState {
    Idle,
    /// A map click picked `pending` and the form is open.
    AwaitingFormSubmission { pending: Coordinate },
}

/// Progress of the one-shot geolocation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    NotRequested,
    Pending,
    /// The map is initialized.
    Ready,
    Unavailable,
}

/// Drives one user session.
pub struct SessionController {
    config: Config,
    store: WorkoutStore,
    state: SessionState,
    position: PositionStatus,
    collab: Collaborators,
}

impl SessionController {
    pub fn new(config: Config, collaborators: Collaborators) -> Self {
        Self {
            config,
            store: WorkoutStore::new(),
            state: SessionState::Idle,
            position: PositionStatus::NotRequested,
            collab: collaborators,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn position_status(&self) -> PositionStatus {
        self.position
    }

    pub fn is_map_ready(&self) -> bool {
        self.position == PositionStatus::Ready
    }

    /// Dispatch one event.
    ///
    /// Errors have already been reported to the user where appropriate; the
    /// session stays usable after any of them.
    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Startup => self.start(),
            SessionEvent::PositionAcquired(at) => self.on_position(at),
            SessionEvent::PositionUnavailable(reason) => self.on_position_unavailable(&reason),
            SessionEvent::MapClicked(at) => return self.on_map_click(at),
            SessionEvent::KindChanged(kind) => self.on_kind_change(kind),
            SessionEvent::FormSubmitted => {
                self.submit_form()?;
            }
            SessionEvent::EntryActivated(id) => {
                self.activate_entry(&id);
            }
            SessionEvent::Reset => self.reset(),
        }
        Ok(())
    }

    /// Restore stored workouts and request the current position.
    pub fn start(&mut self) {
        let raw = match self.collab.storage.read(&self.config.storage_key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored workouts");
                None
            }
        };
        self.store = WorkoutStore::restore(raw.as_deref());

        for workout in self.store.all() {
            self.collab.list.render_entry(workout);
        }

        self.position = PositionStatus::Pending;
        self.collab.geolocation.request_current_position();
        tracing::info!(restored = self.store.len(), "Session started");
    }

    /// Initialize the map once the position is known.
    pub fn on_position(&mut self, at: Coordinate) {
        if self.position != PositionStatus::Pending {
            tracing::debug!(status = ?self.position, "Ignoring unexpected position");
            return;
        }
        self.position = PositionStatus::Ready;

        self.collab.map.initialize(at, self.config.map_zoom);
        self.collab.map.subscribe_clicks();

        for workout in self.store.all() {
            render_marker(&mut self.collab, workout);
        }
        tracing::info!(position = %at, markers = self.store.len(), "Map loaded");
    }

    pub fn on_position_unavailable(&mut self, reason: &str) {
        if self.position != PositionStatus::Pending {
            tracing::debug!(status = ?self.position, "Ignoring unexpected position failure");
            return;
        }
        self.position = PositionStatus::Unavailable;
        self.report(&AppError::Geolocation(reason.to_string()));
    }

    /// Record a picked location. A later click replaces an earlier one.
    pub fn on_map_click(&mut self, at: Coordinate) -> Result<()> {
        if !self.is_map_ready() {
            return Err(AppError::MapUnavailable);
        }
        if !at.is_finite() {
            tracing::warn!(lat = at.lat, lng = at.lng, "Ignoring click with invalid coordinate");
            return Ok(());
        }

        match self.state {
            SessionState::Idle => {
                self.collab.form.show();
                tracing::debug!(position = %at, "Location picked");
            }
            SessionState::AwaitingFormSubmission { pending } => {
                tracing::debug!(previous = %pending, position = %at, "Location replaced");
            }
        }
        self.state = SessionState::AwaitingFormSubmission { pending: at };
        Ok(())
    }

    pub fn on_kind_change(&mut self, kind: WorkoutKind) {
        self.collab.form.show_metric_field(kind);
    }

    /// Validate the form and create a workout at the picked location.
    ///
    /// On rejection nothing changes: the picked location stays pending so the
    /// user can correct the form and submit again.
    pub fn submit_form(&mut self) -> Result<String> {
        let SessionState::AwaitingFormSubmission { pending } = self.state else {
            let err = AppError::NoPendingSelection;
            self.report(&err);
            return Err(err);
        };

        let values = self.collab.form.values();
        let input = match validate(&values, &self.config.validation) {
            Ok(input) => input,
            Err(e) => {
                let err = AppError::from(e);
                self.report(&err);
                return Err(err);
            }
        };

        let now = self.collab.clock.now();
        let workout = self
            .store
            .create(input.metric, pending, input.distance, input.duration, now)
            .clone();

        render_marker(&mut self.collab, &workout);
        self.collab.list.render_entry(&workout);

        if let Err(e) = self.persist() {
            self.report(&e);
        }

        self.collab.form.clear();
        self.collab.form.hide();
        self.state = SessionState::Idle;

        tracing::info!(
            id = workout.id(),
            kind = %workout.kind(),
            distance = workout.distance(),
            duration = workout.duration(),
            "Workout created"
        );
        Ok(workout.id().to_string())
    }

    /// Pan the map to the workout behind an activated list entry.
    ///
    /// Returns `false` (and does nothing) for an unknown identifier or
    /// before the map exists.
    pub fn activate_entry(&mut self, id: &str) -> bool {
        if !self.is_map_ready() {
            tracing::debug!(id, "Ignoring list entry activation without a map");
            return false;
        }
        let Some(workout) = self.store.find_by_id_mut(id) else {
            tracing::debug!(id, "Ignoring activation of unknown workout");
            return false;
        };

        let clicks = workout.register_click();
        let center = workout.coords();
        self.collab.map.set_view(
            center,
            self.config.map_zoom,
            PanOptions {
                animate: true,
                pan_duration: self.config.pan_duration_secs,
            },
        );
        tracing::debug!(id, clicks, "Moved to workout");

        if let Err(e) = self.persist() {
            self.report(&e);
        }
        true
    }

    /// Forget every stored workout and start again from a cold session.
    pub fn reset(&mut self) {
        if let Err(e) = self.collab.storage.remove(&self.config.storage_key) {
            self.report(&AppError::from(e));
        }

        self.store = WorkoutStore::new();
        self.state = SessionState::Idle;
        self.position = PositionStatus::NotRequested;

        self.collab.list.clear();
        self.collab.map.clear_markers();
        self.collab.form.clear();
        self.collab.form.hide();
        tracing::info!("Session reset");

        self.start();
    }

    /// Write the whole collection, replacing what was stored.
    fn persist(&mut self) -> Result<()> {
        let data = self.store.serialize()?;
        self.collab
            .storage
            .write(&self.config.storage_key, &data)?;
        tracing::debug!(count = self.store.len(), "Workouts saved");
        Ok(())
    }

    fn report(&mut self, err: &AppError) {
        if err.is_validation_error() {
            tracing::debug!(error = %err, "Form submission rejected");
        } else {
            tracing::warn!(error = %err, "Session error");
        }
        self.collab.notifier.notify(&err.user_message());
    }
}

fn render_marker(collab: &mut Collaborators, workout: &Workout) {
    collab.map.add_marker(
        workout.coords(),
        &render::popup_content(workout),
        &render::popup_class(workout.kind()),
    );
}
