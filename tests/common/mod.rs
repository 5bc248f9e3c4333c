// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recording fakes for every collaborator, plus a session harness.

use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::rc::Rc;
use workout_map::collaborators::{
    Clock, Collaborators, Geolocation, ListRenderer, MapView, Notifier, PanOptions, WorkoutForm,
};
use workout_map::config::Config;
use workout_map::db::{MemoryStorage, Persistence, StorageError};
use workout_map::models::{Coordinate, Workout, WorkoutKind};
use workout_map::services::{FormInput, SessionController, SessionEvent};

/// Where the fake geolocation puts the user.
#[allow(dead_code)]
pub const HOME: Coordinate = Coordinate {
    lat: 40.7128,
    lng: -74.0060,
};

/// Everything the collaborators were asked to do.
#[derive(Debug, Default)]
pub struct Recorded {
    pub position_requests: usize,
    pub map_initialized: Vec<(Coordinate, u8)>,
    pub click_subscriptions: usize,
    pub markers: Vec<(Coordinate, String, String)>,
    pub markers_cleared: usize,
    pub views: Vec<(Coordinate, u8, PanOptions)>,
    /// Identifiers of rendered list entries, in render order
    pub list_entries: Vec<String>,
    pub list_cleared: usize,
    pub form_shown: usize,
    pub form_hidden: usize,
    pub form_cleared: usize,
    pub metric_fields: Vec<WorkoutKind>,
    pub notices: Vec<String>,
}

pub type Recorder = Rc<RefCell<Recorded>>;

struct FakeGeolocation(Recorder);

impl Geolocation for FakeGeolocation {
    fn request_current_position(&mut self) {
        self.0.borrow_mut().position_requests += 1;
    }
}

struct FakeMap(Recorder);

impl MapView for FakeMap {
    fn initialize(&mut self, center: Coordinate, zoom: u8) {
        self.0.borrow_mut().map_initialized.push((center, zoom));
    }

    fn add_marker(&mut self, at: Coordinate, popup_content: &str, style_class: &str) {
        self.0
            .borrow_mut()
            .markers
            .push((at, popup_content.to_string(), style_class.to_string()));
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8, options: PanOptions) {
        self.0.borrow_mut().views.push((center, zoom, options));
    }

    fn subscribe_clicks(&mut self) {
        self.0.borrow_mut().click_subscriptions += 1;
    }

    fn clear_markers(&mut self) {
        let mut rec = self.0.borrow_mut();
        rec.markers.clear();
        rec.markers_cleared += 1;
    }
}

struct FakeList(Recorder);

impl ListRenderer for FakeList {
    fn render_entry(&mut self, workout: &Workout) {
        self.0.borrow_mut().list_entries.push(workout.id().to_string());
    }

    fn clear(&mut self) {
        let mut rec = self.0.borrow_mut();
        rec.list_entries.clear();
        rec.list_cleared += 1;
    }
}

struct FakeForm {
    rec: Recorder,
    values: Rc<RefCell<FormInput>>,
}

impl WorkoutForm for FakeForm {
    fn values(&self) -> FormInput {
        self.values.borrow().clone()
    }

    fn clear(&mut self) {
        let mut values = self.values.borrow_mut();
        *values = FormInput {
            kind: values.kind,
            ..FormInput::empty()
        };
        self.rec.borrow_mut().form_cleared += 1;
    }

    fn show(&mut self) {
        self.rec.borrow_mut().form_shown += 1;
    }

    fn hide(&mut self) {
        self.rec.borrow_mut().form_hidden += 1;
    }

    fn show_metric_field(&mut self, kind: WorkoutKind) {
        self.rec.borrow_mut().metric_fields.push(kind);
    }
}

struct FakeNotifier(Recorder);

impl Notifier for FakeNotifier {
    fn notify(&mut self, message: &str) {
        self.0.borrow_mut().notices.push(message.to_string());
    }
}

/// Always 2024-04-14 08:00 UTC.
pub struct FixedClock(pub DateTime<Utc>);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 4, 14, 8, 0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Memory storage the test keeps a handle to.
#[derive(Clone, Default)]
pub struct SharedStorage(pub Rc<RefCell<MemoryStorage>>);

impl SharedStorage {
    pub fn new(storage: MemoryStorage) -> Self {
        Self(Rc::new(RefCell::new(storage)))
    }

    #[allow(dead_code)]
    pub fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().read(key).expect("memory storage read")
    }
}

impl Persistence for SharedStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.borrow().read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().write(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().remove(key)
    }
}

/// Storage whose writes always fail.
#[allow(dead_code)]
pub struct ReadOnlyStorage;

impl Persistence for ReadOnlyStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("read-only".to_string()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io("read-only".to_string()))
    }
}

/// A session wired to recording fakes.
pub struct Harness {
    pub session: SessionController,
    pub rec: Recorder,
    pub form: Rc<RefCell<FormInput>>,
    pub storage: SharedStorage,
}

#[allow(dead_code)]
impl Harness {
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    pub fn with_storage(storage: MemoryStorage) -> Self {
        Self::build(Config::default(), SharedStorage::new(storage))
    }

    pub fn with_config(config: Config) -> Self {
        Self::build(config, SharedStorage::default())
    }

    pub fn build(config: Config, storage: SharedStorage) -> Self {
        Self::build_with(config, Box::new(storage.clone()), storage)
    }

    /// Session writing to `persistence`; `storage` is only kept for inspection.
    pub fn build_with(
        config: Config,
        persistence: Box<dyn Persistence>,
        storage: SharedStorage,
    ) -> Self {
        let rec = Recorder::default();
        let form = Rc::new(RefCell::new(FormInput::empty()));
        let collaborators = Collaborators {
            geolocation: Box::new(FakeGeolocation(rec.clone())),
            map: Box::new(FakeMap(rec.clone())),
            list: Box::new(FakeList(rec.clone())),
            form: Box::new(FakeForm {
                rec: rec.clone(),
                values: form.clone(),
            }),
            storage: persistence,
            notifier: Box::new(FakeNotifier(rec.clone())),
            clock: Box::new(FixedClock::default()),
        };

        Self {
            session: SessionController::new(config, collaborators),
            rec,
            form,
            storage,
        }
    }

    /// Start the session and deliver the position, so the map is ready.
    pub fn start_with_map(&mut self) {
        self.session.handle(SessionEvent::Startup).unwrap();
        self.session
            .handle(SessionEvent::PositionAcquired(HOME))
            .unwrap();
    }

    /// Type values into the form.
    pub fn fill(&self, kind: WorkoutKind, distance: &str, duration: &str, metric: &str) {
        let mut form = self.form.borrow_mut();
        form.kind = kind;
        form.distance = distance.to_string();
        form.duration = duration.to_string();
        match kind {
            WorkoutKind::Running => form.cadence = metric.to_string(),
            WorkoutKind::Cycling => form.elevation = metric.to_string(),
        }
    }

    /// Click, fill and submit; returns the new workout's identifier.
    pub fn add_workout(
        &mut self,
        at: Coordinate,
        kind: WorkoutKind,
        distance: &str,
        duration: &str,
        metric: &str,
    ) -> String {
        self.session.handle(SessionEvent::MapClicked(at)).unwrap();
        self.fill(kind, distance, duration, metric);
        self.session.submit_form().expect("valid workout")
    }
}
