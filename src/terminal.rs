// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Terminal host: line commands on stdin stand in for map clicks, form
//! input and list selection.

use crate::collaborators::{Geolocation, ListRenderer, MapView, Notifier, PanOptions, WorkoutForm};
use crate::models::{Coordinate, UnknownKind, Workout, WorkoutKind};
use crate::render::HtmlListRenderer;
use crate::services::{FormInput, SessionController, SessionEvent};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::sync::mpsc::UnboundedSender;

pub const HELP: &str = "\
Commands:
  click <lat> <lng>                      pick a location on the map
  kind running|cycling                   switch the form's workout kind
  submit <distance> <duration> <metric>  submit the form (metric = cadence or elevation)
  select <id>                            move the map to a workout
  list                                   print the workout list
  geojson                                print workouts as GeoJSON
  reset                                  delete all workouts
  quit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Click(Coordinate),
    Kind(WorkoutKind),
    Submit {
        distance: String,
        duration: String,
        metric: String,
    },
    Select(String),
    List,
    GeoJson,
    Reset,
    Help,
    Quit,
}

/// Errors from parsing an input line.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error(transparent)]
    Kind(#[from] UnknownKind),
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = parts.collect();

    let command = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("click", [lat, lng]) => {
            let lat: f64 = lat
                .parse()
                .map_err(|_| CommandError::InvalidCoordinate(lat.to_string()))?;
            let lng: f64 = lng
                .parse()
                .map_err(|_| CommandError::InvalidCoordinate(lng.to_string()))?;
            Command::Click(Coordinate::new(lat, lng))
        }
        ("click", _) => return Err(CommandError::Usage("click <lat> <lng>")),
        ("kind", [kind]) => Command::Kind(kind.parse()?),
        ("kind", _) => return Err(CommandError::Usage("kind running|cycling")),
        // Numbers stay raw; the form validation decides what they mean
        ("submit", [distance, duration, metric]) => Command::Submit {
            distance: distance.to_string(),
            duration: duration.to_string(),
            metric: metric.to_string(),
        },
        ("submit", _) => {
            return Err(CommandError::Usage("submit <distance> <duration> <metric>"))
        }
        ("select", [id]) => Command::Select(id.to_string()),
        ("select", _) => return Err(CommandError::Usage("select <id>")),
        ("list", []) => Command::List,
        ("geojson", []) => Command::GeoJson,
        ("reset", []) => Command::Reset,
        ("help", _) => Command::Help,
        ("quit" | "exit", _) => Command::Quit,
        _ => return Err(CommandError::Unknown(line.trim().to_string())),
    };
    Ok(Some(command))
}

/// Form backed by shared field state the host fills in before submitting.
#[derive(Debug, Clone, Default)]
pub struct TerminalForm {
    fields: Rc<RefCell<FormInput>>,
    visible: Rc<RefCell<bool>>,
}

impl TerminalForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        *self.visible.borrow()
    }

    pub fn kind(&self) -> WorkoutKind {
        self.fields.borrow().kind
    }

    pub fn set_kind(&self, kind: WorkoutKind) {
        self.fields.borrow_mut().kind = kind;
    }

    /// Type the numbers into the fields; `metric` lands in the field of the
    /// selected kind.
    pub fn fill(&self, distance: &str, duration: &str, metric: &str) {
        let mut fields = self.fields.borrow_mut();
        fields.distance = distance.to_string();
        fields.duration = duration.to_string();
        match fields.kind {
            WorkoutKind::Running => fields.cadence = metric.to_string(),
            WorkoutKind::Cycling => fields.elevation = metric.to_string(),
        }
    }
}

impl WorkoutForm for TerminalForm {
    fn values(&self) -> FormInput {
        self.fields.borrow().clone()
    }

    fn clear(&mut self) {
        let mut fields = self.fields.borrow_mut();
        *fields = FormInput {
            kind: fields.kind,
            ..FormInput::empty()
        };
    }

    fn show(&mut self) {
        *self.visible.borrow_mut() = true;
        println!("Form open ({}). Use `submit <distance> <duration> <metric>`", self.kind());
    }

    fn hide(&mut self) {
        *self.visible.borrow_mut() = false;
    }

    fn show_metric_field(&mut self, kind: WorkoutKind) {
        let field = match kind {
            WorkoutKind::Running => "cadence (spm)",
            WorkoutKind::Cycling => "elevation gain (m)",
        };
        println!("Metric field: {field}");
    }
}

/// List renderer shared between the session and the `list` command.
#[derive(Debug, Clone, Default)]
pub struct SharedList(Rc<RefCell<HtmlListRenderer>>);

impl SharedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_html(&self) -> String {
        self.0.borrow().to_html()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ListRenderer for SharedList {
    fn render_entry(&mut self, workout: &Workout) {
        self.0.borrow_mut().render_entry(workout);
    }

    fn clear(&mut self) {
        self.0.borrow_mut().clear();
    }
}

/// Map that describes what it would draw.
#[derive(Debug, Default)]
pub struct TerminalMap {
    markers: usize,
}

impl MapView for TerminalMap {
    fn initialize(&mut self, center: Coordinate, zoom: u8) {
        println!("Map centered on {center} (zoom {zoom})");
    }

    fn add_marker(&mut self, at: Coordinate, popup_content: &str, style_class: &str) {
        self.markers += 1;
        println!(
            "Marker {} at {at}: {popup_content} [{style_class}]",
            self.markers
        );
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8, options: PanOptions) {
        println!(
            "Map moved to {center} (zoom {zoom}, {:.1}s pan)",
            if options.animate { options.pan_duration } else { 0.0 }
        );
    }

    fn subscribe_clicks(&mut self) {
        println!("Use `click <lat> <lng>` to pick a location");
    }

    fn clear_markers(&mut self) {
        self.markers = 0;
        println!("Markers cleared");
    }
}

/// Geolocation that reports a configured position, if any.
///
/// The outcome is sent on the event channel from a spawned task, so it
/// arrives after the current event has been handled.
pub struct TerminalGeolocation {
    position: Option<Coordinate>,
    events: UnboundedSender<SessionEvent>,
}

impl TerminalGeolocation {
    pub fn new(position: Option<Coordinate>, events: UnboundedSender<SessionEvent>) -> Self {
        Self { position, events }
    }
}

impl Geolocation for TerminalGeolocation {
    fn request_current_position(&mut self) {
        let event = match self.position {
            Some(at) => SessionEvent::PositionAcquired(at),
            None => SessionEvent::PositionUnavailable("HOME_LAT/HOME_LNG not set".to_string()),
        };
        let events = self.events.clone();
        tokio::spawn(async move {
            if events.send(event).is_err() {
                tracing::debug!("Session ended before position was delivered");
            }
        });
    }
}

/// Prints notices to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, message: &str) {
        println!("! {message}");
    }
}

/// Applies parsed commands to a session.
pub struct TerminalHost {
    session: SessionController,
    form: TerminalForm,
    list: SharedList,
}

impl TerminalHost {
    pub fn new(session: SessionController, form: TerminalForm, list: SharedList) -> Self {
        Self {
            session,
            form,
            list,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    /// Deliver a session event, logging (already reported) errors.
    pub fn dispatch(&mut self, event: SessionEvent) {
        if let Err(e) = self.session.handle(event) {
            tracing::debug!(error = %e, "Event not applied");
        }
    }

    /// Run one command. Returns `false` when the host should stop.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Click(at) => {
                if let Err(e) = self.session.handle(SessionEvent::MapClicked(at)) {
                    println!("! {}", e.user_message());
                }
            }
            Command::Kind(kind) => {
                self.form.set_kind(kind);
                self.dispatch(SessionEvent::KindChanged(kind));
            }
            Command::Submit {
                distance,
                duration,
                metric,
            } => {
                self.form.fill(&distance, &duration, &metric);
                self.dispatch(SessionEvent::FormSubmitted);
            }
            Command::Select(id) => self.dispatch(SessionEvent::EntryActivated(id)),
            Command::List => print!("{}", self.list.to_html()),
            Command::GeoJson => println!("{}", self.session.store().to_geojson()),
            Command::Reset => self.dispatch(SessionEvent::Reset),
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }
}
