// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTML fragments for the workout list and map marker popups.

use crate::collaborators::ListRenderer;
use crate::models::{Workout, WorkoutDetails, WorkoutKind};

/// Marker popup text, e.g. "🏃‍♂️ Running on April 14".
pub fn popup_content(workout: &Workout) -> String {
    format!("{} {}", workout.kind().icon(), workout.description())
}

/// CSS class applied to a marker popup.
pub fn popup_class(kind: WorkoutKind) -> String {
    format!("{}-popup", kind.as_str())
}

/// List entry for one workout. The `data-id` attribute carries the workout
/// identifier so an activated entry can be mapped back to its record.
pub fn list_entry(workout: &Workout) -> String {
    let kind = workout.kind();
    let mut html = format!(
        r#"<li class="workout workout--{kind}" data-id="{id}">
  <h2 class="workout__title">{title}</h2>
"#,
        kind = kind.as_str(),
        id = escape(workout.id()),
        title = escape(workout.description()),
    );

    html.push_str(&detail(kind.icon(), &format_number(workout.distance()), "km"));
    html.push_str(&detail("⏱", &format_number(workout.duration()), "min"));

    match workout.details() {
        WorkoutDetails::Running { cadence, pace } => {
            html.push_str(&detail("⚡️", &format!("{pace:.1}"), "min/km"));
            html.push_str(&detail("🦶🏼", &cadence.to_string(), "spm"));
        }
        WorkoutDetails::Cycling {
            elevation_gain,
            speed,
        } => {
            html.push_str(&detail("⚡️", &format!("{speed:.1}"), "km/h"));
            html.push_str(&detail("⛰", &format_number(*elevation_gain), "m"));
        }
    }

    html.push_str("</li>\n");
    html
}

fn detail(icon: &str, value: &str, unit: &str) -> String {
    format!(
        r#"  <div class="workout__details">
    <span class="workout__icon">{icon}</span>
    <span class="workout__value">{value}</span>
    <span class="workout__unit">{unit}</span>
  </div>
"#
    )
}

/// Whole numbers without a trailing ".0", everything else as typed.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// List renderer that keeps rendered fragments in order.
#[derive(Debug, Default, Clone)]
pub struct HtmlListRenderer {
    entries: Vec<String>,
}

impl HtmlListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The list as shown: newest entry first.
    pub fn to_html(&self) -> String {
        let mut html = String::from("<ul class=\"workouts\">\n");
        for entry in self.entries.iter().rev() {
            html.push_str(entry);
        }
        html.push_str("</ul>\n");
        html
    }
}

impl ListRenderer for HtmlListRenderer {
    fn render_entry(&mut self, workout: &Workout) {
        self.entries.push(list_entry(workout));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
