// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory workout collection and its persisted form.

use crate::db::StorageError;
use crate::models::{Coordinate, KindInput, Workout};
use crate::render;
use chrono::{DateTime, Utc};
use geojson::{feature::Id, Feature, FeatureCollection, GeoJson, Geometry, JsonObject};

/// Identifiers keep the last ten digits of the creation time in milliseconds.
const ID_MODULUS: u64 = 10_000_000_000;

/// Issues workout identifiers from the wall clock.
///
/// A candidate that is not greater than the last issued (or restored) one is
/// bumped past it, wrapping to zero after ten nines.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis().max(0) as u64 % ID_MODULUS;
        let value = match self.last {
            Some(last) if candidate <= last => (last + 1) % ID_MODULUS,
            _ => candidate,
        };
        self.last = Some(value);
        format!("{value:010}")
    }

    /// Account for an identifier that was issued elsewhere.
    ///
    /// Identifiers that are not numbers below 10^10 cannot collide with
    /// generated ones and are skipped.
    pub fn observe(&mut self, id: &str) {
        if let Some(value) = id.parse::<u64>().ok().filter(|v| *v < ID_MODULUS) {
            self.last = Some(self.last.map_or(value, |last| last.max(value)));
        }
    }
}

/// Ordered collection of workouts, the unit of persistence.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    ids: IdGenerator,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a workout with a fresh identifier and append it.
    pub fn create(
        &mut self,
        input: KindInput,
        coords: Coordinate,
        distance: f64,
        duration: f64,
        now: DateTime<Utc>,
    ) -> &Workout {
        let mut id = self.ids.next(now);
        // Only reachable after the counter wrapped
        while self.find_by_id(&id).is_some() {
            id = self.ids.next(now);
        }
        let index = self.workouts.len();
        self.add(Workout::create(input, coords, distance, duration, id, now));
        &self.workouts[index]
    }

    /// Append a workout. No uniqueness check is made.
    pub fn add(&mut self, workout: Workout) {
        self.ids.observe(workout.id());
        self.workouts.push(workout);
    }

    /// All workouts in insertion order.
    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut Workout> {
        self.workouts.iter_mut().find(|w| w.id() == id)
    }

    /// Serialize the whole collection to a JSON array.
    pub fn serialize(&self) -> Result<String, StorageError> {
        serde_json::to_string(&self.workouts).map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Rebuild a store from a previously serialized collection.
    ///
    /// Absent or malformed data yields an empty store; this never fails.
    pub fn restore(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            tracing::debug!("No stored workouts");
            return Self::new();
        };

        match serde_json::from_str::<Vec<Workout>>(raw) {
            Ok(workouts) => {
                let mut store = Self::new();
                for workout in workouts {
                    store.add(workout);
                }
                tracing::info!(count = store.len(), "Restored workouts");
                store
            }
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed stored workouts");
                Self::new()
            }
        }
    }

    /// Export workouts as a GeoJSON FeatureCollection of points.
    pub fn to_geojson(&self) -> GeoJson {
        let features = self
            .workouts
            .iter()
            .map(|workout| {
                let point: geo::Point<f64> = workout.coords().into();
                let mut properties = JsonObject::new();
                properties.insert("type".to_string(), workout.kind().as_str().into());
                properties.insert("description".to_string(), workout.description().into());
                properties.insert("distance".to_string(), workout.distance().into());
                properties.insert("duration".to_string(), workout.duration().into());
                properties.insert("popup".to_string(), render::popup_content(workout).into());

                Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(geojson::Value::from(&point))),
                    id: Some(Id::String(workout.id().to_string())),
                    properties: Some(properties),
                    foreign_members: None,
                }
            })
            .collect();

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        })
    }
}
