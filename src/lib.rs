// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout map: log runs and rides by picking their location on a map.
//!
//! This crate provides the workout model, the persisted workout store and the
//! session controller that keeps map markers, the workout list and storage in
//! step. Host environments plug in through the traits in [`collaborators`].

pub mod collaborators;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod terminal;
pub mod time_utils;
