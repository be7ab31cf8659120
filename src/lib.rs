//! Core library for the `wildfire-replay` CLI.
//!
//! The binary replays wildfire simulation logs that a backend renders frame
//! by frame. This crate holds the pieces it is built from: the backend
//! client, the playback controller, metric charts, export downloads and the
//! terminal dashboard. Library APIs may change along with the CLI.
pub mod api;
pub mod app;
pub mod args;
pub mod charts;
pub mod color;
pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod export;
pub mod logger;
pub mod metrics;
pub mod playback;
pub mod shutdown;
pub mod ui;
pub mod view;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
