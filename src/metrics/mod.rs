//! Per-frame metric series recorded across a whole simulation log.
mod types;


pub use types::{MetricsSeries, SeriesKind};
