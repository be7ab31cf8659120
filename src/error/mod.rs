mod api;
mod app;
mod config;
mod validation;

#[cfg(test)]
mod test_support;

pub use api::{ExportError, LoadError};
pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use validation::ValidationError;
