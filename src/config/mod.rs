//! Configuration loading and application.
mod apply;
mod loader;
pub mod types;


pub use apply::apply_config;
pub use loader::{DEFAULT_CONFIG_FILES, default_config_path, load_config};

#[cfg(test)]
pub(crate) use loader::load_config_file;
