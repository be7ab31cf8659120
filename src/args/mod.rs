//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
mod test_support;

pub use cli::ReplayArgs;

pub(crate) use defaults::DEFAULT_SERVER_URL;
#[cfg(test)]
pub(crate) use defaults::default_tmp_path;
#[cfg(test)]
pub(crate) use test_support::parse_test_args;
