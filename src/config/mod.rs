//! Command line and environment configuration of the batch binary.

mod settings;
#[cfg(test)]
mod tests;

pub use settings::{LogLevel, Report, Settings};
