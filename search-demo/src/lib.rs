//! # Search Demo
//!
//! Library behind the `product` and `subject` binaries. Each binary builds a
//! client from the environment and runs the same flow over its own document
//! type: ensure the index, write the sample documents, optionally read one
//! back by id, then search by keyword.

pub mod catalog;
pub mod config;
pub mod demo;
pub mod telemetry;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur while configuring or running a demo.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] search_client_repository::SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DemoError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
