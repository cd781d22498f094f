//! Configuration for the demo binaries.

mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;
