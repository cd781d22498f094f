//! Tracing subscriber setup for the binaries.

use std::env;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); `LOG_FORMAT=json` switches
/// to one JSON object per event. Logs go to stderr so stdout carries only the
/// demo's status lines.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if wants_json(env::var("LOG_FORMAT").ok().as_deref()) {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn wants_json(format: Option<&str>) -> bool {
    format.is_some_and(|f| f.eq_ignore_ascii_case("json"))
}
