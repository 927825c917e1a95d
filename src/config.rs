use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "MediGlove";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum readings fetched per dashboard request (newest first).
pub const HISTORY_WINDOW: usize = 2000;

/// Cadence of the scheduled dashboard refresh.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Storage and display layout for reading timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "mediglove=info,mediglove_lib=info"
}
