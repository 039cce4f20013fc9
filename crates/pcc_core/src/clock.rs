//! Local wall-clock formatting.

use chrono::Local;

/// Current local time as `HH:MM:SS`.
pub fn time_of_day() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Current local time as an ISO-8601 string without offset,
/// e.g. `2026-10-18T14:03:07.120398`.
pub fn iso_now() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}
