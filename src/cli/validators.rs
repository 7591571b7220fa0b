//! CLI argument validators.

use crate::constants::MAX_INTRA_THREADS;

/// Parse an unsigned integer within `min..=max`.
fn parse_bounded<T>(s: &str, min: T, max: T, name: &str) -> Result<T, String>
where
    T: std::str::FromStr + PartialOrd + std::fmt::Display + Copy,
{
    let value: T = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid whole number"))?;

    if value < min || value > max {
        return Err(format!("{name} must be between {min} and {max}, got {value}"));
    }

    Ok(value)
}

/// Parse intra-op thread count (0 keeps the runtime default).
pub fn parse_threads(s: &str) -> Result<usize, String> {
    parse_bounded(s, 0, MAX_INTRA_THREADS, "threads")
}

/// Parse a network timeout in whole seconds.
pub fn parse_timeout_secs(s: &str) -> Result<u64, String> {
    parse_bounded(s, 1, 600, "timeout")
}
