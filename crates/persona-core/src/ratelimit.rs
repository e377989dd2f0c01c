//! Back-off hints from rate-limited HTTP responses.

/// Used when no header carries a usable value.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Seconds to wait, from header values in priority order.
///
/// Each value is a number of seconds, possibly fractional (Reddit's
/// `x-ratelimit-reset` is); fractions round up. Missing, unparsable and
/// negative values are skipped.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn retry_after_secs<'a, I>(candidates: I) -> u64
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .filter_map(|value| value.trim().parse::<f64>().ok())
        .find(|secs| secs.is_finite() && *secs >= 0.0)
        .map_or(DEFAULT_RETRY_AFTER_SECS, |secs| secs.ceil() as u64)
}
