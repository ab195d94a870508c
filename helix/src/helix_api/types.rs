//! Shared value transformations used across the Helix records.

use jiff::Timestamp;
use std::future::Future;
use std::pin::Pin;

/// A boxed, `Send` future resolving to an [`eyre::Result`].
///
/// This is the return type of every [`HelixTransport`](super::client::HelixTransport) method so
/// that the trait stays object safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = eyre::Result<T>> + Send + 'a>>;

/// Parses a Helix timestamp string into a [`Timestamp`].
///
/// Helix is not consistent about its timestamp format. This accepts:
///
/// - fractional seconds of any precision, which are truncated to the whole second,
/// - a trailing `Z`, a numeric offset, or no zone at all (read as UTC),
/// - either `T` or a space between the date and the time of day,
/// - a bare date, read as midnight UTC,
/// - the `2019-04-12 22:04:02.637 +0000 UTC` form used by the teams endpoints.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, jiff::Error> {
    let raw = raw.trim();
    let (date, rest) = match raw.find(['T', 't', ' ']) {
        Some(at) => (&raw[..at], &raw[at + 1..]),
        None => (raw, "00:00:00"),
    };

    let rest = rest.trim_end_matches(" UTC");
    let zone_at = rest.find(['Z', 'z', '+', '-']).unwrap_or(rest.len());
    let (clock, zone) = rest.split_at(zone_at);
    let clock = clock.split_once('.').map_or(clock, |(whole, _)| whole).trim();
    let zone = match zone.trim() {
        "" | "z" => "Z".to_owned(),
        // +HHMM
        zone if zone.len() == 5 && zone[1..].bytes().all(|b| b.is_ascii_digit()) => {
            format!("{}:{}", &zone[..3], &zone[3..])
        }
        zone => zone.to_owned(),
    };

    format!("{date}T{clock}{zone}").parse()
}

/// Substitutes `width` and `height` into a templated image URL.
///
/// Only the literal `{width}` and `{height}` tokens are replaced.
pub fn expand_dimensions(template: &str, width: u32, height: u32) -> String {
    template
        .replace("{width}", &width.to_string())
        .replace("{height}", &height.to_string())
}

/// Decodes a subscription tier sent in thousands (`1000`, `2000`, `3000`) to `1`, `2` or `3`.
pub fn decode_tier(raw: u64) -> u8 {
    u8::try_from(raw.saturating_add(500) / 1000).unwrap_or(u8::MAX)
}
