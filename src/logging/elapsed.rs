//! Elapsed-time reporting

use std::time::{Duration, Instant};

use super::facade::Facade;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Render a duration compactly, e.g. `123ns`, `42ms`, `1.5s`, `2m3.5s`,
/// `1h0m0s`.
///
/// Below one second the largest fitting unit is used with a trimmed
/// fraction. From one second up the value is split into hours, minutes and
/// (fractional) seconds, leaving out leading zero components.
pub fn format_elapsed(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{}ns", nanos);
    }
    if nanos < NANOS_PER_MILLI {
        return format!("{}µs", with_fraction(nanos, NANOS_PER_MICRO, 3));
    }
    if nanos < NANOS_PER_SEC {
        return format!("{}ms", with_fraction(nanos, NANOS_PER_MILLI, 6));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = u128::from(total_secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h{}m", hours, mins));
    } else if mins > 0 {
        out.push_str(&format!("{}m", mins));
    }
    out.push_str(&with_fraction(secs, NANOS_PER_SEC, 9));
    out.push('s');
    out
}

/// `value / unit` with up to `digits` decimals, trailing zeros removed
fn with_fraction(value: u128, unit: u128, digits: usize) -> String {
    let whole = value / unit;
    let fraction = value % unit;
    if fraction == 0 {
        return whole.to_string();
    }
    let fraction = format!("{:0width$}", fraction, width = digits);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Scope guard that reports how long it was alive.
///
/// Dropping the guard calls [`Facade::time_track`] with the instant the guard
/// was created.
///
/// ```
/// fn load() {
///     let _timer = deferlog::track("load");
///     // ...
/// } // "load took 1.2ms" is logged at info here
/// # load();
/// ```
#[must_use = "the elapsed time is reported when the guard is dropped"]
pub struct TimeTrack<'a> {
    facade: &'a Facade,
    label: String,
    start: Instant,
}

impl<'a> TimeTrack<'a> {
    pub(crate) fn new(facade: &'a Facade, label: impl Into<String>) -> Self {
        Self {
            facade,
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// When the guard was created
    pub fn start(&self) -> Instant {
        self.start
    }
}

impl Drop for TimeTrack<'_> {
    fn drop(&mut self) {
        self.facade.time_track(self.start, &self.label);
    }
}
