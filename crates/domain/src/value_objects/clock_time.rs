//! Clock-time value object
//!
//! A `ClockTime` is a time-of-day token of the form `H:MM` or `HH:MM`
//! without a date. Two clock times belonging to the same journey leg are
//! assumed to fall within one rolling 24-hour window; a later-looking time
//! with a smaller hour is assumed to have crossed midnight.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A time-of-day token such as `"8:05"` or `"23:50"`
///
/// Parsing is permissive: both ASCII (`:`) and full-width (`：`) colon
/// separators are accepted, and any token that does not contain an
/// hour/minute pair degrades to `0:00` rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClockTime(String);

impl ClockTime {
    /// Create a clock time from a raw token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token as supplied
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is empty (an absent upstream field)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extract `(hour, minute)` from the token
    ///
    /// Returns `(0, 0)` when no hour/minute pair is present.
    #[must_use]
    pub fn hour_minute(&self) -> (i32, i32) {
        parse_hour_minute(&self.0)
    }

    /// Signed minute difference `self - other` on a single forward-moving
    /// 24-hour timeline
    ///
    /// When `self` has a smaller hour than `other`, `self` is assumed to
    /// have rolled past midnight and 24 hours are added to it. The
    /// heuristic can still yield a negative result when both times sit in
    /// the same hour with `self` earlier; that behavior is a known
    /// limitation and is kept as-is.
    #[must_use]
    pub fn delta(&self, other: &Self) -> i32 {
        let (mut hour_a, minute_a) = self.hour_minute();
        let (hour_b, minute_b) = other.hour_minute();
        if hour_a < hour_b {
            hour_a += 24;
        }
        (hour_a * 60 + minute_a) - (hour_b * 60 + minute_b)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ClockTime {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Find the first `\d{1,2}[:：]\d{1,2}` pair in the token
fn parse_hour_minute(token: &str) -> (i32, i32) {
    let chars: Vec<char> = token.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c != ':' && *c != '：' {
            continue;
        }
        let mut start = i;
        while start > 0 && chars[start - 1].is_ascii_digit() && i - start < 2 {
            start -= 1;
        }
        if start == i {
            continue;
        }
        let mut end = i + 1;
        while end < chars.len() && chars[end].is_ascii_digit() && end - (i + 1) < 2 {
            end += 1;
        }
        if end == i + 1 {
            continue;
        }
        let hour: i32 = chars[start..i].iter().collect::<String>().parse().unwrap_or(0);
        let minute: i32 = chars[i + 1..end].iter().collect::<String>().parse().unwrap_or(0);
        return (hour, minute);
    }
    (0, 0)
}
