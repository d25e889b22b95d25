//! Schedule times from GTFS feeds.
//!
//! Feed times are "H:MM:SS" strings measured from midnight of the service
//! day. Hours may exceed 23 for trips that run past midnight, so these are
//! plain second counts rather than wall-clock times.

use std::fmt;

/// Error returned when parsing an invalid schedule time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid schedule time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Seconds since midnight of the service day.
///
/// # Examples
///
/// ```
/// use order_server::domain::ScheduleTime;
///
/// let t = ScheduleTime::parse("25:03:10").unwrap();
/// assert_eq!(t.seconds(), 25 * 3600 + 3 * 60 + 10);
/// assert!(ScheduleTime::parse("7:5:00").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScheduleTime(u32);

impl ScheduleTime {
    /// Create from a raw second count.
    pub fn from_seconds(secs: u32) -> Self {
        Self(secs)
    }

    /// Parse an "H+:MM:SS" string. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let mut parts = s.trim().split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected H:MM:SS"));
        };

        if h.is_empty() || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: u32 = h
            .parse()
            .map_err(|_| TimeError::new("hour out of range"))?;

        let minutes = parse_two_digits(m).ok_or_else(|| TimeError::new("invalid minute digits"))?;
        let seconds =
            parse_two_digits(sec).ok_or_else(|| TimeError::new("invalid second digits"))?;
        if minutes > 59 || seconds > 59 {
            return Err(TimeError::new("minutes and seconds must be 0-59"));
        }

        hours
            .checked_mul(3600)
            .and_then(|t| t.checked_add(minutes * 60 + seconds))
            .map(Self)
            .ok_or_else(|| TimeError::new("hour out of range"))
    }

    /// Returns the second count.
    pub fn seconds(&self) -> u32 {
        self.0
    }

    /// Seconds from `self` until `later`, if `later` is not earlier.
    pub fn seconds_until(&self, later: ScheduleTime) -> Option<u32> {
        later.0.checked_sub(self.0)
    }
}

fn parse_two_digits(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(u32::from(bytes[0] - b'0') * 10 + u32::from(bytes[1] - b'0'))
}

impl fmt::Debug for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScheduleTime({self})")
    }
}

impl fmt::Display for ScheduleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.0 / 3600,
            (self.0 / 60) % 60,
            self.0 % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_regular_times() {
        assert_eq!(ScheduleTime::parse("00:00:00").unwrap().seconds(), 0);
        assert_eq!(ScheduleTime::parse("06:30:15").unwrap().seconds(), 23_415);
        assert_eq!(ScheduleTime::parse("6:30:15").unwrap().seconds(), 23_415);
    }

    #[test]
    fn parse_past_midnight() {
        assert_eq!(ScheduleTime::parse("24:00:00").unwrap().seconds(), 86_400);
        assert_eq!(ScheduleTime::parse("101:00:01").unwrap().seconds(), 363_601);
    }

    #[test]
    fn reject_malformed() {
        assert!(ScheduleTime::parse("").is_err());
        assert!(ScheduleTime::parse("12:00").is_err());
        assert!(ScheduleTime::parse("12:00:00:00").is_err());
        assert!(ScheduleTime::parse("12:0:00").is_err());
        assert!(ScheduleTime::parse("12:60:00").is_err());
        assert!(ScheduleTime::parse("12:00:60").is_err());
        assert!(ScheduleTime::parse("-1:00:00").is_err());
        assert!(ScheduleTime::parse("ab:00:00").is_err());
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert_eq!(ScheduleTime::parse(" 08:00:00 ").unwrap().seconds(), 28_800);
    }

    #[test]
    fn seconds_until() {
        let a = ScheduleTime::parse("08:00:00").unwrap();
        let b = ScheduleTime::parse("08:02:30").unwrap();
        assert_eq!(a.seconds_until(b), Some(150));
        assert_eq!(b.seconds_until(a), None);
    }

    #[test]
    fn display() {
        let t = ScheduleTime::from_seconds(25 * 3600 + 61);
        assert_eq!(t.to_string(), "25:01:01");
    }
}
