//! Service-day times for stop visits.
//!
//! GTFS stop times are "H:MM:SS" or "HH:MM:SS" strings measured from the start
//! of the service day. Trips running past midnight keep counting, so
//! "25:10:00" is a valid arrival ten past one the next morning.

use chrono::Duration;
use std::cmp::Ordering;
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// An offset from the start of the service day.
///
/// # Examples
///
/// ```
/// use schedule_normalizer::domain::ServiceTime;
///
/// let t = ServiceTime::parse("25:10:00").unwrap();
/// assert_eq!(t.to_string(), "25:10:00");
/// assert!(t > ServiceTime::parse("23:59:59").unwrap());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceTime {
    offset: Duration,
}

impl ServiceTime {
    /// Create a time from a number of seconds past the service-day start.
    pub fn from_seconds(seconds: i64) -> Self {
        Self {
            offset: Duration::seconds(seconds),
        }
    }

    /// Parse a time from "H:MM:SS" or "HH:MM:SS" format.
    ///
    /// Hours may exceed 23; minutes and seconds must be 0-59.
    ///
    /// ```
    /// use schedule_normalizer::domain::ServiceTime;
    ///
    /// assert!(ServiceTime::parse("7:05:00").is_ok());
    /// assert!(ServiceTime::parse("07:05:00").is_ok());
    /// assert!(ServiceTime::parse("24:00:00").is_ok());
    ///
    /// assert!(ServiceTime::parse("07:05").is_err());
    /// assert!(ServiceTime::parse("07:60:00").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let s = s.trim();
        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TimeError::new("expected H:MM:SS format"));
        };

        if h.is_empty() || h.len() > 3 || !h.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TimeError::new("invalid hour digits"));
        }
        let hours: i64 = h
            .parse()
            .map_err(|_| TimeError::new("invalid hour digits"))?;

        let minutes = parse_two_digits(m.as_bytes())
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minutes > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        let seconds = parse_two_digits(sec.as_bytes())
            .ok_or_else(|| TimeError::new("invalid second digits"))?;
        if seconds > 59 {
            return Err(TimeError::new("second must be 0-59"));
        }

        Ok(Self::from_seconds(
            hours * 3600 + i64::from(minutes) * 60 + i64::from(seconds),
        ))
    }

    /// Seconds past the service-day start.
    pub fn seconds(&self) -> i64 {
        self.offset.num_seconds()
    }
}

impl Ord for ServiceTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl PartialOrd for ServiceTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ServiceTime({self})")
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.seconds();
        write!(
            f,
            "{:02}:{:02}:{:02}",
            total / 3600,
            (total % 3600) / 60,
            total % 60
        )
    }
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
