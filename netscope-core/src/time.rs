//! Raw simulator time

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Raw simulator timestamp with nanosecond precision
///
/// Trace records carry the simulator clock as an integer count of nanoseconds
/// since the start of the run. `SimTime` keeps that value untouched and offers
/// the floating-point views the plotting side needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(u64);

impl SimTime {
    /// Time zero (start of the simulated run)
    pub const fn zero() -> Self {
        SimTime(0)
    }

    /// Create a SimTime from nanoseconds
    pub const fn from_nanos(nanos: u64) -> Self {
        SimTime(nanos)
    }

    /// Create a SimTime from milliseconds
    pub const fn from_millis(millis: u64) -> Self {
        SimTime(millis * 1_000_000)
    }

    /// Create a SimTime from seconds
    pub const fn from_secs(secs: u64) -> Self {
        SimTime(secs * 1_000_000_000)
    }

    /// Get the raw nanosecond value
    pub const fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Milliseconds since time zero, as a float
    pub fn as_millis_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Seconds since time zero, as a float
    pub fn as_secs_f64(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }
}

impl Default for SimTime {
    fn default() -> Self {
        SimTime::zero()
    }
}

impl FromStr for SimTime {
    type Err = ParseIntError;

    /// Parse a raw integer nanosecond token as written by the simulator
    ///
    /// # Examples
    /// ```
    /// # use netscope_core::SimTime;
    /// let t: SimTime = "2000000".parse().unwrap();
    /// assert_eq!(t.as_nanos(), 2_000_000);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>().map(SimTime)
    }
}

/// The raw token as it appears in a trace line
impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simtime_creation() {
        assert_eq!(SimTime::zero().as_nanos(), 0);
        assert_eq!(SimTime::from_nanos(1000).as_nanos(), 1000);
        assert_eq!(SimTime::from_millis(1).as_nanos(), 1_000_000);
        assert_eq!(SimTime::from_secs(1).as_nanos(), 1_000_000_000);
    }

    #[test]
    fn test_float_views() {
        let t = SimTime::from_nanos(2_500_000_000);
        assert_eq!(t.as_secs_f64(), 2.5);
        assert_eq!(t.as_millis_f64(), 2500.0);
    }

    #[test]
    fn test_parse_raw_token() {
        assert_eq!("1000000000".parse::<SimTime>().unwrap(), SimTime::from_secs(1));
        assert!("12.5".parse::<SimTime>().is_err());
        assert!("-3".parse::<SimTime>().is_err());
        assert!("abc".parse::<SimTime>().is_err());
    }

    #[test]
    fn test_simtime_ordering() {
        let t1 = SimTime::from_millis(100);
        let t2 = SimTime::from_millis(200);

        assert!(t1 < t2);
        assert_eq!(t1.max(t2), t2);
    }

    #[test]
    fn test_display_round_trips_raw_token() {
        assert_eq!(SimTime::from_millis(1500).to_string(), "1500000000");
        assert_eq!(SimTime::zero().to_string(), "0");
        let t = SimTime::from_nanos(2_050_000_017);
        assert_eq!(t.to_string().parse::<SimTime>().unwrap(), t);
    }
}
