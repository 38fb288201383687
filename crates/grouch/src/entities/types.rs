/// Small value types shared by the entities
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GrouchError;

/// One weekly occurrence of a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeWindow {
    pub day: &'static str,
    pub start_time: String,
    pub end_time: String,
}

/// The academic term a course is offered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Semester {
    Spring,
    Summer,
    Fall,
}

impl Semester {
    pub fn as_str(&self) -> &'static str {
        match self {
            Semester::Spring => "spring",
            Semester::Summer => "summer",
            Semester::Fall => "fall",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Semester {
    type Err = GrouchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "spring" => Ok(Semester::Spring),
            "summer" => Ok(Semester::Summer),
            "fall" => Ok(Semester::Fall),
            _ => Err(GrouchError::InvalidField {
                field: "semester",
                value: s.to_string(),
            }),
        }
    }
}

/// Seat and waitlist counters for a section. Every count is unknown until an
/// availability refresh sets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeatCounts {
    pub seats_limit: Option<u32>,
    pub seats_taken: Option<u32>,
    pub waitlist_limit: Option<u32>,
    pub waitlist_taken: Option<u32>,
}

impl SeatCounts {
    /// Open seats, or `None` until both seat counts are known. Overfilled
    /// sections report zero.
    pub fn seats_remaining(&self) -> Option<u32> {
        Some(self.seats_limit?.saturating_sub(self.seats_taken?))
    }

    pub fn waitlist_remaining(&self) -> Option<u32> {
        Some(self.waitlist_limit?.saturating_sub(self.waitlist_taken?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semester_parse_is_case_insensitive() {
        assert_eq!("Fall".parse::<Semester>().unwrap(), Semester::Fall);
        assert_eq!("SPRING".parse::<Semester>().unwrap(), Semester::Spring);
        assert!(matches!(
            "winter".parse::<Semester>(),
            Err(GrouchError::InvalidField {
                field: "semester",
                ..
            })
        ));
    }

    #[test]
    fn test_remaining_requires_both_counts() {
        let mut counts = SeatCounts::default();
        assert_eq!(counts.seats_remaining(), None);

        counts.seats_limit = Some(30);
        counts.seats_taken = Some(32);
        assert_eq!(counts.seats_remaining(), Some(0));

        counts.waitlist_limit = Some(10);
        counts.waitlist_taken = Some(4);
        assert_eq!(counts.waitlist_remaining(), Some(6));
    }
}
