use std::sync::OnceLock;

use serde::Serialize;
use tracing::trace;

use super::types::TimeWindow;
use crate::codec::{Letters, DAYS};
use crate::error::{GrouchError, Result};

/// One recurring session of a section: who leads it, when and where it
/// happens, and what kind of session it is.
#[derive(Debug, Clone, Serialize)]
pub struct Meeting {
    instructor: String,
    days: Letters,
    start_time: String,
    end_time: String,
    #[serde(rename = "type")]
    meeting_type: String,
    location: String,

    #[serde(skip)]
    day_names: OnceLock<Vec<&'static str>>,
    #[serde(skip)]
    time_windows: OnceLock<Vec<TimeWindow>>,
}

impl Meeting {
    /// Creates a meeting.
    ///
    /// # Arguments
    /// * `instructor` - Person leading the meeting
    /// * `days` - Day letters, e.g. `"mwf"`
    /// * `start_time` / `end_time` - Display times such as `"8:05am"`; never parsed
    /// * `meeting_type` - Free-form category such as `"lecture"`
    /// * `location` - Building and room
    ///
    /// # Returns
    /// * `Err(InvalidSchedule)` - If `days` is empty or holds a letter outside m, t, w, r, f
    pub fn new(
        instructor: impl Into<String>,
        days: impl Into<Letters>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        meeting_type: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self> {
        let days = days.into();
        if !DAYS.is_valid_letters(&days) {
            return Err(GrouchError::InvalidSchedule {
                days: days.to_string(),
            });
        }

        Ok(Self {
            instructor: instructor.into(),
            days,
            start_time: start_time.into(),
            end_time: end_time.into(),
            meeting_type: meeting_type.into(),
            location: location.into(),
            day_names: OnceLock::new(),
            time_windows: OnceLock::new(),
        })
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    /// Day letters as given, e.g. `"mwf"`.
    pub fn days(&self) -> &Letters {
        &self.days
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    /// What kind of meeting this is, e.g. `"lecture"` or `"recitation"`.
    pub fn meeting_type(&self) -> &str {
        &self.meeting_type
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Full day names in the order the letters were given.
    pub fn day_names(&self) -> &[&'static str] {
        self.day_names.get_or_init(|| {
            trace!("Decoding meeting days '{}'", self.days);
            // Letters were validated in `new`
            self.days
                .iter()
                .filter_map(|letter| DAYS.letter_to_name(letter).ok())
                .collect()
        })
    }

    /// One window per meeting day, each with this meeting's start and end
    /// time.
    pub fn time_windows(&self) -> &[TimeWindow] {
        self.time_windows.get_or_init(|| {
            self.day_names()
                .iter()
                .map(|&day| TimeWindow {
                    day,
                    start_time: self.start_time.clone(),
                    end_time: self.end_time.clone(),
                })
                .collect()
        })
    }
}

impl PartialEq for Meeting {
    fn eq(&self, other: &Self) -> bool {
        self.instructor == other.instructor
            && self.days == other.days
            && self.start_time == other.start_time
            && self.end_time == other.end_time
            && self.meeting_type == other.meeting_type
            && self.location == other.location
    }
}

impl Eq for Meeting {}
