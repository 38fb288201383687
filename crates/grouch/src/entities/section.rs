use std::collections::BTreeSet;
use std::sync::OnceLock;

use serde::Serialize;
use tracing::trace;

use super::meeting::Meeting;
use super::types::{SeatCounts, TimeWindow};
use crate::error::{GrouchError, Result};

/// A group of meetings within a course and the people leading them.
///
/// `meetings` is fixed at construction. The derived views (`meeting_days`,
/// `meeting_times`, ...) are computed on first read and never recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    crn: u32,
    identifier: String,
    instructors: Vec<String>,
    meetings: Vec<Meeting>,
    counts: SeatCounts,

    #[serde(skip)]
    locations: OnceLock<Vec<String>>,
    #[serde(skip)]
    days: OnceLock<BTreeSet<&'static str>>,
    #[serde(skip)]
    times: OnceLock<Vec<TimeWindow>>,
    #[serde(skip)]
    types: OnceLock<BTreeSet<String>>,
}

impl Section {
    /// Creates a section with unknown seat and waitlist counts.
    pub fn new(
        crn: u32,
        identifier: impl Into<String>,
        instructors: Vec<String>,
        meetings: Vec<Meeting>,
    ) -> Self {
        Self {
            crn,
            identifier: identifier.into(),
            instructors,
            meetings,
            counts: SeatCounts::default(),
            locations: OnceLock::new(),
            days: OnceLock::new(),
            times: OnceLock::new(),
            types: OnceLock::new(),
        }
    }

    /// Unique identifier for the section across all sections in a term.
    pub fn crn(&self) -> u32 {
        self.crn
    }

    /// Section label unique within its course for a term, e.g. `"K1"`.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn instructors(&self) -> &[String] {
        &self.instructors
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    /// Where each meeting takes place, in meeting order. Not de-duplicated.
    pub fn meeting_locations(&self) -> &[String] {
        self.locations.get_or_init(|| {
            trace!(crn = self.crn, "Collecting meeting locations");
            self.meetings
                .iter()
                .map(|m| m.location().to_string())
                .collect()
        })
    }

    /// Every weekday any meeting of this section falls on.
    pub fn meeting_days(&self) -> &BTreeSet<&'static str> {
        self.days.get_or_init(|| {
            trace!(crn = self.crn, "Collecting meeting days");
            self.meetings
                .iter()
                .flat_map(|m| m.day_names().iter().copied())
                .collect()
        })
    }

    /// Every meeting's time windows, concatenated in meeting order. A day
    /// with two meetings appears twice.
    pub fn meeting_times(&self) -> &[TimeWindow] {
        self.times.get_or_init(|| {
            trace!(crn = self.crn, "Collecting meeting times");
            self.meetings
                .iter()
                .flat_map(|m| m.time_windows().iter().cloned())
                .collect()
        })
    }

    /// Distinct kinds of meeting, e.g. `{"lecture", "recitation"}`.
    pub fn meeting_types(&self) -> &BTreeSet<String> {
        self.types.get_or_init(|| {
            trace!(crn = self.crn, "Collecting meeting types");
            self.meetings
                .iter()
                .map(|m| m.meeting_type().to_string())
                .collect()
        })
    }

    /// Updates the seat and waitlist counts.
    ///
    /// Both seat counts are required. A waitlist count passed as `None` keeps
    /// its previous value, so a refresh that only knows seat counts does not
    /// erase known waitlist counts. Negative values are rejected; a section
    /// with more seats taken than its limit is accepted.
    ///
    /// Nothing is written if any argument is invalid.
    pub fn set_counts(
        &mut self,
        seats_limit: Option<i64>,
        seats_taken: Option<i64>,
        waitlist_limit: Option<i64>,
        waitlist_taken: Option<i64>,
    ) -> Result<()> {
        let seats_limit = required_count("seats_limit", seats_limit)?;
        let seats_taken = required_count("seats_taken", seats_taken)?;
        let waitlist_limit = optional_count("waitlist_limit", waitlist_limit)?;
        let waitlist_taken = optional_count("waitlist_taken", waitlist_taken)?;

        self.counts.seats_limit = Some(seats_limit);
        self.counts.seats_taken = Some(seats_taken);
        if waitlist_limit.is_some() {
            self.counts.waitlist_limit = waitlist_limit;
        }
        if waitlist_taken.is_some() {
            self.counts.waitlist_taken = waitlist_taken;
        }

        Ok(())
    }

    pub fn counts(&self) -> &SeatCounts {
        &self.counts
    }

    pub fn seats_limit_count(&self) -> Option<u32> {
        self.counts.seats_limit
    }

    pub fn seats_taken_count(&self) -> Option<u32> {
        self.counts.seats_taken
    }

    pub fn waitlist_limit_count(&self) -> Option<u32> {
        self.counts.waitlist_limit
    }

    pub fn waitlist_taken_count(&self) -> Option<u32> {
        self.counts.waitlist_taken
    }

    pub fn seats_remaining(&self) -> Option<u32> {
        self.counts.seats_remaining()
    }

    pub fn waitlist_remaining(&self) -> Option<u32> {
        self.counts.waitlist_remaining()
    }

    /// True once seat counts are known and no seats remain.
    pub fn is_full(&self) -> bool {
        self.seats_remaining() == Some(0)
    }
}

fn required_count(field: &'static str, value: Option<i64>) -> Result<u32> {
    optional_count(field, value)?.ok_or(GrouchError::InvalidCount { field })
}

fn optional_count(field: &'static str, value: Option<i64>) -> Result<Option<u32>> {
    value
        .map(|v| u32::try_from(v).map_err(|_| GrouchError::InvalidCount { field }))
        .transpose()
}
