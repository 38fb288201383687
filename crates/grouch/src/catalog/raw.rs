/// Raw records as emitted by the scraper, before validation
use serde::Deserialize;
use serde_json::Value;

use crate::codec::{json_kind, normalize};
use crate::entities::{Course, Meeting, Section, Semester};
use crate::error::{GrouchError, Result};

/// A meeting as scraped. Every field must be present to build a [`Meeting`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMeeting {
    pub instructor: Option<String>,
    /// `"mwf"` or `["m", "w", "f"]`
    pub days: Option<Value>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(rename = "type")]
    pub meeting_type: Option<String>,
    pub location: Option<String>,
}

impl TryFrom<RawMeeting> for Meeting {
    type Error = GrouchError;

    fn try_from(raw: RawMeeting) -> Result<Self> {
        let (
            Some(instructor),
            Some(days),
            Some(start_time),
            Some(end_time),
            Some(meeting_type),
            Some(location),
        ) = (
            raw.instructor,
            raw.days,
            raw.start_time,
            raw.end_time,
            raw.meeting_type,
            raw.location,
        )
        else {
            return Err(GrouchError::MissingField { entity: "meeting" });
        };

        Meeting::new(
            instructor,
            normalize(&days)?,
            start_time,
            end_time,
            meeting_type,
            location,
        )
    }
}

/// A section as scraped. `meetings` holds untyped values so that elements
/// which are not meeting records can be reported by position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSection {
    /// Number or numeric string
    pub crn: Option<Value>,
    pub identifier: Option<String>,
    pub instructors: Option<Vec<String>>,
    pub meetings: Option<Vec<Value>>,
}

impl TryFrom<RawSection> for Section {
    type Error = GrouchError;

    fn try_from(raw: RawSection) -> Result<Self> {
        let (Some(crn), Some(identifier), Some(instructors), Some(meetings)) =
            (raw.crn, raw.identifier, raw.instructors, raw.meetings)
        else {
            return Err(GrouchError::MissingField { entity: "section" });
        };

        let crn: u32 = match coerce_integer("crn", &crn, Fraction::Reject)? {
            Some(crn) => to_field("crn", crn)?,
            None => return Err(GrouchError::MissingField { entity: "section" }),
        };

        let meetings = meetings
            .into_iter()
            .enumerate()
            .map(|(index, value)| Meeting::try_from(meeting_record(index, value)?))
            .collect::<Result<Vec<_>>>()?;

        Ok(Section::new(crn, identifier, instructors, meetings))
    }
}

/// Checks that a section's meeting element is shaped like a meeting record.
fn meeting_record(index: usize, value: Value) -> Result<RawMeeting> {
    if !value.is_object() {
        return Err(GrouchError::InvalidMeeting {
            index,
            reason: format!("expected a meeting object, found {}", json_kind(&value)),
        });
    }

    serde_json::from_value(value).map_err(|e| GrouchError::InvalidMeeting {
        index,
        reason: e.to_string(),
    })
}

/// A course as scraped. Integer fields accept numbers or numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCourse {
    pub school: Option<String>,
    pub number: Option<Value>,
    pub name: Option<String>,
    pub semester: Option<String>,
    pub year: Option<Value>,
    pub hours: Option<Value>,
    /// `"lp"` or `["l", "p"]`
    pub grade_basis: Option<Value>,
    /// Absent and `null` both mean no sections
    pub sections: Option<Vec<RawSection>>,
    pub restrictions: Option<Value>,
    pub prerequisites: Option<Value>,
    pub corequisites: Option<Value>,
}

impl TryFrom<RawCourse> for Course {
    type Error = GrouchError;

    fn try_from(raw: RawCourse) -> Result<Self> {
        let number = optional_integer::<u32>("number", raw.number.as_ref())?;
        let mut course = Course::new(raw.school.as_deref(), number, raw.name.as_deref());

        if let Some(semester) = raw.semester.as_deref().filter(|s| !s.trim().is_empty()) {
            course = course.with_semester(semester.parse::<Semester>()?);
        }
        if let Some(year) = optional_integer::<i32>("year", raw.year.as_ref())? {
            course = course.with_year(year);
        }

        if let Some(hours) = optional_integer::<u32>("hours", raw.hours.as_ref())? {
            course = course.with_hours(hours);
        }

        if let Some(grade_basis) = raw.grade_basis {
            let letters = normalize(&grade_basis)?;
            if !letters.is_empty() {
                course = course.with_grade_basis(letters);
            }
        }

        let sections = raw
            .sections
            .unwrap_or_default()
            .into_iter()
            .map(Section::try_from)
            .collect::<Result<Vec<_>>>()?;
        course = course.with_sections(sections);

        if let Some(restrictions) = raw.restrictions {
            course = course.with_restrictions(restrictions);
        }
        if let Some(prerequisites) = raw.prerequisites {
            course = course.with_prerequisites(prerequisites);
        }
        if let Some(corequisites) = raw.corequisites {
            course = course.with_corequisites(corequisites);
        }

        Ok(course)
    }
}

/// A seat availability snapshot for one section, as re-polled from OSCAR.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityUpdate {
    pub crn: u32,
    pub seats_limit: Option<Value>,
    pub seats_taken: Option<Value>,
    pub waitlist_limit: Option<Value>,
    pub waitlist_taken: Option<Value>,
}

impl AvailabilityUpdate {
    /// Writes the counts into `section`. Counts must be JSON integers; the
    /// string `"1"` is rejected like any other non-integer.
    pub fn apply_to(&self, section: &mut Section) -> Result<()> {
        section.set_counts(
            count_value("seats_limit", self.seats_limit.as_ref())?,
            count_value("seats_taken", self.seats_taken.as_ref())?,
            count_value("waitlist_limit", self.waitlist_limit.as_ref())?,
            count_value("waitlist_taken", self.waitlist_taken.as_ref())?,
        )
    }
}

fn count_value(field: &'static str, value: Option<&Value>) -> Result<Option<i64>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_i64()
            .map(Some)
            .ok_or(GrouchError::InvalidCount { field }),
    }
}

/// What to do with the fractional part of a scraped number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fraction {
    /// `3.5` credit hours is `3`
    Truncate,
    /// Identifiers must be whole; `87201.9` is invalid, `87201.0` is not
    Reject,
}

/// Reads an integer the way scrapers tend to emit one: a JSON integer, a
/// float, or a numeric string. `null` and blank strings are absent.
fn coerce_integer(
    field: &'static str,
    value: &Value,
    fraction: Fraction,
) -> Result<Option<i64>> {
    let invalid = || GrouchError::InvalidField {
        field,
        value: value.to_string(),
    };
    let from_float = |f: f64| {
        if !f.is_finite() || (fraction == Fraction::Reject && f.fract() != 0.0) {
            return None;
        }
        Some(f.trunc() as i64)
    };

    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(from_float))
            .map(Some)
            .ok_or_else(invalid),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(from_float))
                .map(Some)
                .ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

fn optional_integer<T: TryFrom<i64>>(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Option<T>> {
    match value {
        Some(v) => coerce_integer(field, v, Fraction::Truncate)?
            .map(|n| to_field(field, n))
            .transpose(),
        None => Ok(None),
    }
}

fn to_field<T: TryFrom<i64>>(field: &'static str, n: i64) -> Result<T> {
    T::try_from(n).map_err(|_| GrouchError::InvalidField {
        field,
        value: n.to_string(),
    })
}
