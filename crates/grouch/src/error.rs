//! Error types for entity construction, decoding, and catalog loading.

use thiserror::Error;

/// Errors that can occur while building or querying scheduling entities.
#[derive(Debug, Error)]
pub enum GrouchError {
    /// A required constructor field was absent
    #[error("All fields must be present for {entity}.")]
    MissingField { entity: &'static str },

    /// An element of a section's meetings was not a meeting record
    #[error("Meetings must contain meeting objects (element {index}: {reason}).")]
    InvalidMeeting { index: usize, reason: String },

    /// A meeting's day string held a letter outside of m, t, w, r, f
    #[error("Invalid days present in string: {days}.")]
    InvalidSchedule { days: String },

    /// A codec was asked to decode a letter it does not know
    #[error("'{letter}' is not a valid {codec} letter.")]
    InvalidCode { letter: String, codec: &'static str },

    /// The sequence normalizer received something it cannot iterate
    #[error("'{kind}' is not iterable.")]
    NotIterable { kind: &'static str },

    /// A seat or waitlist count was absent, non-integer, negative, or too large
    #[error("{field} must be a non-negative integer within range.")]
    InvalidCount { field: &'static str },

    /// A course field could not be coerced to its expected type
    #[error("Invalid value for {field}: {value}")]
    InvalidField { field: &'static str, value: String },

    /// A course in a dump file did not have the shape of a course record
    #[error("Course record {index} in {source_name} is malformed: {reason}")]
    InvalidCourse {
        source_name: String,
        index: usize,
        reason: String,
    },

    /// An availability update named a CRN the catalog does not hold
    #[error("No section with CRN {crn}")]
    UnknownCrn { crn: u32 },

    /// Reading a scrape dump or config file failed
    #[error("IO error: {message}")]
    Io { message: String },

    /// A scrape dump or config file was not valid JSON
    #[error("JSON error: {message}")]
    Json { message: String },
}

impl GrouchError {
    /// Returns true if this error was caused by malformed entity input rather
    /// than by the environment. Such errors only affect the record at hand.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, GrouchError::Io { .. } | GrouchError::Json { .. })
    }
}

impl From<std::io::Error> for GrouchError {
    fn from(err: std::io::Error) -> Self {
        GrouchError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GrouchError {
    fn from(err: serde_json::Error) -> Self {
        GrouchError::Json {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrouchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(GrouchError::MissingField { entity: "meeting" }.is_input_error());
        assert!(GrouchError::InvalidCount {
            field: "seats_limit"
        }
        .is_input_error());
        assert!(!GrouchError::Io {
            message: "denied".to_string()
        }
        .is_input_error());
    }

    #[test]
    fn test_messages_name_the_offender() {
        let err = GrouchError::InvalidSchedule {
            days: "z".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid days present in string: z.");

        let err = GrouchError::InvalidCount {
            field: "seats_taken",
        };
        assert_eq!(
            err.to_string(),
            "seats_taken must be a non-negative integer within range."
        );
    }

    #[test]
    fn test_malformed_course_is_input_error() {
        let err = GrouchError::InvalidCourse {
            source_name: "cs.json".to_string(),
            index: 1,
            reason: "invalid type: string, expected a sequence".to_string(),
        };
        assert!(err.is_input_error());
        assert!(err.to_string().starts_with("Course record 1 in cs.json is malformed"));
    }
}
