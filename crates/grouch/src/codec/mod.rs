//! Letter-code decoding for the abbreviations OSCAR uses for meeting days and
//! grading bases.

mod sequence;

pub use sequence::{normalize, Elements, Letters};
pub(crate) use sequence::json_kind;

use crate::error::{GrouchError, Result};

/// A stateless decoder for a fixed table of single-letter codes.
///
/// Lookups are case-insensitive. Both [`DAYS`] and [`GRADING_BASIS`] treat an
/// empty sequence as invalid.
#[derive(Debug, Clone, Copy)]
pub struct LetterCodec {
    /// Used in error messages
    label: &'static str,
    table: &'static [(&'static str, &'static str)],
}

/// m, t, w, r, f to lower-case weekday names.
pub const DAYS: LetterCodec = LetterCodec {
    label: "day",
    table: &[
        ("m", "monday"),
        ("t", "tuesday"),
        ("w", "wednesday"),
        ("r", "thursday"),
        ("f", "friday"),
    ],
};

/// ALP grading basis letters to human-readable descriptions.
pub const GRADING_BASIS: LetterCodec = LetterCodec {
    label: "grading basis",
    table: &[("a", "audit"), ("l", "letter grade"), ("p", "pass/fail")],
};

impl LetterCodec {
    fn lookup(&self, letter: &str) -> Option<&'static str> {
        let lowercase_letter = letter.to_lowercase();
        self.table
            .iter()
            .find(|(key, _)| *key == lowercase_letter)
            .map(|(_, name)| *name)
    }

    /// Decodes a single letter.
    ///
    /// # Example
    /// ```
    /// use grouch::codec::DAYS;
    /// assert_eq!(DAYS.letter_to_name("R").unwrap(), "thursday");
    /// ```
    pub fn letter_to_name(&self, letter: &str) -> Result<&'static str> {
        self.lookup(letter).ok_or_else(|| GrouchError::InvalidCode {
            letter: letter.to_string(),
            codec: self.label,
        })
    }

    /// Decodes every element of `letters`, keeping order and duplicates.
    pub fn letters_to_names(&self, letters: &Letters) -> Result<Vec<&'static str>> {
        letters
            .iter()
            .map(|letter| self.letter_to_name(letter))
            .collect()
    }

    pub fn is_valid_letter(&self, letter: &str) -> bool {
        self.lookup(letter).is_some()
    }

    /// True iff `letters` is non-empty and every element decodes.
    pub fn is_valid_letters(&self, letters: &Letters) -> bool {
        !letters.is_empty() && letters.iter().all(|letter| self.is_valid_letter(letter))
    }

    /// All letters this codec accepts, in table order.
    pub fn letters(&self) -> impl Iterator<Item = &'static str> {
        self.table.iter().map(|(key, _)| *key)
    }
}
