//! Uniform element-by-element access to letter codes that arrive either as a
//! compact string (`"mwf"`) or as an explicit list (`["m", "w", "f"]`).

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::error::{GrouchError, Result};

/// Letter codes as the scraper hands them over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Letters {
    /// One element per character
    Text(String),
    /// One element per entry, taken as-is
    Sequence(Vec<String>),
}

impl Letters {
    /// An empty sequence, the normalized form of an absent value.
    pub fn empty() -> Self {
        Letters::Sequence(Vec::new())
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> Elements<'_> {
        match self {
            Letters::Text(text) => Elements::Chars {
                text,
                chars: text.char_indices(),
            },
            Letters::Sequence(items) => Elements::Items(items.iter()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Letters::Text(text) => text.chars().count(),
            Letters::Sequence(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Letters::Text(text) => text.is_empty(),
            Letters::Sequence(items) => items.is_empty(),
        }
    }

    /// Returns a copy with every element lower-cased, keeping the variant.
    pub fn to_lowercase(&self) -> Self {
        match self {
            Letters::Text(text) => Letters::Text(text.to_lowercase()),
            Letters::Sequence(items) => {
                Letters::Sequence(items.iter().map(|s| s.to_lowercase()).collect())
            }
        }
    }
}

impl fmt::Display for Letters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Letters::Text(text) => f.write_str(text),
            Letters::Sequence(items) => f.write_str(&items.concat()),
        }
    }
}

impl From<&str> for Letters {
    fn from(text: &str) -> Self {
        Letters::Text(text.to_string())
    }
}

impl From<String> for Letters {
    fn from(text: String) -> Self {
        Letters::Text(text)
    }
}

impl From<Vec<String>> for Letters {
    fn from(items: Vec<String>) -> Self {
        Letters::Sequence(items)
    }
}

impl From<Vec<&str>> for Letters {
    fn from(items: Vec<&str>) -> Self {
        Letters::Sequence(items.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a Letters {
    type Item = &'a str;
    type IntoIter = Elements<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of [`Letters`].
pub enum Elements<'a> {
    Chars {
        text: &'a str,
        chars: std::str::CharIndices<'a>,
    },
    Items(std::slice::Iter<'a, String>),
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Elements::Chars { text, chars } => {
                let text: &'a str = *text;
                chars
                    .next()
                    .map(|(start, c)| &text[start..start + c.len_utf8()])
            }
            Elements::Items(items) => items.next().map(String::as_str),
        }
    }
}

/// Resolves a raw scraped value into [`Letters`].
///
/// Strings become [`Letters::Text`], arrays of strings become
/// [`Letters::Sequence`], and `null` becomes an empty sequence. Anything else
/// is rejected.
pub fn normalize(value: &Value) -> Result<Letters> {
    match value {
        Value::Null => Ok(Letters::empty()),
        Value::String(text) => Ok(Letters::Text(text.clone())),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(GrouchError::NotIterable {
                    kind: json_kind(other),
                }),
            })
            .collect::<Result<Vec<_>>>()
            .map(Letters::Sequence),
        other => Err(GrouchError::NotIterable {
            kind: json_kind(other),
        }),
    }
}

/// Short name of a JSON value's type, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_iterates_characters() {
        let letters = Letters::from("cat");
        let upper: Vec<String> = letters.iter().map(|s| s.to_uppercase()).collect();
        assert_eq!(upper, vec!["C", "A", "T"]);
    }

    #[test]
    fn test_sequence_iterates_elements_unchanged() {
        let words = Letters::from(vec!["dog", "cat"]);
        let upper: Vec<String> = words.iter().map(|s| s.to_uppercase()).collect();
        assert_eq!(upper, vec!["DOG", "CAT"]);
    }

    #[test]
    fn test_normalize_string_and_array() {
        assert_eq!(normalize(&json!("mwf")).unwrap(), Letters::from("mwf"));
        assert_eq!(
            normalize(&json!(["d", "o", "g"])).unwrap(),
            Letters::from(vec!["d", "o", "g"])
        );
    }

    #[test]
    fn test_normalize_null_is_empty() {
        let letters = normalize(&Value::Null).unwrap();
        assert!(letters.is_empty());
        assert_eq!(letters.iter().count(), 0);
    }

    #[test]
    fn test_normalize_rejects_non_iterables() {
        assert!(matches!(
            normalize(&json!(1332)),
            Err(GrouchError::NotIterable { kind: "number" })
        ));
        assert!(matches!(
            normalize(&json!({"m": true})),
            Err(GrouchError::NotIterable { kind: "object" })
        ));
        assert!(matches!(
            normalize(&json!(["m", 2])),
            Err(GrouchError::NotIterable { kind: "number" })
        ));
    }

    #[test]
    fn test_multibyte_text_splits_on_char_boundaries() {
        let letters = Letters::from("mé");
        assert_eq!(letters.iter().collect::<Vec<_>>(), vec!["m", "é"]);
        assert_eq!(letters.len(), 2);
    }

    #[test]
    fn test_display_concatenates_sequence() {
        assert_eq!(Letters::from(vec!["m", "w"]).to_string(), "mw");
    }
}
