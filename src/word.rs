//! Five-letter word value type.

use crate::error::WordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const WORD_LENGTH: usize = 5;

/// Five uppercase ASCII letters.
///
/// Construction normalizes case, so `Word::new("crane")` and
/// `Word::new("CRANE")` are equal. Once built a word never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse a word, upper-casing ASCII letters.
    ///
    /// # Errors
    /// Returns `WordError` if the text is not exactly five ASCII letters.
    pub fn new(text: &str) -> Result<Self, WordError> {
        let len = text.chars().count();
        if len != WORD_LENGTH {
            return Err(WordError::InvalidLength(len));
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, ch) in letters.iter_mut().zip(text.chars()) {
            if !ch.is_ascii_alphabetic() {
                return Err(WordError::InvalidCharacter(ch));
            }
            *slot = ch.to_ascii_uppercase() as u8;
        }
        Ok(Self(letters))
    }

    /// The letters as uppercase ASCII bytes.
    #[must_use]
    pub const fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // Always ASCII by construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().map(|&b| char::from(b))
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases() {
        let word = Word::new("crane").unwrap();
        assert_eq!(word.as_str(), "CRANE");
        assert_eq!(word, Word::new("CrAnE").unwrap());
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert_eq!(Word::new("CRAN"), Err(WordError::InvalidLength(4)));
        assert_eq!(Word::new("CRANES"), Err(WordError::InvalidLength(6)));
        assert_eq!(Word::new(""), Err(WordError::InvalidLength(0)));
    }

    #[test]
    fn test_new_rejects_non_letters() {
        assert_eq!(Word::new("CR4NE"), Err(WordError::InvalidCharacter('4')));
        assert_eq!(Word::new("CRAN "), Err(WordError::InvalidCharacter(' ')));
        // Five chars but not ASCII.
        assert_eq!(Word::new("CRANÉ"), Err(WordError::InvalidCharacter('É')));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let word = Word::new("slate").unwrap();
        let json = serde_json::to_string(&word).unwrap();
        assert_eq!(json, "\"SLATE\"");

        let back: Word = serde_json::from_str("\"slate\"").unwrap();
        assert_eq!(back, word);
        assert!(serde_json::from_str::<Word>("\"SLATES\"").is_err());
    }

    #[test]
    fn test_chars_and_display() {
        let word: Word = "ALLOW".parse().unwrap();
        assert_eq!(word.chars().collect::<String>(), "ALLOW");
        assert_eq!(format!("{word}"), "ALLOW");
        assert_eq!(word.letters(), b"ALLOW");
    }
}
