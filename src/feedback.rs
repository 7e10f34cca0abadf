//! Guess evaluation.
//!
//! [`evaluate`] scores a guess against the solution in two passes:
//! 1. Exact matches are marked `Correct` and consume that solution letter.
//! 2. Remaining positions, left to right, are marked `Present` while unconsumed
//!    copies of the letter are left in the solution, otherwise `Absent`.
//!
//! Because the second pass runs left to right, an earlier duplicate letter in
//! the guess claims `Present` before a later one.

use crate::error::WordError;
use crate::word::{WORD_LENGTH, Word};
use std::fmt;
use std::str::FromStr;

const ALPHABET_LEN: usize = 26;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// Right letter, right position (green).
    Correct,
    /// Letter occurs elsewhere in the solution (yellow).
    Present,
    /// Letter does not occur, or all its occurrences are already claimed (gray).
    Absent,
}

impl LetterStatus {
    /// Parse the single-letter code used in feedback strings (`G`, `Y`, `X`).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' => Some(Self::Correct),
            'Y' => Some(Self::Present),
            'X' => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    /// Higher ranks carry more information about a letter.
    fn rank(self) -> u8 {
        match self {
            Self::Absent => 0,
            Self::Present => 1,
            Self::Correct => 2,
        }
    }
}

/// Per-position statuses of one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback([LetterStatus; WORD_LENGTH]);

impl Feedback {
    #[must_use]
    pub const fn new(statuses: [LetterStatus; WORD_LENGTH]) -> Self {
        Self(statuses)
    }

    #[must_use]
    pub const fn statuses(&self) -> &[LetterStatus; WORD_LENGTH] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = LetterStatus> + '_ {
        self.0.iter().copied()
    }

    /// True when every position is `Correct`.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|&s| s == LetterStatus::Correct)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for status in self.0 {
            write!(f, "{}", status.to_char())?;
        }
        Ok(())
    }
}

impl FromStr for Feedback {
    type Err = ();

    /// Parse a code such as `"GYXXG"`, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let statuses: Vec<LetterStatus> = s
            .chars()
            .map(LetterStatus::from_char)
            .collect::<Option<_>>()
            .ok_or(())?;
        let statuses: [LetterStatus; WORD_LENGTH] = statuses.try_into().map_err(|_| ())?;
        Ok(Self(statuses))
    }
}

fn letter_index(letter: u8) -> usize {
    usize::from(letter - b'A')
}

/// Score `guess` against `solution`.
#[must_use]
pub fn evaluate(guess: &Word, solution: &Word) -> Feedback {
    let guess = guess.letters();
    let solution = solution.letters();

    let mut statuses = [LetterStatus::Absent; WORD_LENGTH];
    let mut remaining = [0u8; ALPHABET_LEN];
    for &letter in solution {
        remaining[letter_index(letter)] += 1;
    }

    // First pass: exact matches
    let mut unmatched = Vec::with_capacity(WORD_LENGTH);
    for i in 0..WORD_LENGTH {
        if guess[i] == solution[i] {
            statuses[i] = LetterStatus::Correct;
            remaining[letter_index(guess[i])] -= 1;
        } else {
            unmatched.push(i);
        }
    }

    // Second pass: letters elsewhere in the solution, leftmost first
    for i in unmatched {
        let count = &mut remaining[letter_index(guess[i])];
        if *count > 0 {
            statuses[i] = LetterStatus::Present;
            *count -= 1;
        }
    }

    Feedback(statuses)
}

/// [`evaluate`] on raw strings.
///
/// # Errors
/// Returns `WordError` when either string is not a five-letter word.
pub fn evaluate_str(guess: &str, solution: &str) -> Result<Feedback, WordError> {
    Ok(evaluate(&Word::new(guess)?, &Word::new(solution)?))
}

/// Best status seen so far for each letter, for keyboard colouring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterHints([Option<LetterStatus>; ALPHABET_LEN]);

impl LetterHints {
    pub fn record(&mut self, word: &Word, feedback: &Feedback) {
        for (&letter, status) in word.letters().iter().zip(feedback.iter()) {
            let slot = &mut self.0[letter_index(letter)];
            if slot.is_none_or(|known| known.rank() < status.rank()) {
                *slot = Some(status);
            }
        }
    }

    /// Status for a letter, case-insensitive; `None` if never guessed.
    pub fn get(&self, letter: char) -> Option<LetterStatus> {
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        self.0[letter_index(letter.to_ascii_uppercase() as u8)]
    }
}
