use crate::error::LoadError;
use crate::info_log;
use crate::word::Word;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

/// Where the valid-word universe comes from.
///
/// Implementations return raw lines; normalization happens in
/// [`load_dictionary`].
pub trait WordSource {
    fn fetch_word_list(&mut self) -> Result<Vec<String>, LoadError>;
}

/// The word list compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedWords;

impl WordSource for EmbeddedWords {
    fn fetch_word_list(&mut self) -> Result<Vec<String>, LoadError> {
        Ok(EMBEDDED_WORDBANK.lines().map(str::to_string).collect())
    }
}

/// A newline-delimited word list on disk.
#[derive(Debug, Clone)]
pub struct FileWords {
    path: PathBuf,
}

impl FileWords {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl WordSource for FileWords {
    fn fetch_word_list(&mut self) -> Result<Vec<String>, LoadError> {
        let io_err = |source| LoadError::Io {
            path: self.path.clone(),
            source,
        };
        let file = File::open(&self.path).map_err(io_err)?;
        BufReader::new(file)
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_err)
    }
}

impl WordSource for Vec<String> {
    fn fetch_word_list(&mut self) -> Result<Vec<String>, LoadError> {
        Ok(self.clone())
    }
}

/// Trim, upper-case and keep only lines that are exactly five letters A-Z.
pub fn normalize_lines<I, S>(lines: I) -> Vec<Word>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let word = line.as_ref().trim().to_uppercase();
            if word.len() == 5 && word.chars().all(|c| c.is_ascii_uppercase()) {
                Word::new(&word).ok()
            } else {
                None
            }
        })
        .collect()
}

pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    normalize_lines(data.lines())
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Word>, LoadError> {
    let lines = FileWords::new(path).fetch_word_list()?;
    Ok(normalize_lines(lines))
}

/// Fetch from `source` and build a dictionary.
///
/// # Errors
/// Propagates the source's error, or `LoadError::NoValidWords` when no line
/// survives normalization.
pub fn load_dictionary<W: WordSource + ?Sized>(source: &mut W) -> Result<Dictionary, LoadError> {
    let lines = source.fetch_word_list()?;
    let dictionary = Dictionary::new(normalize_lines(&lines));
    info_log!(
        "load_dictionary() - kept {} of {} lines",
        dictionary.len(),
        lines.len()
    );
    if dictionary.is_empty() {
        return Err(LoadError::NoValidWords);
    }
    Ok(dictionary)
}

/// The set of valid words, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Word>,
    index: HashSet<Word>,
}

impl Dictionary {
    /// Build from words, dropping duplicates.
    pub fn new<I: IntoIterator<Item = Word>>(words: I) -> Self {
        let mut dictionary = Self::default();
        for word in words {
            if dictionary.index.insert(word) {
                dictionary.words.push(word);
            }
        }
        dictionary
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.index.contains(word)
    }

    /// Case-insensitive membership test on raw text.
    pub fn contains_str(&self, text: &str) -> bool {
        Word::new(text).is_ok_and(|w| self.contains(&w))
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Uniformly random word, `None` when empty.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word> {
        self.words.choose(rng).copied()
    }
}

impl FromIterator<Word> for Dictionary {
    fn from_iter<T: IntoIterator<Item = Word>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Write;

    fn strings(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_normalize_trims_and_uppercases() {
        let words = load_wordbank_from_str("  crane  \nSLATE\n\traise\r\n");
        let words: Vec<&str> = words.iter().map(Word::as_str).collect();
        assert_eq!(words, vec!["CRANE", "SLATE", "RAISE"]);
    }

    #[test]
    fn test_normalize_discards_invalid_lines() {
        let words = load_wordbank_from_str("crane\ncranes\ncran\ncr4ne\n\nsl ate\nslate");
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].as_str(), "CRANE");
        assert_eq!(words[1].as_str(), "SLATE");
    }

    #[test]
    fn test_embedded_wordbank_is_usable() {
        let dictionary = load_dictionary(&mut EmbeddedWords).unwrap();
        assert!(dictionary.len() > 100);
        assert!(dictionary.contains_str("crane"));
    }

    #[test]
    fn test_load_dictionary_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple").unwrap();
        writeln!(file, "grape").unwrap();
        writeln!(file, "not-a-word").unwrap();
        writeln!(file, "APPLE").unwrap();

        let dictionary = load_dictionary(&mut FileWords::new(file.path())).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains_str("GRAPE"));
        assert_eq!(load_wordbank_from_file(file.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_dictionary(&mut FileWords::new(dir.path().join("missing.txt")));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn test_no_valid_words_is_error() {
        let mut source = strings(&["", "toolong", "abc"]);
        assert!(matches!(
            load_dictionary(&mut source),
            Err(LoadError::NoValidWords)
        ));
    }

    #[test]
    fn test_load_dictionary_keeps_only_valid_lines() {
        let mut source = strings(&["  crane", "cranes", "", "Slate ", "sl4te"]);
        let dictionary = load_dictionary(&mut source).unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.contains_str("CRANE"));
        assert!(dictionary.contains_str("slate"));
        // The source is only read, never drained.
        assert_eq!(source.len(), 5);
    }

    #[test]
    fn test_dictionary_dedups_and_keeps_order() {
        let dictionary: Dictionary = load_wordbank_from_str("slate\ncrane\nSLATE")
            .into_iter()
            .collect();
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.words()[0].as_str(), "SLATE");
        assert_eq!(dictionary.words()[1].as_str(), "CRANE");
        assert!(!dictionary.contains_str("RAISE"));
        assert!(!dictionary.contains_str("CRANES"));
    }

    #[test]
    fn test_choose_draws_from_dictionary() {
        let dictionary: Dictionary = load_wordbank_from_str("crane\nslate\nraise")
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let word = dictionary.choose(&mut rng).unwrap();
            assert!(dictionary.contains(&word));
        }
        assert_eq!(Dictionary::default().choose(&mut rng), None);
    }
}
