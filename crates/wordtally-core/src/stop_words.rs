//! Stop-word lists.
//!
//! A stop-word list is plain text with one word per line. Lines are trimmed
//! and blank lines are skipped. Matching is exact, so entries should be
//! lowercase like the tokens they filter.

use std::collections::HashSet;
use std::io::ErrorKind;

use camino::Utf8Path;

use crate::error::{StopWordsError, StopWordsResult};

/// Default stop-word file name, looked up relative to the working directory.
pub const DEFAULT_STOP_WORDS_FILE: &str = "StopWords.txt";

/// A set of words excluded from counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty list that excludes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a line-oriented list.
    pub fn from_lines(text: &str) -> Self {
        text.lines().collect()
    }

    /// Load a list from a file.
    ///
    /// A missing file is reported as [`StopWordsError::NotFound`] so callers
    /// can treat it as a startup failure.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> StopWordsResult<Self> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StopWordsError::NotFound {
                path: path.to_path_buf(),
            },
            _ => StopWordsError::Read {
                path: path.to_path_buf(),
                source: e,
            },
        })?;
        let stop_words = Self::from_lines(&text);
        tracing::debug!(count = stop_words.len(), "loaded stop words");
        Ok(stop_words)
    }

    /// Whether `word` is excluded.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|line| line.as_ref().trim().to_string())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }
}
