//! Counting sessions.
//!
//! [`WordCounter`] ties a stop-word list to a [`WordCountMap`] and feeds it
//! normalized tokens from raw text.
//!
//! The map walks one stack frame per character, so tokens longer than
//! [`DEFAULT_MAX_WORD_CHARS`] (or the limit set with
//! [`WordCounter::with_max_word_chars`]) are skipped rather than counted.

use crate::stop_words::StopWords;
use crate::text;
use crate::word_count_map::{WordCount, WordCountMap};

/// Longest token, in characters, that is counted by default.
pub const DEFAULT_MAX_WORD_CHARS: usize = 256;

/// Counts the words of one or more texts, skipping stop words.
#[derive(Debug, Clone)]
pub struct WordCounter {
    stop_words: StopWords,
    max_word_chars: usize,
    map: WordCountMap,
}

impl Default for WordCounter {
    fn default() -> Self {
        Self::new(StopWords::new())
    }
}

impl WordCounter {
    /// Create a counter that skips the given stop words.
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            max_word_chars: DEFAULT_MAX_WORD_CHARS,
            map: WordCountMap::new(),
        }
    }

    /// Skip tokens with more than `max` characters.
    ///
    /// The limit is clamped to at least 1.
    pub fn with_max_word_chars(mut self, max: usize) -> Self {
        self.max_word_chars = max.max(1);
        self
    }

    /// Count every word of `text` that is not a stop word.
    ///
    /// Tokens are counted in source order. Over-long tokens are skipped
    /// with a warning. Returns how many tokens were counted.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn ingest(&mut self, text: &str) -> usize {
        let mut counted = 0;
        let mut skipped = 0;
        let mut too_long = 0;
        for word in text::words(text) {
            if word.chars().nth(self.max_word_chars).is_some() {
                too_long += 1;
                continue;
            }
            if self.stop_words.contains(&word) {
                skipped += 1;
                continue;
            }
            self.map.increment_count(&word);
            counted += 1;
        }
        if too_long > 0 {
            tracing::warn!(
                skipped = too_long,
                max_chars = self.max_word_chars,
                "skipped over-long tokens"
            );
        }
        tracing::debug!(counted, skipped, distinct = self.map.len(), "ingested text");
        counted
    }

    /// Every counted word, highest count first.
    pub fn word_counts(&self) -> Vec<WordCount> {
        self.map.word_counts_by_count()
    }

    /// The `n` most frequent words, or all of them if fewer exist.
    pub fn top(&self, n: usize) -> Vec<WordCount> {
        let mut counts = self.word_counts();
        counts.truncate(n);
        counts
    }

    /// The underlying map.
    pub const fn map(&self) -> &WordCountMap {
        &self.map
    }
}
