//! Prefix-tree word counts.
//!
//! [`WordCountMap`] stores one node per character along every stored word.
//! Words that share a prefix share the nodes for that prefix, and each node
//! carries the number of times the word ending at it has been counted.
//!
//! All walks are recursive helpers on the node type that consume one
//! character per call, so the stack depth of any lookup or update equals the
//! length of the word. Nothing here limits that length: callers feeding
//! untrusted text must bound it first, as
//! [`WordCounter`](crate::counter::WordCounter) does.
//!
//! # Ordering
//!
//! [`WordCountMap::word_counts_by_count`] returns words by descending count.
//! Equal counts keep the order of a depth-first, pre-order walk in which
//! each node's children are visited in the order they were created. A branch
//! that was pruned and later re-created moves to the end of its siblings.

use serde::{Deserialize, Serialize};

/// A word and the number of times it was counted.
///
/// Produced by [`WordCountMap::word_counts_by_count`]. It is a snapshot:
/// later changes to the map do not affect values already exported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordCount {
    word: String,
    count: usize,
}

impl WordCount {
    /// Create a new word count. Counts from the map are always at least 1.
    pub(crate) fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }

    /// The counted word.
    pub fn word(&self) -> &str {
        &self.word
    }

    /// How many times the word was counted.
    pub const fn count(&self) -> usize {
        self.count
    }
}

impl std::fmt::Display for WordCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.word, self.count)
    }
}

/// One character position in the tree.
#[derive(Debug, Clone, Default)]
struct Node {
    /// `None` only for the root.
    label: Option<char>,
    count: usize,
    /// Insertion order, labels unique among siblings.
    children: Vec<Self>,
}

impl Node {
    const fn with_label(label: char) -> Self {
        Self {
            label: Some(label),
            count: 0,
            children: Vec::new(),
        }
    }

    fn child_index(&self, label: char) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.label == Some(label))
    }

    fn child_or_insert(&mut self, label: char) -> &mut Self {
        let idx = match self.child_index(label) {
            Some(idx) => idx,
            None => {
                self.children.push(Self::with_label(label));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// A count-0 leaf holds no word and leads to none.
    const fn is_dead(&self) -> bool {
        self.count == 0 && self.children.is_empty()
    }

    fn increment(&mut self, mut rest: std::str::Chars<'_>) {
        match rest.next() {
            None => self.count += 1,
            Some(c) => self.child_or_insert(c).increment(rest),
        }
    }

    /// Returns `true` when this node became dead and should be detached by
    /// its parent.
    fn decrement(&mut self, mut rest: std::str::Chars<'_>) -> bool {
        match rest.next() {
            None => {
                if self.count == 0 {
                    return false;
                }
                self.count -= 1;
            }
            Some(c) => {
                let Some(idx) = self.child_index(c) else {
                    return false;
                };
                if !self.children[idx].decrement(rest) {
                    return false;
                }
                self.children.remove(idx);
            }
        }
        self.is_dead()
    }

    fn find(&self, mut rest: std::str::Chars<'_>) -> Option<&Self> {
        match rest.next() {
            None => Some(self),
            Some(c) => {
                let idx = self.child_index(c)?;
                self.children[idx].find(rest)
            }
        }
    }

    fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    fn stored_words(&self) -> usize {
        let own = usize::from(self.count > 0);
        own + self.children.iter().map(Self::stored_words).sum::<usize>()
    }

    /// Pre-order walk: this node's word first, then each child in order.
    fn collect(&self, prefix: &mut String, out: &mut Vec<WordCount>) {
        if let Some(label) = self.label {
            prefix.push(label);
        }
        if self.count > 0 {
            insert_by_count(out, WordCount::new(prefix.as_str(), self.count));
        }
        for child in &self.children {
            child.collect(prefix, out);
        }
        if self.label.is_some() {
            prefix.pop();
        }
    }
}

/// Insert after every entry whose count is at least `entry`'s count, keeping
/// `out` sorted descending and stable in arrival order.
fn insert_by_count(out: &mut Vec<WordCount>, entry: WordCount) {
    let idx = out.partition_point(|existing| existing.count >= entry.count);
    out.insert(idx, entry);
}

/// A map from words to occurrence counts, stored as a prefix tree.
///
/// Empty words are never stored: incrementing or decrementing `""` does
/// nothing, `contains("")` is `false`, and `get_count("")` is `None`.
///
/// # Example
///
/// ```
/// use wordtally_core::WordCountMap;
///
/// let mut map = WordCountMap::new();
/// map.increment_count("cat");
/// map.increment_count("cathode");
/// map.increment_count("cat");
///
/// assert_eq!(map.get_count("cat"), Some(2));
/// assert!(!map.contains("ca"));
///
/// let ranked = map.word_counts_by_count();
/// assert_eq!(ranked[0].word(), "cat");
/// ```
#[derive(Debug, Clone, Default)]
pub struct WordCountMap {
    root: Node,
}

impl WordCountMap {
    /// Create an empty map holding only the root node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `word`, storing it with a count of 1 if it was
    /// not present.
    pub fn increment_count(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        self.root.increment(word.chars());
    }

    /// Remove one occurrence of `word`.
    ///
    /// Does nothing if `word` is not stored. When the count drops to zero,
    /// every node that no longer leads to a stored word is pruned, walking
    /// up toward the root. The root itself is never removed.
    pub fn decrement_count(&mut self, word: &str) {
        if !self.contains(word) {
            return;
        }
        // The root's own verdict is ignored; it stays even when empty.
        let _ = self.root.decrement(word.chars());
    }

    /// Whether `word` is stored with a count greater than zero.
    pub fn contains(&self, word: &str) -> bool {
        self.get_count(word).is_some()
    }

    /// The count of `word`, or `None` if it is not stored.
    pub fn get_count(&self, word: &str) -> Option<usize> {
        if word.is_empty() {
            return None;
        }
        self.root
            .find(word.chars())
            .map(|node| node.count)
            .filter(|&count| count > 0)
    }

    /// Every stored word with its count, highest count first.
    ///
    /// Ties keep tree-walk order; see the [module docs](crate::word_count_map) for the exact
    /// rule. The result is a snapshot.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn word_counts_by_count(&self) -> Vec<WordCount> {
        let mut out = Vec::new();
        let mut prefix = String::new();
        self.root.collect(&mut prefix, &mut out);
        tracing::debug!(words = out.len(), "exported word counts");
        out
    }

    /// Total number of nodes in the tree, counting the root.
    ///
    /// An empty map reports 1.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Number of distinct words currently stored.
    pub fn len(&self) -> usize {
        self.root.stored_words()
    }

    /// Whether no words are stored.
    pub const fn is_empty(&self) -> bool {
        self.root.children.is_empty()
    }
}
