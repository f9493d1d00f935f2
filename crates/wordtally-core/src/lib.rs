//! Core library for wordtally.
//!
//! This crate provides the word-frequency index used by the `wordtally`
//! CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`word_count_map`] - Prefix-tree word counts and the ranked export
//! - [`text`] - Token normalization
//! - [`stop_words`] - Stop-word lists
//! - [`counter`] - Counting sessions over raw text
//! - [`cloud`] - HTML word-cloud rendering
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use wordtally_core::{StopWords, WordCounter};
//!
//! let mut counter = WordCounter::new(StopWords::from_lines("the\nand"));
//! counter.ingest("The cat and the hat. The cat!");
//!
//! let top = counter.top(1);
//! assert_eq!(top[0].word(), "cat");
//! assert_eq!(top[0].count(), 2);
//! ```
#![deny(unsafe_code)]

pub mod cloud;
pub mod config;
pub mod counter;
pub mod error;
pub mod stop_words;
pub mod text;
pub mod word_count_map;

#[cfg(test)]
mod proptests;

pub use cloud::{CloudOptions, FontScale};
pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};
pub use counter::{DEFAULT_MAX_WORD_CHARS, WordCounter};
pub use error::{ConfigError, ConfigResult, RenderError, StopWordsError};
pub use stop_words::StopWords;
pub use word_count_map::{WordCount, WordCountMap};
