//! Command implementations.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use tracing::debug;

use wordtally_core::{Config, StopWords, WordCounter};

pub mod cloud;
pub mod info;
pub mod list;

/// Input arguments shared by the counting subcommands.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Text file to count.
    pub file: Utf8PathBuf,

    /// Stop-word list, one word per line (default: StopWords.txt).
    #[arg(long, value_name = "FILE")]
    pub stop_words: Option<Utf8PathBuf>,
}

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Load the stop words, then count every word of the input file.
///
/// The stop-word list is loaded first: a missing list fails the command
/// before the input is touched.
pub fn count_file(input: &InputArgs, config: &Config) -> anyhow::Result<WordCounter> {
    let stop_path = input
        .stop_words
        .clone()
        .unwrap_or_else(|| config.stop_words_path());
    let stop_words = StopWords::load(&stop_path).context("failed to load stop words")?;

    let content = read_input_file(&input.file, config.max_input())?;

    let mut counter = WordCounter::new(stop_words).with_max_word_chars(config.max_word_chars());
    let counted = counter.ingest(&content);
    debug!(
        file = %input.file,
        counted,
        distinct = counter.map().len(),
        "counted input file"
    );
    Ok(counter)
}
