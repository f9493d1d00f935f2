//! List command: every word with its count.

use std::io::{BufWriter, Write};

use clap::Args;
use tracing::{debug, instrument};

use wordtally_core::Config;

use super::{InputArgs, count_file};

/// Arguments for the `list` subcommand.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Input file and stop-word list.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Print every word of a file as `word:count`, most frequent first.
#[instrument(name = "cmd_list", skip_all, fields(file = %args.input.file))]
pub fn cmd_list(args: ListArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(file = %args.input.file, stop_words = ?args.input.stop_words, "executing list command");

    let counter = count_file(&args.input, config)?;
    let counts = counter.word_counts();

    if global_json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    let mut out = BufWriter::new(std::io::stdout().lock());
    for wc in &counts {
        writeln!(out, "{wc}")?;
    }
    out.flush()?;

    Ok(())
}
