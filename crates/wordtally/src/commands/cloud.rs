//! Cloud command: render the most frequent words as HTML.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, info, instrument};

use wordtally_core::{Config, FontScale, cloud};

use super::{InputArgs, count_file};

/// Arguments for the `cloud` subcommand.
#[derive(Args, Debug)]
pub struct CloudArgs {
    /// Input file and stop-word list.
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of words to include (all words if fewer exist).
    #[arg(value_name = "N")]
    pub count: usize,

    /// HTML file to write.
    #[arg(value_name = "OUTPUT")]
    pub output: Utf8PathBuf,

    /// Page title.
    #[arg(long)]
    pub title: Option<String>,

    /// Font size in pixels of the least frequent word.
    #[arg(long, value_name = "PX")]
    pub min_font: Option<u32>,

    /// Font size in pixels of the most frequent word.
    #[arg(long, value_name = "PX")]
    pub max_font: Option<u32>,

    /// How counts map onto font sizes.
    #[arg(long, value_enum)]
    pub scale: Option<FontScale>,
}

#[derive(Serialize)]
struct CloudSummary<'a> {
    output: &'a str,
    words: usize,
    distinct_words: usize,
}

/// Write an HTML word cloud of the top `N` words of a file.
#[instrument(name = "cmd_cloud", skip_all, fields(file = %args.input.file, output = %args.output))]
pub fn cmd_cloud(args: CloudArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    debug!(count = args.count, scale = ?args.scale, "executing cloud command");

    let mut options = config.cloud_options();
    if let Some(title) = args.title {
        options.title = title;
    }
    options.min_font_px = args.min_font.unwrap_or(options.min_font_px);
    options.max_font_px = args.max_font.unwrap_or(options.max_font_px);
    options.scale = args.scale.unwrap_or(options.scale);
    // Fail on bad options before reading any input.
    options.validate()?;

    let counter = count_file(&args.input, config)?;
    let top = counter.top(args.count);

    let html = cloud::render_html(&top, &options)
        .with_context(|| format!("failed to render word cloud for {}", args.input.file))?;
    std::fs::write(args.output.as_std_path(), html)
        .with_context(|| format!("failed to write {}", args.output))?;
    info!(words = top.len(), "wrote word cloud");

    if global_json {
        let summary = CloudSummary {
            output: args.output.as_str(),
            words: top.len(),
            distinct_words: counter.map().len(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} {} words to {}",
            "Wrote".if_supports_color(Stream::Stdout, |t| t.green()),
            top.len(),
            args.output,
        );
    }

    Ok(())
}
