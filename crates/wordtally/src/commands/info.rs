//! Info command implementation

use clap::Args;
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tracing::{debug, instrument};
use wordtally_core::config::{Config, ConfigSources, user_config_dir};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // No subcommand-specific arguments; uses global --json flag
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const fn new() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            description: env!("CARGO_PKG_DESCRIPTION"),
            license: env!("CARGO_PKG_LICENSE"),
        }
    }
}

#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    stop_words: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_input_bytes: Option<usize>,
    max_word_chars: usize,
    cloud_title: String,
    min_font_px: u32,
    max_font_px: u32,
    font_scale: String,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        let cloud = config.cloud_options();
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            user_config_dir: user_config_dir().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            stop_words: config.stop_words_path().to_string(),
            max_input_bytes: config.max_input(),
            max_word_chars: config.max_word_chars(),
            cloud_title: cloud.title,
            min_font_px: cloud.min_font_px,
            max_font_px: cloud.max_font_px,
            font_scale: cloud.scale.as_str().to_string(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print package information
///
/// # Arguments
/// * `global_json` - Global `--json` flag from CLI
/// * `config` - Loaded configuration
/// * `sources` - Config source metadata from loading
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    let info = PackageInfo::new();

    debug!(json_output = global_json, "executing info command");

    let full_info = FullInfo {
        package: info,
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    println!(
        "{} {}",
        full_info
            .package
            .name
            .if_supports_color(Stream::Stdout, |t| t.bold()),
        full_info
            .package
            .version
            .if_supports_color(Stream::Stdout, |t| t.green())
    );
    if !full_info.package.description.is_empty() {
        println!("{}", full_info.package.description);
    }
    if !full_info.package.license.is_empty() {
        print_field("License", &full_info.package.license);
    }

    let cfg = &full_info.config;
    println!();
    println!(
        "{}",
        "Configuration".if_supports_color(Stream::Stdout, |t| t.bold())
    );
    match cfg.config_file {
        Some(ref path) => print_field("Config file", path),
        None => print_field("Config file", &"none loaded"),
    }
    if let Some(ref dir) = cfg.user_config_dir {
        print_field("User config dir", dir);
    }
    print_field("Log level", &cfg.log_level);
    if let Some(ref dir) = cfg.log_dir {
        print_field("Log directory", dir);
    }
    print_field("Stop words", &cfg.stop_words);
    match cfg.max_input_bytes {
        Some(max) => print_field("Max input bytes", &max),
        None => print_field("Max input bytes", &"unlimited"),
    }
    print_field("Max word length", &cfg.max_word_chars);

    println!();
    println!(
        "{}",
        "Word Cloud".if_supports_color(Stream::Stdout, |t| t.bold())
    );
    print_field("Title", &cfg.cloud_title);
    print_field(
        "Font range",
        &format!("{}px to {}px", cfg.min_font_px, cfg.max_font_px),
    );
    print_field("Font scale", &cfg.font_scale);

    Ok(())
}

/// Print a dimmed label followed by its value.
fn print_field<T: std::fmt::Display>(label: &str, value: &T) {
    println!(
        "{}: {}",
        label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
        value
    );
}
