//! HTML word clouds.
//!
//! Renders ranked word counts as a standalone HTML page in which each word's
//! font size grows with its count.

use serde::{Deserialize, Serialize};

use crate::error::{RenderError, RenderResult};
use crate::word_count_map::WordCount;

/// Default page title.
pub const DEFAULT_TITLE: &str = "Word Cloud";

/// Default smallest font size in pixels.
pub const DEFAULT_MIN_FONT_PX: u32 = 12;

/// Default largest font size in pixels.
pub const DEFAULT_MAX_FONT_PX: u32 = 72;

/// How counts map onto the font range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum FontScale {
    /// Font size proportional to count.
    #[default]
    Linear,
    /// Font size proportional to the logarithm of count, which keeps one
    /// dominant word from shrinking all others to the minimum.
    Log,
}

impl FontScale {
    /// Returns the scale name as used in config files.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Log => "log",
        }
    }

    /// Position of `count` within `[lo, hi]`, from 0.0 to 1.0.
    fn position(self, count: usize, lo: usize, hi: usize) -> f64 {
        if hi <= lo {
            return 1.0;
        }
        let (count, lo, hi) = match self {
            Self::Linear => (count as f64, lo as f64, hi as f64),
            Self::Log => ((count as f64).ln(), (lo as f64).ln(), (hi as f64).ln()),
        };
        ((count - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

impl std::fmt::Display for FontScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings for [`render_html`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudOptions {
    /// Page title and heading.
    pub title: String,
    /// Font size of the least frequent word.
    pub min_font_px: u32,
    /// Font size of the most frequent word.
    pub max_font_px: u32,
    /// Mapping from count to font size.
    pub scale: FontScale,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            min_font_px: DEFAULT_MIN_FONT_PX,
            max_font_px: DEFAULT_MAX_FONT_PX,
            scale: FontScale::default(),
        }
    }
}

impl CloudOptions {
    /// Check that the font range is usable.
    pub const fn validate(&self) -> RenderResult<()> {
        if self.min_font_px == 0 || self.min_font_px > self.max_font_px {
            return Err(RenderError::InvalidFontRange {
                min: self.min_font_px,
                max: self.max_font_px,
            });
        }
        Ok(())
    }

    /// Font size for `count` given the smallest and largest counts shown.
    ///
    /// Never decreases as `count` grows. When every word has the same count,
    /// all of them get the largest size.
    pub fn font_px(&self, count: usize, lo: usize, hi: usize) -> u32 {
        let span = f64::from(self.max_font_px.saturating_sub(self.min_font_px));
        let offset = (self.scale.position(count, lo, hi) * span).round() as u32;
        self.min_font_px + offset
    }
}

/// Render `words` as an HTML word cloud, keeping their order.
#[tracing::instrument(skip_all, fields(words = words.len(), scale = %options.scale))]
pub fn render_html(words: &[WordCount], options: &CloudOptions) -> RenderResult<String> {
    options.validate()?;

    let lo = words.iter().map(WordCount::count).min().unwrap_or(0);
    let hi = words.iter().map(WordCount::count).max().unwrap_or(0);
    let title = escape_html(&options.title);

    let mut html = String::with_capacity(512 + words.len() * 64);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str(
        "<style>\n\
         body { font-family: sans-serif; max-width: 60em; margin: 2em auto; text-align: center; }\n\
         .cloud { line-height: 1.1; }\n\
         .cloud span { display: inline-block; margin: 0.1em 0.3em; }\n\
         </style>\n",
    );
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n<div class=\"cloud\">\n"));
    for wc in words {
        let word = escape_html(wc.word());
        let size = options.font_px(wc.count(), lo, hi);
        html.push_str(&format!(
            "<span style=\"font-size: {size}px\" title=\"{word}: {count}\">{word}</span>\n",
            count = wc.count(),
        ));
    }
    html.push_str("</div>\n</body>\n</html>\n");

    tracing::debug!(min_count = lo, max_count = hi, "rendered word cloud");
    Ok(html)
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
