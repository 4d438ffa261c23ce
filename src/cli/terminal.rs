//! Terminal capability detection and utilities

use std::{borrow::Cow, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};
use opbrowse::{StyleRegion, domain::Palette, domain::layer};
use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Extension trait for colorizing output
pub trait Colorize {
    /// Color as success (green)
    fn success(&self) -> String;
    /// Color as warning (amber)
    fn warning(&self) -> String;
    /// Color as info (blue)
    fn info(&self) -> String;
    /// Dim the text
    fn dim(&self) -> String;
}

impl Colorize for str {
    fn success(&self) -> String {
        if supports_color() {
            self.fg::<css::Green>().to_string()
        } else {
            self.to_string()
        }
    }

    fn warning(&self) -> String {
        if supports_color() {
            self.fg::<css::Orange>().to_string()
        } else {
            self.to_string()
        }
    }

    fn info(&self) -> String {
        if supports_color() {
            self.fg::<css::LightBlue>().to_string()
        } else {
            self.to_string()
        }
    }

    fn dim(&self) -> String {
        if supports_color() {
            self.dimmed().to_string()
        } else {
            self.to_string()
        }
    }
}

impl Colorize for String {
    fn success(&self) -> String {
        self.as_str().success()
    }

    fn warning(&self) -> String {
        self.as_str().warning()
    }

    fn info(&self) -> String {
        self.as_str().info()
    }

    fn dim(&self) -> String {
        self.as_str().dim()
    }
}

/// Renders `text` with each highlighted segment in its palette colour.
///
/// Overlapping regions are resolved by [`layer`], so comments always win
/// over the tags and attributes written inside them. Returns the text
/// unchanged when `colored` is false.
pub fn paint(text: &str, regions: &[StyleRegion], palette: &Palette, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() * 2);
    for segment in layer(text, regions) {
        let slice = segment.text(text);
        match segment.kind {
            Some(kind) => {
                let color = palette.color(kind);
                out.push_str(&slice.truecolor(color.r, color.g, color.b).to_string());
            }
            None => out.push_str(slice),
        }
    }
    out
}

/// A spinner on stderr for blocking network calls. Hidden when stderr is not
/// a terminal.
pub fn spinner(message: impl Into<Cow<'static, str>>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message);
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
