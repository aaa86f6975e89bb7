//! Catppuccin-inspired color palette for terminal output.
//!
//! Uses standard ANSI bright colors for maximum terminal compatibility.
//! Nothing here holds state: callers pass `use_colors` with every paint.

use colored::{ColoredString, Colorize};

/// Extension trait for applying Catppuccin-inspired colors to strings.
pub trait CatppuccinExt {
    fn ctp_red(&self) -> ColoredString;
    fn ctp_green(&self) -> ColoredString;
    fn ctp_yellow(&self) -> ColoredString;
    fn peach(&self) -> ColoredString;
    fn sky(&self) -> ColoredString;
    fn lavender(&self) -> ColoredString;
    fn overlay1(&self) -> ColoredString;
    fn ctp_white(&self) -> ColoredString;
}

impl<S: AsRef<str>> CatppuccinExt for S {
    fn ctp_red(&self) -> ColoredString {
        self.as_ref().bright_red()
    }

    fn ctp_green(&self) -> ColoredString {
        self.as_ref().bright_green()
    }

    fn ctp_yellow(&self) -> ColoredString {
        self.as_ref().bright_yellow()
    }

    // Peach -> yellow (darker than ctp_yellow on most palettes)
    fn peach(&self) -> ColoredString {
        self.as_ref().yellow()
    }

    fn sky(&self) -> ColoredString {
        self.as_ref().bright_cyan()
    }

    fn lavender(&self) -> ColoredString {
        self.as_ref().bright_purple()
    }

    fn overlay1(&self) -> ColoredString {
        self.as_ref().bright_black()
    }

    fn ctp_white(&self) -> ColoredString {
        self.as_ref().bright_white()
    }
}

/// Semantic color roles used by the formatters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Redirect,
    Warning,
    Failure,
    Label,
    Heading,
    Muted,
    Plain,
}

impl Tone {
    /// Tone for an HTTP status code class.
    pub fn for_status(status: u16) -> Self {
        match status {
            100..=199 => Tone::Plain,
            200..=299 => Tone::Success,
            300..=399 => Tone::Redirect,
            400..=499 => Tone::Warning,
            _ => Tone::Failure,
        }
    }

    pub fn paint(self, text: &str, use_colors: bool) -> String {
        if !use_colors {
            return text.to_string();
        }
        match self {
            Tone::Success => text.ctp_green().bold().to_string(),
            Tone::Redirect => text.ctp_yellow().to_string(),
            Tone::Warning => text.peach().bold().to_string(),
            Tone::Failure => text.ctp_red().bold().to_string(),
            Tone::Label => text.sky().bold().to_string(),
            Tone::Heading => text.lavender().bold().to_string(),
            Tone::Muted => text.overlay1().to_string(),
            Tone::Plain => text.ctp_white().to_string(),
        }
    }
}
