mod human;
mod json;
mod quiet;

pub use human::{format_outcome, HumanFormatter};
pub use json::JsonFormatter;
pub use quiet::QuietFormatter;

use serde::{Deserialize, Serialize};

use crate::probe::{Outcome, Summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
    Quiet,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" | "pretty" | "table" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            "quiet" | "plain" | "list" => Ok(OutputFormat::Quiet),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Which outcomes reach the formatter. Applied after probing finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutcomeFilter {
    #[default]
    All,
    Up,
    Down,
    /// Any HTTP answer, whatever the status.
    Responded,
}

impl OutcomeFilter {
    pub fn matches(self, outcome: &Outcome) -> bool {
        match self {
            OutcomeFilter::All => true,
            OutcomeFilter::Up => outcome.is_up(),
            OutcomeFilter::Down => outcome.is_down(),
            OutcomeFilter::Responded => outcome.responded(),
        }
    }

    pub fn apply(self, outcomes: &[Outcome]) -> Vec<Outcome> {
        outcomes
            .iter()
            .filter(|outcome| self.matches(outcome))
            .cloned()
            .collect()
    }
}

pub trait OutputFormatter {
    fn format_outcomes(&self, outcomes: &[Outcome]) -> String;

    /// Machine-oriented formats return `None` and leave the summary out.
    fn format_summary(&self, summary: &Summary) -> Option<String>;
}

/// Options shared by the formatter constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub use_colors: bool,
    pub show_status: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_colors: true,
            show_status: false,
        }
    }
}

pub fn get_formatter(format: OutputFormat, options: FormatOptions) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Human => {
            let formatter = HumanFormatter::new();
            if options.use_colors {
                Box::new(formatter)
            } else {
                Box::new(formatter.without_colors())
            }
        }
        OutputFormat::Json => Box::new(JsonFormatter::new()),
        OutputFormat::Quiet => Box::new(QuietFormatter::new().with_status(options.show_status)),
    }
}
