use super::OutputFormatter;
use crate::probe::{Outcome, Summary};

/// One URL per line, optionally prefixed with `[status]`.
///
/// Pair with [`super::OutcomeFilter::Responded`] to list every endpoint that
/// answered over HTTP.
#[derive(Debug, Clone, Default)]
pub struct QuietFormatter {
    show_status: bool,
}

impl QuietFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, show_status: bool) -> Self {
        self.show_status = show_status;
        self
    }

    fn line(&self, outcome: &Outcome) -> String {
        if !self.show_status {
            return outcome.url.clone();
        }
        match outcome.status {
            Some(status) => format!("[{}] {}", status, outcome.url),
            None => format!("[ERR] {}", outcome.url),
        }
    }
}

impl OutputFormatter for QuietFormatter {
    fn format_outcomes(&self, outcomes: &[Outcome]) -> String {
        outcomes
            .iter()
            .map(|outcome| self.line(outcome))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_summary(&self, _summary: &Summary) -> Option<String> {
        None
    }
}
