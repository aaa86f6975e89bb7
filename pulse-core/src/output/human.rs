use std::time::Duration;

use super::OutputFormatter;
use crate::colors::Tone;
use crate::probe::{Outcome, Summary};

const STATUS_WIDTH: usize = 6;
const TIME_WIDTH: usize = 9;

fn format_duration(duration: Duration) -> String {
    let millis = duration.as_secs_f64() * 1000.0;
    if millis < 10.0 {
        format!("{:.1}ms", millis)
    } else if millis < 1000.0 {
        format!("{:.0}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Render one outcome as a table row.
///
/// Padding is applied before painting so ANSI codes don't skew the columns.
pub fn format_outcome(outcome: &Outcome, use_colors: bool) -> String {
    let status_cell = match outcome.status {
        Some(status) => Tone::for_status(status).paint(
            &format!("{:<width$}", status, width = STATUS_WIDTH),
            use_colors,
        ),
        None => Tone::Failure.paint(
            &format!("{:<width$}", "ERR", width = STATUS_WIDTH),
            use_colors,
        ),
    };

    let time_cell = Tone::Muted.paint(
        &format!(
            "{:>width$}",
            format_duration(outcome.duration),
            width = TIME_WIDTH
        ),
        use_colors,
    );

    let mut line = format!(
        "{} {}  {}",
        status_cell,
        time_cell,
        Tone::Plain.paint(&outcome.url, use_colors)
    );
    if let Some(ref error) = outcome.error {
        line.push_str("  ");
        line.push_str(&Tone::Failure.paint(&format!("({})", error), use_colors));
    }
    line
}

pub struct HumanFormatter {
    use_colors: bool,
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanFormatter {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn header(&self, text: &str) -> String {
        if self.use_colors {
            format!(
                "{}\n{}",
                Tone::Heading.paint(text, true),
                Tone::Muted.paint(&"─".repeat(text.len()), true)
            )
        } else {
            format!("{}\n{}", text, "-".repeat(text.len()))
        }
    }

    fn columns(&self) -> String {
        let text = format!(
            "{:<status$} {:>time$}  {}",
            "STATUS",
            "TIME",
            "URL",
            status = STATUS_WIDTH,
            time = TIME_WIDTH
        );
        Tone::Label.paint(&text, self.use_colors)
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_outcomes(&self, outcomes: &[Outcome]) -> String {
        let mut output = Vec::with_capacity(outcomes.len() + 3);

        output.push(self.header("Probe results"));
        if outcomes.is_empty() {
            output.push(Tone::Muted.paint("  no targets to show", self.use_colors));
            return output.join("\n");
        }

        output.push(self.columns());
        for outcome in outcomes {
            output.push(format_outcome(outcome, self.use_colors));
        }

        output.join("\n")
    }

    fn format_summary(&self, summary: &Summary) -> Option<String> {
        let up = Tone::Success.paint(&format!("✓ {} up", summary.up), self.use_colors);
        let down = if summary.down > 0 {
            Tone::Failure.paint(&format!("✗ {} down", summary.down), self.use_colors)
        } else {
            Tone::Muted.paint("✗ 0 down", self.use_colors)
        };
        let noun = if summary.total == 1 { "target" } else { "targets" };

        Some(format!(
            "\n{}  {}  {}",
            Tone::Label.paint(&format!("{} {}", summary.total, noun), self.use_colors),
            up,
            down
        ))
    }
}
