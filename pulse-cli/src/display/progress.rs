//! Progress bar for probe batches, with tracing integration.
//!
//! While a bar is active, log lines are routed through `ProgressBar::println`
//! so they appear above the bar instead of tearing through it.

use std::io::Write;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use pulse_core::ProgressCallback;

/// Global holder for the active batch progress bar.
static ACTIVE_BAR: Mutex<Option<ProgressBar>> = Mutex::new(None);

fn set_active_bar(bar: Option<ProgressBar>) {
    let mut guard = ACTIVE_BAR.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = bar;
}

fn active_bar() -> Option<ProgressBar> {
    ACTIVE_BAR
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Progress display for one probe batch. Clears itself when dropped.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        bar.enable_steady_tick(Duration::from_millis(80));

        set_active_bar(Some(bar.clone()));
        Self { bar }
    }

    /// Callback for the engine that advances the bar as probes finish.
    pub fn callback(&self) -> ProgressCallback {
        let bar = self.bar.clone();
        Box::new(move |completed, _total, outcome| {
            bar.set_position(completed as u64);
            bar.set_message(outcome.url.clone());
        })
    }
}

impl Drop for BatchProgress {
    fn drop(&mut self) {
        set_active_bar(None);
        self.bar.finish_and_clear();
    }
}

/// A writer that routes output through the active progress bar.
pub struct ProgressWriter {
    buffer: Vec<u8>,
}

impl ProgressWriter {
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    fn emit(line: &str) -> std::io::Result<()> {
        match active_bar() {
            Some(bar) => {
                bar.println(line);
                Ok(())
            }
            None => {
                let mut stderr = std::io::stderr();
                stderr.write_all(line.as_bytes())?;
                stderr.write_all(b"\n")
            }
        }
    }
}

impl Default for ProgressWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        while let Some(newline_pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
            let line = String::from_utf8_lossy(&line);
            Self::emit(line.trim_end_matches('\n'))?;
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let line = String::from_utf8_lossy(&self.buffer).trim_end().to_string();
            self.buffer.clear();
            if !line.is_empty() {
                Self::emit(&line)?;
            }
        }
        Ok(())
    }
}

impl Drop for ProgressWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// A MakeWriter implementation for tracing-subscriber that creates ProgressWriters.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProgressWriterFactory;

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ProgressWriterFactory {
    type Writer = ProgressWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ProgressWriter::new()
    }
}
