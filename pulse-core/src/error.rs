use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("TLS handshake failed: {0}")]
    Tls(String),

    #[error("timed out after {}", format_timeout(.0))]
    Timeout(Duration),

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("probe task failed: {0}")]
    TaskFailed(String),
}

impl ProbeError {
    /// Sorts a transport failure into the probe error taxonomy.
    ///
    /// reqwest does not expose TLS failures as their own kind, so those are
    /// recognised from the error chain text. The top-level message only
    /// repeats the request URL, so the detail starts at its source.
    pub fn classify(error: &reqwest::Error, timeout: Duration) -> Self {
        use std::error::Error as _;

        if error.is_timeout() {
            return ProbeError::Timeout(timeout);
        }

        let detail = match error.source() {
            Some(source) => error_chain(source),
            None => error.to_string(),
        };
        if is_tls_failure(&detail) {
            return ProbeError::Tls(detail);
        }
        if error.is_connect() {
            return ProbeError::Connect(detail);
        }
        if error.is_builder() {
            return ProbeError::InvalidUrl(detail);
        }
        ProbeError::Protocol(detail)
    }
}

fn format_timeout(timeout: &Duration) -> String {
    if timeout.subsec_nanos() == 0 {
        format!("{}s", timeout.as_secs())
    } else if timeout.subsec_nanos() % 1_000_000 == 0 {
        format!("{}ms", timeout.as_millis())
    } else {
        format!("{:?}", timeout)
    }
}

/// Flattens an error and its sources into one line.
fn error_chain(mut err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    while let Some(source) = err.source() {
        let text = source.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        err = source;
    }
    parts.join(": ")
}

fn is_tls_failure(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    lower.contains("certificate")
        || lower.contains("tls")
        || lower.contains("ssl")
        || lower.contains("handshake")
}

pub type Result<T> = std::result::Result<T, ProbeError>;
