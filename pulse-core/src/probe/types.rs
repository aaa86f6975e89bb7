use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Result of probing a single target.
///
/// Exactly one of `status` and `error` is set; use [`Outcome::success`] and
/// [`Outcome::failure`] to build one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// The normalized URL that was requested
    pub url: String,
    /// HTTP status code of the first response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Time from dispatch to response headers (or failure)
    #[serde(rename = "duration_ms", with = "duration_ms")]
    pub duration: Duration,
    /// Failure description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn success(url: impl Into<String>, status: u16, duration: Duration) -> Self {
        Self {
            url: url.into(),
            status: Some(status),
            duration,
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl ToString, duration: Duration) -> Self {
        Self {
            url: url.into(),
            status: None,
            duration,
            error: Some(error.to_string()),
        }
    }

    /// Reachable and answered with a non-error status.
    pub fn is_up(&self) -> bool {
        self.error.is_none() && self.status.is_some_and(|status| status < 400)
    }

    pub fn is_down(&self) -> bool {
        !self.is_up()
    }

    /// Got an HTTP response of any status.
    pub fn responded(&self) -> bool {
        self.error.is_none() && self.status.is_some()
    }
}

/// Up/down counts over a batch of outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    pub up: usize,
    pub down: usize,
    pub total: usize,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let up = outcomes.iter().filter(|o| o.is_up()).count();
        Self {
            up,
            down: outcomes.len() - up,
            total: outcomes.len(),
        }
    }

    pub fn all_up(&self) -> bool {
        self.down == 0
    }
}

fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(super::as_millis_f64(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = f64::deserialize(deserializer)?;
        if !millis.is_finite() || millis < 0.0 {
            return Err(serde::de::Error::custom(format!(
                "invalid duration_ms: {}",
                millis
            )));
        }
        Ok(Duration::from_nanos((millis * 1_000_000.0).round() as u64))
    }
}
