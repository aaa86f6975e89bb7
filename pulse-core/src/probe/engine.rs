use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::{Semaphore, TryAcquireError};
use tokio::task::{JoinError, JoinSet};
use tokio::time::{timeout, Instant};
use tracing::{debug, instrument, warn};

use super::config::ProbeConfig;
use super::transport::{HttpTransport, Transport};
use super::types::Outcome;
use crate::error::{ProbeError, Result};
use crate::target::{index_targets, normalize_with_scheme};

/// Called once per finished probe with `(completed, total, outcome)`.
pub type ProgressCallback = Box<dyn Fn(usize, usize, &Outcome) + Send + Sync>;

/// Probes batches of targets with a fixed concurrency ceiling.
#[derive(Clone)]
pub struct ProbeEngine {
    config: Arc<ProbeConfig>,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ProbeEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProbeEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ProbeEngine {
    /// Build an engine that probes over HTTP(S) with reqwest.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    pub fn with_transport<T: Transport + 'static>(config: ProbeConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Probe a single target. Failures are reported in the outcome.
    pub async fn probe_one(&self, target: &str) -> Outcome {
        probe(self.transport.as_ref(), target, &self.config).await
    }

    /// Probe every target and return one outcome per target, in input order.
    pub async fn probe_all<S: AsRef<str>>(&self, targets: &[S]) -> Vec<Outcome> {
        self.probe_all_with_progress(targets, None).await
    }

    pub async fn probe_all_with_progress<S: AsRef<str>>(
        &self,
        targets: &[S],
        progress: Option<ProgressCallback>,
    ) -> Vec<Outcome> {
        let total = targets.len();
        let concurrency = self.config.concurrency;
        let semaphore = Arc::new(Semaphore::new(concurrency));

        debug!(total, concurrency, "Starting probe batch");

        let mut tasks = JoinSet::new();
        let mut slots: Vec<Option<Outcome>> = vec![None; total];
        let mut completed = 0;

        let mut record = |joined: std::result::Result<(usize, Outcome), JoinError>,
                          slots: &mut Vec<Option<Outcome>>| {
            match joined {
                Ok((index, outcome)) => {
                    completed += 1;
                    if let Some(progress) = progress.as_ref() {
                        progress(completed, total, &outcome);
                    }
                    slots[index] = Some(outcome);
                }
                Err(e) => {
                    warn!(error = %e, "Probe task did not complete");
                }
            }
        };

        for target in index_targets(targets.iter().map(AsRef::<str>::as_ref)) {
            // A slot is taken before the task exists, so at most `concurrency`
            // tasks are alive and targets are admitted in input order.
            let permit = loop {
                match Arc::clone(&semaphore).try_acquire_owned() {
                    Ok(permit) => break Some(permit),
                    Err(TryAcquireError::NoPermits) => match tasks.join_next().await {
                        Some(joined) => record(joined, &mut slots),
                        None => break None,
                    },
                    Err(TryAcquireError::Closed) => break None,
                }
            };

            let Some(permit) = permit else {
                let url = normalize_with_scheme(&target.raw, self.config.default_scheme);
                record(
                    Ok((
                        target.index,
                        Outcome::failure(
                            url,
                            ProbeError::TaskFailed("admission gate closed".to_string()),
                            Duration::ZERO,
                        ),
                    )),
                    &mut slots,
                );
                continue;
            };

            let transport = Arc::clone(&self.transport);
            let config = Arc::clone(&self.config);
            tasks.spawn(async move {
                let outcome = guarded_probe(transport.as_ref(), &target.raw, &config).await;
                drop(permit);
                (target.index, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            record(joined, &mut slots);
        }

        let outcomes: Vec<Outcome> = slots
            .into_iter()
            .zip(targets)
            .map(|(slot, raw)| {
                slot.unwrap_or_else(|| {
                    Outcome::failure(
                        normalize_with_scheme(AsRef::<str>::as_ref(raw), self.config.default_scheme),
                        ProbeError::TaskFailed("probe ended without a result".to_string()),
                        Duration::ZERO,
                    )
                })
            })
            .collect();

        debug!(
            total,
            up = outcomes.iter().filter(|o| o.is_up()).count(),
            "Finished probe batch"
        );

        outcomes
    }
}

/// Runs one probe, turning a panic inside the transport into an error outcome
/// so the target keeps its slot and its progress tick.
async fn guarded_probe(transport: &dyn Transport, raw: &str, config: &ProbeConfig) -> Outcome {
    match AssertUnwindSafe(probe(transport, raw, config))
        .catch_unwind()
        .await
    {
        Ok(outcome) => outcome,
        Err(payload) => {
            let reason = panic_message(payload.as_ref());
            warn!(target = %raw, reason = %reason, "Probe panicked");
            Outcome::failure(
                normalize_with_scheme(raw, config.default_scheme),
                ProbeError::TaskFailed(format!("probe panicked: {}", reason)),
                Duration::ZERO,
            )
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[instrument(skip_all, fields(target = %raw))]
async fn probe(transport: &dyn Transport, raw: &str, config: &ProbeConfig) -> Outcome {
    let url = normalize_with_scheme(raw, config.default_scheme);

    let start = Instant::now();
    let result = timeout(config.timeout, transport.fetch(&url)).await;
    let duration = start.elapsed();

    match result {
        Ok(Ok(status)) => {
            debug!(url = %url, status, elapsed_ms = duration.as_millis() as u64, "Probe succeeded");
            Outcome::success(url, status, duration)
        }
        Ok(Err(e)) => {
            debug!(url = %url, error = %e, "Probe failed");
            Outcome::failure(url, e, duration)
        }
        Err(_) => {
            debug!(url = %url, "Probe hit its deadline");
            Outcome::failure(url, ProbeError::Timeout(config.timeout), duration)
        }
    }
}
