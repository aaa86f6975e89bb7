//! Bounded-concurrency liveness probing.
//!
//! - [`ProbeEngine`] runs one GET per target under a concurrency ceiling and
//!   returns outcomes in input order
//! - [`Transport`] is the seam the engine sends requests through;
//!   [`HttpTransport`] is the reqwest-backed implementation
//! - [`Outcome`] and [`Summary`] are what callers render

mod config;
mod engine;
mod transport;
mod types;

pub use config::{
    ProbeConfig, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, MAX_REDIRECTS,
};
pub use engine::{ProbeEngine, ProgressCallback};
pub use transport::{HttpTransport, Transport};
pub use types::{Outcome, Summary};
