pub mod colors;
pub mod error;
pub mod output;
pub mod probe;
pub mod target;

pub use error::{ProbeError, Result};
pub use target::{normalize, normalize_with_scheme, parse_targets, Scheme, Target};

pub use output::{OutcomeFilter, OutputFormat, OutputFormatter};
pub use probe::{
    HttpTransport, Outcome, ProbeConfig, ProbeEngine, ProgressCallback, Summary, Transport,
};
