use std::time::Duration;

use crate::target::Scheme;

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_USER_AGENT: &str = concat!("pulse/", env!("CARGO_PKG_VERSION"));
/// Hop limit when redirects are followed.
pub const MAX_REDIRECTS: usize = 5;

/// Settings fixed at engine construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Maximum number of probes in flight at once
    pub concurrency: usize,
    /// Deadline for each probe, up to response headers
    pub timeout: Duration,
    /// Validate server certificates
    pub verify_tls: bool,
    /// Follow 3xx responses instead of reporting the first hop
    pub follow_redirects: bool,
    /// Scheme given to targets that don't specify one
    pub default_scheme: Scheme,
    pub user_agent: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            verify_tls: false,
            follow_redirects: false,
            default_scheme: Scheme::Https,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// A zero timeout would fail every probe, so it falls back to the default.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            timeout
        };
        self
    }

    pub fn with_verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    pub fn with_follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    pub fn with_default_scheme(mut self, scheme: Scheme) -> Self {
        self.default_scheme = scheme;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProbeConfig::default();
        assert_eq!(config.concurrency, 10);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.verify_tls);
        assert!(!config.follow_redirects);
        assert_eq!(config.default_scheme, Scheme::Https);
        assert!(config.user_agent.starts_with("pulse/"));
    }

    #[test]
    fn test_builder() {
        let config = ProbeConfig::new()
            .with_concurrency(64)
            .with_timeout(Duration::from_millis(1500))
            .with_verify_tls(true)
            .with_follow_redirects(true)
            .with_default_scheme(Scheme::Http)
            .with_user_agent("probe-test/1.0");

        assert_eq!(config.concurrency, 64);
        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert!(config.verify_tls);
        assert!(config.follow_redirects);
        assert_eq!(config.default_scheme, Scheme::Http);
        assert_eq!(config.user_agent, "probe-test/1.0");
    }

    #[test]
    fn test_clamps_degenerate_values() {
        let config = ProbeConfig::new()
            .with_concurrency(0)
            .with_timeout(Duration::ZERO);
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }
}
