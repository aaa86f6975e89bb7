use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::redirect::Policy;
use tracing::debug;

use super::config::{ProbeConfig, MAX_REDIRECTS};
use crate::error::{ProbeError, Result};

/// Issues one GET and reports the status code once headers arrive.
///
/// Implementations must not read the response body.
pub trait Transport: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<u16>>;
}

/// [`Transport`] backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .danger_accept_invalid_certs(!config.verify_tls)
            .redirect(redirect)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
        })
    }
}

impl Transport for HttpTransport {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<u16>> {
        async move {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(|e| ProbeError::classify(&e, self.timeout))?;

            let status = response.status().as_u16();
            debug!(url, status, version = ?response.version(), "Received response headers");

            // Dropping the response closes the body unread.
            drop(response);
            Ok(status)
        }
        .boxed()
    }
}
