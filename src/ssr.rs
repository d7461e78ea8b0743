use crate::error::InertiaError;
use crate::page::{InertiaPage, SsrPage};
use std::time::Duration;

pub const DEFAULT_SSR_URL: &str = "http://localhost:13714";
pub const DEFAULT_SSR_TIMEOUT: Duration = Duration::from_millis(5000);

/// Client of the Inertia server-side rendering service.
///
/// Rendering is best-effort: callers are expected to fall back to client-side
/// rendering whenever [`SsrClient::render`] fails.
#[derive(Clone, Debug)]
pub struct SsrClient {
    url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl PartialEq for SsrClient {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.timeout == other.timeout
    }
}

impl Default for SsrClient {
    fn default() -> Self {
        Self::new(DEFAULT_SSR_URL, DEFAULT_SSR_TIMEOUT)
    }
}

impl SsrClient {
    /// # Arguments
    /// * `url`     -   Base url of the SSR server, e.g. "http://127.0.0.1:13714". Pages are
    ///                 posted to `{url}/render`.
    /// * `timeout` -   Upper bound for the whole render request.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let url: String = url.into();

        Self {
            url: url.trim_end_matches('/').to_string(),
            timeout,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Posts the page json to the SSR server and parses the rendered `{head, body}` fragment.
    ///
    /// # Errors
    /// Returns [`InertiaError::SsrError`] on network errors, timeouts, non-2xx statuses
    /// and malformed bodies.
    pub async fn render(&self, page: &InertiaPage) -> Result<SsrPage, InertiaError> {
        let endpoint = format!("{}/render", self.url);

        let response = self
            .http
            .post(&endpoint)
            .timeout(self.timeout)
            .json(page)
            .send()
            .await
            .map_err(|err| {
                InertiaError::SsrError(format!("Failed to reach {}: {}", endpoint, err))
            })?;

        let response = response.error_for_status().map_err(|err| {
            InertiaError::SsrError(format!("SSR server answered with an error: {}", err))
        })?;

        response.json::<SsrPage>().await.map_err(|err| {
            InertiaError::SsrError(format!("Malformed SSR response body: {}", err))
        })
    }
}
