/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::sites::client::{FetchRequest, Transport};
use crate::sites::errors::SitesError;
use log::{debug, error, warn};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

// Shutterfly Sites command endpoint
pub const CMD_ENDPOINT: &str = "https://cmd.shutterfly.com/commands/pictures/getitems";

/// How failed requests are reissued.
///
/// Only network failures, HTTP 429 and HTTP 5xx are retried. The delay doubles
/// after every attempt starting at `initial_backoff` and never exceeds `max_backoff`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    /// Single attempt, failures are returned immediately
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delay to wait after the given (1 based) failed attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

/// Connection settings for the [`ApiClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
    pub request_interval: Duration,
    pub retry: RetryPolicy,
    pub user_agent: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: CMD_ENDPOINT.to_string(),
            timeout: Duration::from_secs(60),
            request_interval: Duration::from_millis(250),
            retry: RetryPolicy::default(),
            user_agent: None,
        }
    }
}

/// Directly communicates with the command endpoint.
///
/// The wrapped `reqwest::Client` keeps a cookie store, so a single `ApiClient`
/// is the session for a whole crawl.
pub struct ApiClient {
    options: ClientOptions,
    https_client: reqwest::Client,
    last_request: Mutex<Option<Instant>>,
}

impl ApiClient {
    /// Creates a client with its own fresh session
    pub fn new(options: ClientOptions) -> Result<Self, SitesError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(options.timeout);
        if let Some(user_agent) = &options.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        Ok(Self {
            https_client: builder.build()?,
            options,
            last_request: Mutex::new(None),
        })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Performs the POST for a command, retrying transient failures per the policy
    pub async fn post(&self, request: &FetchRequest<'_>) -> Result<String, SitesError> {
        let req_url = url::Url::parse_with_params(
            &self.options.base_url,
            &[("site", request.site_name)],
        )?;
        let max_attempts = self.options.retry.max_attempts.max(1);

        let mut attempt = 1;
        loop {
            match self.post_once(&req_url, request).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt < max_attempts && err.is_retryable() => {
                    let delay = self.options.retry.backoff(attempt);
                    warn!(
                        "Attempt {}/{} for node {} failed: {}. Retrying in {:?}",
                        attempt, max_attempts, request.node_id, err, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    error!("Request for node {} failed: {}", request.node_id, err);
                    return Err(err);
                }
            }
        }
    }

    async fn post_once(
        &self,
        req_url: &url::Url,
        request: &FetchRequest<'_>,
    ) -> Result<String, SitesError> {
        self.throttle().await;
        debug!(
            "POST-ing {} for site {} with nodeId {}",
            request.layout, request.site_name, request.node_id
        );
        let resp = self
            .https_client
            .post(req_url.clone())
            .form(&request.form())
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() >= 400 {
            return Err(SitesError::HttpStatus {
                status: status.as_u16(),
                url: req_url.to_string(),
            });
        }
        debug!("Request successful ({})", status);
        Ok(resp.text().await?)
    }

    // Holds back until `request_interval` has passed since the previous request
    async fn throttle(&self) {
        let wait = {
            let mut last = self
                .last_request
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            let now = Instant::now();
            let next_allowed = last.map(|prev| prev + self.options.request_interval);
            let start = match next_allowed {
                Some(at) if at > now => at,
                _ => now,
            };
            *last = Some(start);
            start - now
        };
        if !wait.is_zero() {
            tokio::time::sleep(wait).await;
        }
    }
}

impl Transport for ApiClient {
    async fn fetch(&self, request: &FetchRequest<'_>) -> Result<String, SitesError> {
        self.post(request).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("options", &self.options)
            .finish()
    }
}
