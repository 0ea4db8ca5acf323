//! Low-level request pipeline.

use std::time::Duration;

use log::debug;
use log::warn;
use reqwest::StatusCode;
use reqwest::header::COOKIE;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::Endpoint;
use super::envelope;
use super::envelope::Payload;
use crate::DashboardClient;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;

impl DashboardClient {
    /// Calls `endpoint` and decodes its payload.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: Option<&Value>,
    ) -> Result<Payload<T>, Error> {
        let text = self.request(endpoint, body).await?;
        Ok(envelope::decode(endpoint.shape, &text, &endpoint.path)?)
    }

    /// Makes an HTTP request with retry logic and returns the body text of
    /// a successful response.
    ///
    /// A 401 clears the endpoint actor's session.
    pub(crate) async fn request(&self, endpoint: &Endpoint, body: Option<&Value>) -> Result<String, Error> {
        let url = self.endpoint_url(&endpoint.path);
        let retry_config = &self.inner.retry_config;
        let mut attempts = 0;
        let mut delay = retry_config.initial_delay;

        loop {
            debug!("{} {}", endpoint.method, url);

            match self.send_once(endpoint, &url, body).await {
                Ok(response) => {
                    let status = response.status();

                    if status == StatusCode::UNAUTHORIZED {
                        warn!("{} {} returned 401, clearing {} session", endpoint.method, endpoint.path, endpoint.actor);
                        self.inner.tokens.invalidate(endpoint.actor).await;
                        return Err(AuthError::SessionExpired {
                            actor: endpoint.actor,
                        }
                        .into());
                    }

                    if retry_config.retries_response(&endpoint.method, status) && attempts < retry_config.max_retries {
                        let retry_after = if status == StatusCode::TOO_MANY_REQUESTS {
                            parse_retry_after(&response)
                        } else {
                            None
                        };
                        let wait = retry_config.wait(delay, retry_after);
                        debug!("{} returned {}, retrying in {:?}", endpoint.path, status, wait);
                        tokio::time::sleep(wait).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    let text = response.text().await.map_err(ApiError::from)?;
                    if status.is_success() {
                        return Ok(text);
                    }
                    return Err(ApiError::from_body(status.as_u16(), &text).into());
                }
                Err(e) => {
                    let retryable = match &e {
                        Error::Api(api) => retry_config.retries_error(&endpoint.method, api),
                        _ => false,
                    };

                    if retryable && attempts < retry_config.max_retries {
                        debug!("{} failed ({}), retrying in {:?}", endpoint.path, e, delay);
                        tokio::time::sleep(delay).await;
                        delay = retry_config.next_delay(delay);
                        attempts += 1;
                        continue;
                    }

                    return Err(e);
                }
            }
        }
    }

    /// Inner request method without retry logic.
    async fn send_once(&self, endpoint: &Endpoint, url: &str, body: Option<&Value>) -> Result<reqwest::Response, Error> {
        let token = self.inner.tokens.token(endpoint.actor).await?;

        let mut request = self
            .inner
            .http_client
            .request(endpoint.method.clone(), url)
            .bearer_auth(&token)
            .header(COOKIE, format!("{}={}", endpoint.actor.cookie_name(), token));

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            // Connect timeouts stay network errors: nothing reached the server
            if e.is_timeout() && !e.is_connect() {
                ApiError::Timeout(self.inner.timeout.unwrap_or_default()).into()
            } else {
                ApiError::Network(e).into()
            }
        })
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.inner.api_root, path)
    }
}

/// Parses the Retry-After header value (seconds).
fn parse_retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get("Retry-After")?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
