//! Retrying REST request loop
//!
//! A logical request moves through a small state machine: send, then
//! either succeed (expected status), fail terminally (401/403 or an
//! unexpected status), or go around again (429 after the advertised
//! backoff, connection-level failures immediately). The loop is unbounded
//! by default; [`RetryPolicy`] makes the attempt ceiling injectable.

use std::thread;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};

use crate::error::{ClientError, Result};

/// Fallback backoff when a 429 carries no usable Retry-After header.
const RATE_LIMIT_FALLBACK: Duration = Duration::from_millis(90_000);

/// Padding added on top of the server-advertised Retry-After seconds.
const RATE_LIMIT_PADDING_MS: u64 = 250;

/// How many times a retryable failure goes around the loop.
///
/// The default is unbounded, which preserves the long-standing behavior of
/// waiting out a rate-limited endpoint indefinitely; callers that would
/// rather fail can cap the attempts.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryPolicy {
    /// Maximum send attempts; `None` retries forever
    pub max_attempts: Option<u32>,
}

impl RetryPolicy {
    /// Retry forever (the default)
    pub fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Give up after `attempts` sends
    pub fn with_max_attempts(attempts: u32) -> Self {
        Self {
            max_attempts: Some(attempts),
        }
    }
}

/// Authenticated client for one remote API base URL.
#[derive(Debug)]
pub struct RestClient {
    base_url: String,
    api_credentials: String,
    http: Client,
    policy: RetryPolicy,
}

impl RestClient {
    /// Create a client for `base_url` with an unbounded retry policy.
    ///
    /// `api_credentials` is the pre-encoded Basic credential value
    /// (base64 of `email/token:apiToken`); it is opaque to this type.
    pub fn new(base_url: impl Into<String>, api_credentials: impl Into<String>) -> Result<Self> {
        Self::with_policy(base_url, api_credentials, RetryPolicy::unbounded())
    }

    /// Create a client with an explicit retry policy
    pub fn with_policy(
        base_url: impl Into<String>,
        api_credentials: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let http = Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into(),
            api_credentials: api_credentials.into(),
            http,
            policy,
        })
    }

    /// The API base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a GET and require `expected` as the success status
    pub fn get(&self, resource: &str, expected: StatusCode, description: &str) -> Result<Response> {
        self.send(Method::GET, resource, expected, description, None)
    }

    /// Send a request, retrying through rate limits and connection drops.
    ///
    /// Returns the response once its status equals `expected`. 401 and 403
    /// fail immediately with credential guidance; any other unexpected
    /// status is a terminal [`ClientError::Request`]. `description` names
    /// the operation for error messages and logs.
    pub fn send(
        &self,
        method: Method,
        resource: &str,
        expected: StatusCode,
        description: &str,
        json_body: Option<&serde_json::Value>,
    ) -> Result<Response> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), resource);
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;

            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(AUTHORIZATION, format!("Basic {}", self.api_credentials));
            if let Some(body) = json_body {
                request = request.json(body);
            }

            match request.send() {
                Ok(response) => {
                    let status = response.status();
                    if status == expected {
                        return Ok(response);
                    }

                    match status {
                        StatusCode::FORBIDDEN => {
                            return Err(ClientError::Permissions {
                                base_url: self.base_url.clone(),
                                description: description.to_string(),
                            });
                        }
                        StatusCode::UNAUTHORIZED => {
                            return Err(ClientError::Credentials {
                                base_url: self.base_url.clone(),
                                description: description.to_string(),
                            });
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            let wait = rate_limit_wait(&response);
                            log::warn!(
                                "rate limited when {} (resource: {}), sleeping {} ms",
                                description,
                                resource,
                                wait.as_millis()
                            );
                            thread::sleep(wait);
                        }
                        other => {
                            return Err(ClientError::Request {
                                status: other.as_u16(),
                                base_url: self.base_url.clone(),
                                resource: resource.to_string(),
                                description: description.to_string(),
                            });
                        }
                    }
                }
                Err(err) => {
                    // Connection-level failure (no status): retry
                    log::warn!(
                        "connection failure when {} with base URL: {}, resource: {}: {}, retrying",
                        description,
                        self.base_url,
                        resource,
                        err
                    );
                }
            }

            if let Some(max) = self.policy.max_attempts {
                if attempts >= max {
                    return Err(ClientError::RetriesExhausted {
                        attempts,
                        base_url: self.base_url.clone(),
                        description: description.to_string(),
                    });
                }
            }
        }
    }
}

/// First header named `name` parsed as an integer, `None` when the header
/// is missing or unparseable.
pub fn int_from_header(response: &Response, name: &str) -> Option<i64> {
    response
        .headers()
        .get(name)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Backoff for a 429 response: the advertised seconds plus a small pad,
/// or a fixed 90 second fallback when the header is absent/unparseable.
fn rate_limit_wait(response: &Response) -> Duration {
    match int_from_header(response, "Retry-After") {
        Some(secs) if secs >= 0 => {
            Duration::from_millis(secs as u64 * 1000 + RATE_LIMIT_PADDING_MS)
        }
        _ => RATE_LIMIT_FALLBACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_policy_default_is_unbounded() {
        assert_eq!(RetryPolicy::default().max_attempts, None);
        assert_eq!(RetryPolicy::unbounded().max_attempts, None);
        assert_eq!(RetryPolicy::with_max_attempts(3).max_attempts, Some(3));
    }

    #[test]
    fn test_rate_limit_constants() {
        // Retry-After: 2 maps to 2250 ms, fallback is a flat 90 s
        assert_eq!(2 * 1000 + RATE_LIMIT_PADDING_MS, 2250);
        assert_eq!(RATE_LIMIT_FALLBACK, Duration::from_millis(90_000));
    }
}
