//! Rate-limited HTTP client for the MusicBrainz WS/2 API.
//!
//! Two timing mechanisms, deliberately independent:
//! - a fixed 1200 ms politeness delay between consecutive requests, and
//! - exponential backoff while retrying a single failed call.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::HarvestError;
use crate::identity::Identity;

const BASE_URL: &str = "https://musicbrainz.org/ws/2";
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(1200);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_ATTEMPTS: u32 = 5;
const BACKOFF_BASE: Duration = Duration::from_secs(1);
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Whether an HTTP status is transient and worth retrying.
pub(crate) fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Backoff delay after the given failed attempt (1-based): 1s, 2s, 4s, 8s.
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    BACKOFF_BASE * 2u32.pow(attempt.saturating_sub(1))
}

/// Retry loop states for a single logical GET.
enum FetchState {
    Fetching { attempt: u32 },
    Backoff { attempt: u32, delay: Duration },
}

/// Outcome of one HTTP attempt.
enum AttemptOutcome<T> {
    Success(T),
    Retryable(String),
    Fatal(HarvestError),
}

/// HTTP client for the MusicBrainz API with rate limiting and bounded retry.
pub struct MbClient {
    http: reqwest::Client,
    last_request: Arc<Mutex<Instant>>,
}

impl MbClient {
    /// Create a new client identifying itself with the given identity.
    pub fn new(identity: &Identity) -> Result<Self, HarvestError> {
        let http = reqwest::Client::builder()
            .user_agent(identity.user_agent())
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            last_request: Arc::new(Mutex::new(Instant::now() - MIN_REQUEST_INTERVAL)),
        })
    }

    /// GET a WS/2 endpoint with query parameters and deserialize the JSON
    /// response.
    ///
    /// Request timeouts, connection failures, and HTTP 429/500/502/503/504
    /// are retried up to 5 attempts with doubling backoff. Any other error
    /// status surfaces immediately with the status and URL.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, HarvestError> {
        let url = format!("{}/{}", BASE_URL, endpoint);
        let mut state = FetchState::Fetching { attempt: 1 };

        loop {
            match state {
                FetchState::Fetching { attempt } => {
                    self.rate_limit().await;
                    match self.attempt(&url, params).await {
                        AttemptOutcome::Success(value) => return Ok(value),
                        AttemptOutcome::Fatal(err) => return Err(err),
                        AttemptOutcome::Retryable(reason) => {
                            if attempt >= MAX_ATTEMPTS {
                                return Err(HarvestError::RetriesExhausted {
                                    url,
                                    attempts: MAX_ATTEMPTS,
                                });
                            }
                            let delay = backoff_delay(attempt);
                            log::warn!(
                                "Transient failure ({reason}), retry {}/{} in {:?}: {url}",
                                attempt + 1,
                                MAX_ATTEMPTS,
                                delay,
                            );
                            state = FetchState::Backoff {
                                attempt: attempt + 1,
                                delay,
                            };
                        }
                    }
                }
                FetchState::Backoff { attempt, delay } => {
                    tokio::time::sleep(delay).await;
                    state = FetchState::Fetching { attempt };
                }
            }
        }
    }

    /// One HTTP attempt, classified into success / retryable / fatal.
    async fn attempt<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> AttemptOutcome<T> {
        let resp = match self.http.get(url).query(params).send().await {
            Ok(resp) => resp,
            Err(e) if e.is_timeout() || e.is_connect() => {
                return AttemptOutcome::Retryable(e.to_string());
            }
            Err(e) => return AttemptOutcome::Fatal(e.into()),
        };

        let status = resp.status().as_u16();
        let final_url = resp.url().to_string();
        // Best-effort observability; never affects control flow.
        log::info!("[GET] {} -> {}", final_url, status);

        if is_retryable_status(status) {
            return AttemptOutcome::Retryable(format!("HTTP {status}"));
        }
        if !resp.status().is_success() {
            return AttemptOutcome::Fatal(HarvestError::Status {
                status,
                url: final_url,
            });
        }

        match resp.json::<T>().await {
            Ok(value) => AttemptOutcome::Success(value),
            Err(e) => AttemptOutcome::Fatal(e.into()),
        }
    }

    /// Enforce the politeness contract: wait until at least
    /// MIN_REQUEST_INTERVAL has passed since the last request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
        }
        *last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_retryable_status(status), "{status} should be retryable");
        }
        for status in [400, 401, 403, 404, 501] {
            assert!(!is_retryable_status(status), "{status} should be fatal");
        }
    }

    #[test]
    fn test_backoff_doubles() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(2), Duration::from_secs(2));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(4), Duration::from_secs(8));
    }

    #[tokio::test]
    async fn test_rate_limit_spaces_requests() {
        let identity = Identity {
            app: "pianola-test".to_string(),
            contact: "test@example.com".to_string(),
        };
        let client = MbClient::new(&identity).unwrap();

        let start = Instant::now();
        client.rate_limit().await;
        let first = start.elapsed();
        client.rate_limit().await;
        let second = start.elapsed();

        assert!(first < Duration::from_millis(100));
        assert!(second >= Duration::from_millis(1100));
    }
}
