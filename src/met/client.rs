use std::{fmt, time::Duration};

use rand::Rng;
use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, USER_AGENT},
};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{config, utils, warning};

/// Error taxonomy for API calls.
///
/// Throttling (403/429) is handled inside the client and only surfaces as
/// `ExhaustedRetries` once the budget is gone. Every other non-2xx status is
/// `RequestFailed` and is never retried — those indicate a contract problem,
/// not a transient condition.
#[derive(Debug)]
pub enum FetchError {
    ExhaustedRetries { url: String, attempts: u32 },
    RequestFailed { url: String, status: StatusCode },
    Transport(reqwest::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::ExhaustedRetries { url, attempts } => {
                write!(f, "rate-limited too long ({attempts} attempts): {url}")
            }
            FetchError::RequestFailed { url, status } => {
                write!(f, "request failed {status} {url}")
            }
            FetchError::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport(err)
    }
}

/// Backoff tuning for one client instance.
#[derive(Debug, Clone, Copy)]
pub struct BackoffPolicy {
    pub base_ms: u64,
    pub cap_ms: u64,
    pub jitter_ms: u64,
}

impl BackoffPolicy {
    pub fn from_config() -> Self {
        Self {
            base_ms: config::backoff_base_ms(),
            cap_ms: config::backoff_cap_ms(),
            jitter_ms: config::backoff_jitter_ms(),
        }
    }
}

/// Pluggable jitter source: maps the configured jitter ceiling to a concrete
/// delay in milliseconds. Injected so tests can supply a zero-jitter variant.
pub type JitterFn = Box<dyn Fn(u64) -> u64 + Send + Sync>;

fn uniform_jitter() -> JitterFn {
    Box::new(|max_ms| {
        if max_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..max_ms)
        }
    })
}

/// Rate-limit-aware GET client for the collection API.
///
/// Deliberately sequential: one request in flight at a time, all waiting is a
/// blocking suspension of the calling task. Concurrency against this API is
/// the trigger condition for blocks, so the client never parallelizes.
pub struct MetClient {
    api_url: String,
    user_agent: String,
    policy: BackoffPolicy,
    jitter: JitterFn,
}

impl MetClient {
    pub fn from_config() -> Self {
        Self::new(
            config::met_apiurl(),
            config::user_agent(),
            BackoffPolicy::from_config(),
            uniform_jitter(),
        )
    }

    pub fn new(
        api_url: String,
        user_agent: String,
        policy: BackoffPolicy,
        jitter: JitterFn,
    ) -> Self {
        Self {
            api_url,
            user_agent,
            policy,
            jitter,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issues a GET request and parses the JSON response, retrying on
    /// throttling signals.
    ///
    /// Makes up to `retries + 1` attempts. On HTTP 403 or 429 the task sleeps
    /// for `min(cap, base * 2^attempt) + jitter` and retries the same URL;
    /// the attempt counter advances only on throttled responses. Any other
    /// non-2xx status returns `RequestFailed` immediately.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        retries: u32,
    ) -> Result<T, FetchError> {
        for attempt in 0..=retries {
            let client = Client::new();
            let response = client
                .get(url)
                .header(USER_AGENT, &self.user_agent)
                .header(ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
                let backoff =
                    utils::backoff_before_jitter(attempt, self.policy.base_ms, self.policy.cap_ms)
                        + (self.jitter)(self.policy.jitter_ms);
                warning!(
                    "Rate-limited ({status}) on {url}. Backing off {backoff}ms (attempt {current}/{total})",
                    current = attempt + 1,
                    total = retries + 1
                );
                sleep(Duration::from_millis(backoff)).await;
                continue;
            }

            if !status.is_success() {
                return Err(FetchError::RequestFailed {
                    url: url.to_string(),
                    status,
                });
            }

            return Ok(response.json::<T>().await?);
        }

        Err(FetchError::ExhaustedRetries {
            url: url.to_string(),
            attempts: retries + 1,
        })
    }
}
