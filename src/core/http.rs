use std::{
    thread,
    time::Duration,
};

use reqwest::{
    blocking::{
        Client,
        Response,
    },
    header::USER_AGENT,
    StatusCode,
};

use crate::core::DaneoError;

const APP_USER_AGENT: &str = "daneo/0.1 (+reqwest)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub fn http_client() -> Result<Client, DaneoError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| DaneoError::Custom(format!("HTTP client build failed: {e}")))
}

/// Backoff schedule for the retrying fetch. Only HTTP 429 and transport
/// errors are retried; other statuses (404, 5xx) are returned as-is on
/// the first attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: usize,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_retries: 3,
            base_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(60),
            multiplier: 5,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `ordinal` (1-based): base, base*m, base*m^2, ...
    /// capped at `max_delay`.
    pub fn delay(&self, ordinal: usize) -> Duration {
        let exponent = ordinal.saturating_sub(1).min(u32::MAX as usize) as u32;
        let factor = self.multiplier.saturating_pow(exponent);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

pub fn fetch(
    client: &Client,
    url: &str,
    headers: &[(&str, &str)],
    params: &[(&str, String)],
) -> Result<Response, DaneoError> {
    fetch_with_policy(client, url, headers, params, RetryPolicy::default())
}

pub fn fetch_with_policy(
    client: &Client,
    url: &str,
    headers: &[(&str, &str)],
    params: &[(&str, String)],
    policy: RetryPolicy,
) -> Result<Response, DaneoError> {
    let mut attempts: usize = 0;
    loop {
        attempts += 1;

        let mut request = client.get(url).header(USER_AGENT, APP_USER_AGENT);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        if !params.is_empty() {
            request = request.query(params);
        }

        match request.send() {
            Ok(resp) if resp.status() == StatusCode::TOO_MANY_REQUESTS => {
                if attempts > policy.max_retries {
                    return Err(DaneoError::RateLimited { url: url.to_string(), attempts });
                }
                let delay = policy.delay(attempts);
                log::warn!("Rate limited by {url}, retrying in {}s", delay.as_secs());
                thread::sleep(delay);
            }
            Ok(resp) => return Ok(resp),
            Err(e) => {
                if attempts > policy.max_retries {
                    return Err(DaneoError::from(e));
                }
                let delay = policy.delay(attempts);
                log::warn!("GET {url} failed ({e}), retrying in {}s", delay.as_secs());
                thread::sleep(delay);
            }
        }
    }
}
