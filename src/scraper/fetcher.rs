use crate::model::FetchError;
use crate::scraper::traits::Fetch;

use rand::Rng;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

const MAX_ATTEMPTS: u32 = 3;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_seconds: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) BoulderPulseBot/0.1")
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self { client })
    }

    async fn get_once(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        response.text().await.map_err(classify)
    }
}

fn classify(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err.to_string())
    }
}

/// Timeouts and server errors are worth another attempt. Everything else
/// (4xx, connection-level failures) fails immediately, and parse failures
/// never reach this layer at all.
fn is_transient(err: &FetchError) -> bool {
    matches!(err, FetchError::Timeout | FetchError::BadStatus(500..=599))
}

#[async_trait::async_trait]
impl Fetch for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let mut attempt = 1;
        loop {
            match self.get_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < MAX_ATTEMPTS && is_transient(&e) => {
                    let jitter = rand::rng().random_range(0..250);
                    let delay = Duration::from_millis(500 * u64::from(attempt) + jitter);
                    warn!(
                        "fetch attempt {}/{} for {} failed ({}), retrying in {:?}",
                        attempt, MAX_ATTEMPTS, url, e, delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
