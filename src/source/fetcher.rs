use crate::model::FetchError;
use crate::source::traits::PageSource;
use rand::Rng;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::warn;

/// Blocking HTTP fetcher with a bounded timeout and a single jittered retry.
/// The upstream dashboard had neither; both are deliberate hardening.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) onchain-bands/0.1")
            .timeout(timeout)
            .build()
            .expect("reqwest client with static settings");
        Self { client }
    }

    fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl PageSource for HttpFetcher {
    fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        match self.get(url) {
            Ok(body) => Ok(body),
            Err(first) => {
                let backoff = rand::rng().random_range(250..750);
                warn!("fetch of {url} failed ({first}), retrying in {backoff}ms");
                std::thread::sleep(Duration::from_millis(backoff));
                self.get(url)
            }
        }
    }
}
