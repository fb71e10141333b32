use reqwest::tls;
use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// GET a page and hand back its body as text.
///
/// Discovery and extraction only ever talk to this trait, so tests can swap
/// the network for an in-memory page map.
pub trait Fetch {
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Shared HTTP session: TLS 1.2 minimum, fixed user agent, one timeout for
/// every request. Built once per run and reused serially.
pub struct HttpClient {
    inner: reqwest::Client,
}

impl HttpClient {
    pub fn new(settings: &Settings) -> Result<Self, FetchError> {
        let inner = reqwest::Client::builder()
            .min_tls_version(tls::Version::TLS_1_2)
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { inner })
    }
}

impl Fetch for HttpClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.inner.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// In-memory pages keyed by URL; anything missing answers 404.
#[cfg(test)]
#[derive(Default)]
pub struct StubFetch {
    pages: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl StubFetch {
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }
}

#[cfg(test)]
impl Fetch for StubFetch {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        self.pages.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
