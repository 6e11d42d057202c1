// HTTP download of release assets

use crate::error::{Result, TunedlError};

/// Fetches a release asset in one request
pub trait ReleaseFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking reqwest client. Must not be used from inside a tokio runtime.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("tunedl/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

impl ReleaseFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("GET {}", url);

        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            return Err(TunedlError::provision(format!(
                "HTTP {} while downloading {}",
                response.status(),
                url
            )));
        }

        let bytes = response.bytes()?.to_vec();
        log::debug!("Downloaded {} bytes from {}", bytes.len(), url);

        Ok(bytes)
    }
}
