// src/core/net.rs
// One blocking GET per batch against the catalog XML API.

use crate::config::consts::{API_BASE, API_QUERY, REQUEST_TIMEOUT, USER_AGENT};
use crate::error::TransportError;

/// Anything that can turn a window of ids into a raw response body.
/// The pull loop only ever holds one of these and calls it sequentially.
pub trait Transport {
    fn fetch(&mut self, ids: &[&str]) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::blocking::Client,
    base: String,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_base(API_BASE)
    }

    /// `base` must end where the comma-joined id list starts.
    pub fn with_base(base: &str) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base: s!(base) })
    }

    pub fn url_for(&self, ids: &[&str]) -> String {
        batch_url(&self.base, ids)
    }
}

impl Transport for HttpTransport {
    fn fetch(&mut self, ids: &[&str]) -> Result<String, TransportError> {
        let url = self.url_for(ids);
        let resp = self.client.get(&url).send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status { status: status.as_u16(), url });
        }
        Ok(resp.text()?)
    }
}

pub fn batch_url(base: &str, ids: &[&str]) -> String {
    join!(base, &ids.join(","), API_QUERY)
}
