//! Blocking HTTP transport.
//!
//! The rest of the crate only ever needs one primitive: fetch a URL, get
//! the page body back. The [`Transport`] trait captures that contract so
//! tests can substitute canned pages for the live site.

use log::debug;

use crate::error::{Error, Result};

/// Fetch-by-URL primitive the scraper runs on.
///
/// One synchronous GET per call: no custom headers, no timeout, no retry.
/// Network failures and HTTP error statuses are not distinguished — either
/// way the lookup in progress aborts with [`Error::Transport`].
pub trait Transport {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// [`Transport`] backed by a blocking reqwest client.
///
/// The client reuses its connection pool across calls, so one
/// `HttpTransport` should be shared across the lookups of a session.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        self.client
            .get(url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|source| Error::Transport {
                url: url.to_string(),
                source,
            })
    }
}

// =============================================================================
// Test Support
// =============================================================================
