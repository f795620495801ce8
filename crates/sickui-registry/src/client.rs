// Registry HTTP client
//
// Wraps `reqwest::Client` with registry URL construction, status checking
// and schema validation. Every call re-fetches: there is no cache and no
// retry, the first failure is returned to the caller.

use futures_util::future::try_join_all;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::schema::{ContentMode, ItemPayload, RegistryItem};
use crate::transport::TransportConfig;

/// HTTP client for the component registry.
///
/// Metadata is read from `{base}/index.json` and `{base}/{name}.json`. When a
/// raw-source base is configured, file contents are read from
/// `{raw}/{file}` instead of the item JSON, and either leg failing fails the
/// whole fetch.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: Url,
    raw_url: Option<Url>,
}

impl RegistryClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            raw_url: None,
        }
    }

    /// Fetch file contents from a separate raw-source endpoint.
    pub fn with_raw_source(mut self, raw_url: Url) -> Self {
        self.raw_url = Some(raw_url);
        self
    }

    /// The registry base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The raw-source base URL, if split mode is enabled.
    pub fn raw_url(&self) -> Option<&Url> {
        self.raw_url.as_ref()
    }

    fn content_mode(&self) -> ContentMode {
        if self.raw_url.is_some() {
            ContentMode::Split
        } else {
            ContentMode::Embedded
        }
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// Fetch and validate the full registry index.
    pub async fn fetch_index(&self) -> Result<Vec<RegistryItem>, Error> {
        let url = join(&self.base_url, "index.json")?;
        let payloads: Vec<ItemPayload> = self.get_json(&url).await?;
        let mode = self.content_mode();

        payloads
            .into_iter()
            .map(|payload| payload.into_item(mode))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|message| Error::SchemaMismatch {
                url: url.to_string(),
                message,
            })
    }

    /// Fetch and validate a single registry item by name.
    pub async fn fetch_item(&self, name: &str) -> Result<RegistryItem, Error> {
        let url = join(&self.base_url, &format!("{name}.json"))?;
        let payload: ItemPayload = self.get_json(&url).await?;
        let mut item = payload
            .into_item(self.content_mode())
            .map_err(|message| Error::SchemaMismatch {
                url: url.to_string(),
                message,
            })?;

        if self.raw_url.is_some() {
            for file in &mut item.files {
                file.content = self.fetch_source(&file.name).await?;
            }
        }

        Ok(item)
    }

    /// Fetch the full payload for every resolved item, all requests in flight
    /// at once. Results keep the input order; the first failure wins.
    pub async fn fetch_tree(&self, tree: &[RegistryItem]) -> Result<Vec<RegistryItem>, Error> {
        debug!(count = tree.len(), "fetching registry tree");
        try_join_all(tree.iter().map(|item| self.fetch_item(&item.name))).await
    }

    /// Fetch the literal source text of one file from the raw-source endpoint.
    ///
    /// Falls back to the registry base when no raw-source base is configured.
    pub async fn fetch_source(&self, file_name: &str) -> Result<String, Error> {
        let base = self.raw_url.as_ref().unwrap_or(&self.base_url);
        let url = join(base, file_name)?;
        debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Unavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp.text().await?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and deserialize the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Unavailable {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        trace!(bytes = body.len(), "registry response received");

        serde_json::from_str(&body).map_err(|e| Error::SchemaMismatch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// Append a path to a base URL without dropping the base's last segment.
fn join(base: &Url, path: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    let path = path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn join_keeps_last_base_segment() {
        let base = Url::parse("https://example.com/SickUI/main/registry").unwrap();
        let url = join(&base, "index.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/SickUI/main/registry/index.json"
        );
    }

    #[test]
    fn join_tolerates_slashes() {
        let base = Url::parse("https://example.com/registry/").unwrap();
        let url = join(&base, "/button.json").unwrap();
        assert_eq!(url.as_str(), "https://example.com/registry/button.json");
    }
}
