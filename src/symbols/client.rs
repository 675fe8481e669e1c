use anyhow::Result;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::HttpConfig;
use crate::symbols::error::SearchError;
use crate::symbols::types::{SearchRequest, SymbolSearchResponse};

pub const DEFAULT_ENDPOINT: &str =
    "http://www.symbolstore.org/SymbolStoreRelease3REST/SymbolService.asmx/SearchSymbols";

/// Thin translation layer between a query string and a typed catalog reply.
#[derive(Debug, Clone)]
pub struct SymbolSearchClient {
    pub endpoint: String,
    pub(crate) inner: reqwest::Client,
}

impl SymbolSearchClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let inner = build_http_client(&HttpConfig::default())?;
        Ok(Self {
            endpoint: endpoint.into(),
            inner,
        })
    }

    pub fn with_http_config(mut self, cfg: HttpConfig) -> Self {
        // Keep the previous client if the builder rejects the settings.
        match build_http_client(&cfg) {
            Ok(c) => self.inner = c,
            Err(e) => error!(err=%e, "failed to rebuild http client; keeping defaults"),
        }
        self
    }

    /// Queries the first page of the catalog. `Ok(None)` means the service
    /// answered without any data.
    pub async fn search(
        &self,
        term: Option<&str>,
    ) -> Result<Option<SymbolSearchResponse>, SearchError> {
        let req = SearchRequest::new(term);
        debug!(endpoint=%self.endpoint, terms=%req.search_terms, "sending symbol search");

        let resp = self
            .inner
            .get(&self.endpoint)
            .query(&req)
            .send()
            .await
            .inspect_err(|e| error!(err=%e, "symbol search send error"))?;

        let status = resp.status();
        let resp = resp
            .error_for_status()
            .inspect_err(|_| error!(status=%status.as_u16(), "symbol search non-success status"))?;

        let text = resp
            .text()
            .await
            .inspect_err(|e| error!(err=%e, "symbol search read body error"))?;

        let parsed = parse_response(&text)
            .inspect_err(|e| error!(err=%e, body_len=text.len(), "symbol search parse error"))?;
        if let Some(r) = &parsed {
            info!(
                terms=%req.search_terms,
                hits=r.hit_count,
                returned=r.symbols.len(),
                "symbol search completed"
            );
        }
        Ok(parsed)
    }
}

fn build_http_client(cfg: &HttpConfig) -> reqwest::Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(cfg.user_agent.clone());
    if let Some(ms) = cfg.connect_timeout_ms {
        builder = builder.connect_timeout(Duration::from_millis(ms));
    }
    if let Some(ms) = cfg.request_timeout_ms {
        builder = builder.timeout(Duration::from_millis(ms));
    }
    builder.build()
}

/// An empty or `null` body is "no data"; anything else must match the schema.
pub fn parse_response(body: &str) -> Result<Option<SymbolSearchResponse>, SearchError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<SymbolSearchResponse>>(body)?)
}
