use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::map::{MapPresenter, MapWidget, RenderOutcome};
use crate::symbols::{SearchError, SymbolSearchClient};

/// A user search term after trimming. `None` means an unfiltered search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: Option<String>,
}

impl SearchQuery {
    pub fn parse(raw: Option<&str>) -> Self {
        let term = raw
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        Self { term }
    }

    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.term.is_none()
    }
}

/// Single entry point for search submissions from any input source.
pub struct SearchController<W> {
    client: SymbolSearchClient,
    presenter: Arc<Mutex<MapPresenter<W>>>,
    in_flight: Arc<AtomicUsize>,
}

impl<W> Clone for SearchController<W> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            presenter: self.presenter.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<W> SearchController<W>
where
    W: MapWidget + Send + 'static,
{
    pub fn new(client: SymbolSearchClient, presenter: Arc<Mutex<MapPresenter<W>>>) -> Self {
        Self {
            client,
            presenter,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn presenter(&self) -> Arc<Mutex<MapPresenter<W>>> {
        self.presenter.clone()
    }

    /// Number of searches submitted but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    /// Starts a search in the background and returns immediately.
    ///
    /// Earlier submissions are not cancelled; whichever reply lands last
    /// decides what the map shows.
    pub fn submit_search(&self, term: Option<String>) -> JoinHandle<()> {
        let this = self.clone();
        this.in_flight.fetch_add(1, Ordering::Relaxed);
        tokio::spawn(async move {
            // Errors are already logged in search_and_render.
            let _ = this.search_and_render(term.as_deref()).await;
            this.in_flight.fetch_sub(1, Ordering::Relaxed);
        })
    }

    pub fn search_on_load(&self) -> JoinHandle<()> {
        self.submit_search(None)
    }

    /// Runs one search and renders it. On failure the current markers stay.
    pub async fn search_and_render(
        &self,
        term: Option<&str>,
    ) -> Result<RenderOutcome, SearchError> {
        let query = SearchQuery::parse(term);
        info!(term=?query.term(), unfiltered=query.is_unfiltered(), "submitting symbol search");
        match self.client.search(query.term()).await {
            Ok(resp) => {
                let mut presenter = self.presenter.lock().await;
                Ok(presenter.render(resp.as_ref()))
            }
            Err(e) => {
                if e.is_network() {
                    error!(err=%e, term=?query.term(), "symbol search failed; map left unchanged");
                } else {
                    error!(err=%e, term=?query.term(), "unreadable symbol search reply; map left unchanged");
                }
                Err(e)
            }
        }
    }
}
