//! Search orchestration for one query panel.
//!
//! `Idle -> Searching -> {Completed | Failed | Cancelled}`; the next submit
//! from a terminal state starts over. Triggering while `Searching` cancels the
//! outstanding call instead of starting a second one.

use crate::metrics;
use crate::transport::SearchTransport;
use parking_lot::Mutex;
use pearchdeck_core::snippet::{curl_snippet, python_snippet};
use pearchdeck_core::util::json_fingerprint;
use pearchdeck_core::{
    build, json_view, AppSettings, DeckError, FilterModel, ResultsView, SearchRequest,
    LIVE_SEARCH_LIMIT, SNIPPET_LIMIT,
};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching,
    Completed,
    Failed(String),
    Cancelled,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SearchState::Completed | SearchState::Failed(_) | SearchState::Cancelled
        )
    }
}

#[derive(Default)]
struct Shared {
    state: SearchState,
    // bumped on every submit, cancel and teardown; stale tasks compare and bail
    generation: u64,
    response: Option<Arc<JsonValue>>,
    message: Option<String>,
}

struct InFlight {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

pub struct SearchSession {
    transport: Arc<dyn SearchTransport>,
    query: String,
    filters: FilterModel,
    shared: Arc<Mutex<Shared>>,
    inflight: Option<InFlight>,
}

impl SearchSession {
    pub fn new(transport: Arc<dyn SearchTransport>) -> Self {
        Self {
            transport,
            query: String::new(),
            filters: FilterModel::new(),
            shared: Arc::new(Mutex::new(Shared::default())),
            inflight: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn filters(&self) -> &FilterModel {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: FilterModel) {
        self.filters = filters;
    }

    /// Apply a pure filter update, e.g. `s.update_filters(|m| m.add_group("Title"))`.
    pub fn update_filters(&mut self, f: impl FnOnce(&FilterModel) -> FilterModel) {
        self.filters = f(&self.filters);
    }

    pub fn state(&self) -> SearchState {
        self.shared.lock().state.clone()
    }

    pub fn is_searching(&self) -> bool {
        self.state() == SearchState::Searching
    }

    /// Raw body of the last completed search, exactly as received.
    pub fn response(&self) -> Option<Arc<JsonValue>> {
        self.shared.lock().response.clone()
    }

    /// User-facing message for the last failed or cancelled attempt.
    pub fn message(&self) -> Option<String> {
        self.shared.lock().message.clone()
    }

    /// The search button: starts a search, or cancels the one in flight.
    /// Must be called from within a Tokio runtime.
    pub fn trigger(&mut self, settings: &AppSettings) -> SearchState {
        if self.is_searching() {
            self.cancel();
        } else {
            self.submit(settings);
        }
        self.state()
    }

    fn submit(&mut self, settings: &AppSettings) {
        let request = build(&self.query, self.filters.groups(), settings, LIVE_SEARCH_LIMIT);
        let cancel = CancellationToken::new();
        let generation = {
            let mut s = self.shared.lock();
            s.generation += 1;
            s.state = SearchState::Searching;
            s.response = None;
            s.message = None;
            s.generation
        };
        info!(
            fingerprint = %json_fingerprint(&request),
            limit = request.limit,
            filters = request.filters.as_ref().map(|f| f.len()).unwrap_or(0),
            "search started"
        );

        let transport = self.transport.clone();
        let shared = self.shared.clone();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let outcome = transport.search(&request, &token).await;
            let elapsed = started.elapsed().as_secs_f64();
            let mut s = shared.lock();
            if s.generation != generation {
                debug!(generation, "dropping result of superseded search");
                return;
            }
            match outcome {
                Ok(body) => {
                    let count = body
                        .get("search_results")
                        .and_then(|v| v.as_array())
                        .map(|a| a.len())
                        .unwrap_or(0);
                    info!(results = count, elapsed_secs = elapsed, "search completed");
                    metrics::record_outcome("completed", Some(elapsed));
                    s.state = SearchState::Completed;
                    s.response = Some(Arc::new(body));
                }
                Err(DeckError::Cancelled) => {
                    metrics::record_outcome("cancelled", None);
                    s.state = SearchState::Cancelled;
                    s.message = Some(DeckError::Cancelled.user_message());
                }
                Err(e) => {
                    warn!(elapsed_secs = elapsed, "search failed: {}", e);
                    metrics::record_outcome("failed", Some(elapsed));
                    let msg = e.user_message();
                    s.state = SearchState::Failed(msg.clone());
                    s.message = Some(msg);
                    s.response = None;
                }
            }
        });

        // a finished task may still be parked here from the previous attempt
        self.inflight = Some(InFlight { cancel, handle });
    }

    /// Signal the outstanding call to abort. Returns false when nothing was in flight.
    pub fn cancel(&mut self) -> bool {
        let Some(inflight) = self.inflight.take() else {
            return false;
        };
        inflight.cancel.cancel();
        let mut s = self.shared.lock();
        if s.state != SearchState::Searching {
            return false;
        }
        s.generation += 1;
        s.state = SearchState::Cancelled;
        s.message = Some(DeckError::Cancelled.user_message());
        s.response = None;
        metrics::record_outcome("cancelled", None);
        info!("search cancelled by user");
        true
    }

    /// Wait for the in-flight task (if any) to finish and return the resulting state.
    pub async fn settle(&mut self) -> SearchState {
        // keep the handle parked until it resolves so a dropped settle can still be cancelled
        if let Some(inflight) = self.inflight.as_mut() {
            if let Err(e) = (&mut inflight.handle).await {
                warn!("search task ended abnormally: {}", e);
            }
            self.inflight = None;
        }
        self.state()
    }

    /// Acknowledge a terminal state. The last completed response stays readable.
    pub fn reset(&mut self) {
        let mut s = self.shared.lock();
        if s.state.is_terminal() {
            s.state = SearchState::Idle;
            s.message = None;
        }
    }

    /// Abort anything outstanding and detach from it; no later writes land.
    pub fn teardown(&mut self) {
        let mut s = self.shared.lock();
        s.generation += 1;
        if let Some(inflight) = self.inflight.take() {
            if !inflight.handle.is_finished() {
                debug!("aborting outstanding search on teardown");
            }
            inflight.cancel.cancel();
        }
    }

    /// Body the documentation samples show for the current query and filters.
    pub fn sample_request(&self, settings: &AppSettings) -> SearchRequest {
        build(&self.query, self.filters.groups(), settings, SNIPPET_LIMIT)
    }

    pub fn curl_sample(&self, endpoint: &str, settings: &AppSettings) -> String {
        curl_snippet(endpoint, &self.sample_request(settings))
    }

    pub fn python_sample(&self, endpoint: &str, settings: &AppSettings) -> String {
        python_snippet(endpoint, &self.sample_request(settings))
    }

    /// Rendered-tab view; `None` until a search has completed.
    pub fn results_view(&self, settings: &AppSettings) -> Option<ResultsView> {
        self.response()
            .map(|raw| ResultsView::from_raw(&raw, &settings.search_results))
    }

    /// JSON-tab view; `None` until a search has completed.
    pub fn json_view(&self, settings: &AppSettings) -> Option<JsonValue> {
        self.response()
            .map(|raw| json_view(&raw, &settings.search_results))
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
