//! The paginator task

use super::stream::PageStream;
use super::types::{Page, PaginationState, PaginatorState};
use crate::error::{Error, Result};
use crate::fetch::PageFetcher;
use crate::query::QuerySpec;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Drives one query from its first page to its last
pub struct Paginator<T: Send + 'static> {
    spec: QuerySpec,
    fetcher: Arc<dyn PageFetcher<T>>,
}

impl<T: Send + 'static> Paginator<T> {
    /// Create a paginator for `spec`
    pub fn new(spec: QuerySpec, fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        Self { spec, fetcher }
    }

    /// Get the query being paginated
    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    /// Run on the current tokio runtime, delivering pages through a
    /// channel of `capacity` (at least 1)
    pub fn spawn(self, capacity: usize) -> Result<PageStream<T>> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| Error::config(format!("no tokio runtime to run the stream on: {e}")))?;

        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = runtime.spawn(self.run(tx));
        Ok(PageStream::new(rx, handle))
    }

    /// Fetch and emit pages until done, failed or cancelled.
    ///
    /// Every fetch races the consumer closing the channel; the in-flight
    /// fetch is dropped as soon as the consumer goes away.
    pub async fn run(self, tx: mpsc::Sender<Page<T>>) -> PaginationState {
        let operation = self.spec.operation();
        let mut state = PaginationState::new();
        info!(%operation, max_pages = self.spec.max_pages(), "Starting pagination");

        loop {
            state.transition(PaginatorState::Fetching);
            let token = state.token.clone();

            let fetched = tokio::select! {
                biased;
                () = tx.closed() => None,
                result = self.fetcher.fetch(&self.spec, token.as_ref()) => Some(result),
            };

            let page = match fetched {
                None => {
                    state.transition(PaginatorState::Cancelled);
                    break;
                }
                Some(Ok(page)) => page,
                Some(Err(err)) => {
                    warn!(%operation, page = state.next_page_number(), error = %err, "Page fetch failed");
                    state.transition(PaginatorState::Failed);
                    // Consumer may already be gone; nothing left to report to.
                    let _ = tx.send(Page::failed(state.next_page_number(), err)).await;
                    break;
                }
            };

            state.transition(PaginatorState::Emitting);
            let count = page.items.len();
            let number = state.next_page_number();
            debug!(
                %operation,
                page = number,
                items = count,
                has_next = page.has_next(),
                "Fetched page"
            );

            let out = Page::new(number, page.items).with_total_results(page.total_results);
            if tx.send(out).await.is_err() {
                state.transition(PaginatorState::Cancelled);
                break;
            }
            state.record_page(count, page.next_token);

            if self.spec.page_limit_reached(state.pages_fetched) || !state.has_next() {
                state.transition(PaginatorState::Done);
                break;
            }
        }

        info!(
            %operation,
            pages = state.pages_fetched,
            items = state.items_fetched,
            state = %state.state,
            "Pagination finished"
        );
        state
    }
}

impl<T: Send + 'static> std::fmt::Debug for Paginator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("spec", &self.spec)
            .finish_non_exhaustive()
    }
}
