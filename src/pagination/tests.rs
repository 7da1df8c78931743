//! Tests for pagination module

use super::*;
use crate::error::{Error, Result};
use crate::fetch::{FetchedPage, PageFetcher};
use crate::query::{QuerySpec, SearchParam};
use crate::types::ContinuationToken;
use async_trait::async_trait;
use futures::StreamExt;
use pretty_assertions::assert_eq;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Fetcher that replays scripted pages and records the tokens it was given
#[derive(Default)]
struct ScriptedFetcher {
    pages: Mutex<VecDeque<Result<FetchedPage<u32>>>>,
    tokens: Mutex<Vec<Option<String>>>,
}

impl ScriptedFetcher {
    fn new(pages: Vec<Result<FetchedPage<u32>>>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            tokens: Mutex::default(),
        })
    }

    fn calls(&self) -> usize {
        self.tokens.lock().unwrap().len()
    }

    fn tokens(&self) -> Vec<Option<String>> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher<u32> for ScriptedFetcher {
    async fn fetch(
        &self,
        _spec: &QuerySpec,
        token: Option<&ContinuationToken>,
    ) -> Result<FetchedPage<u32>> {
        self.tokens
            .lock()
            .unwrap()
            .push(token.map(|t| t.as_str().to_string()));
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("script exhausted".into())))
    }
}

/// Fetcher that never runs out of pages
#[derive(Default)]
struct EndlessFetcher {
    calls: AtomicUsize,
}

#[async_trait]
impl PageFetcher<u32> for EndlessFetcher {
    async fn fetch(
        &self,
        _spec: &QuerySpec,
        _token: Option<&ContinuationToken>,
    ) -> Result<FetchedPage<u32>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) as u32;
        Ok(FetchedPage::new(
            vec![n],
            Some(ContinuationToken::new(format!("t{}", n + 1))),
        ))
    }
}

/// Sets a flag when dropped
struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Fetcher whose second call hangs until its future is dropped
struct HangingFetcher {
    calls: AtomicUsize,
    started: Arc<Notify>,
    dropped: Arc<AtomicBool>,
}

#[async_trait]
impl PageFetcher<u32> for HangingFetcher {
    async fn fetch(
        &self,
        _spec: &QuerySpec,
        _token: Option<&ContinuationToken>,
    ) -> Result<FetchedPage<u32>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Ok(FetchedPage::new(vec![1], Some(ContinuationToken::new("t2"))));
        }
        let _guard = DropFlag(self.dropped.clone());
        self.started.notify_one();
        futures::future::pending::<()>().await;
        unreachable!()
    }
}

fn page(items: Vec<u32>, next: Option<&str>) -> Result<FetchedPage<u32>> {
    Ok(FetchedPage::new(items, next.map(ContinuationToken::new)))
}

fn spec(max_pages: u32) -> QuerySpec {
    QuerySpec::search(&SearchParam::new().query("James Bond").max_page(max_pages)).unwrap()
}

async fn collect_pages(stream: PageStream<u32>) -> Vec<Page<u32>> {
    stream.collect::<Vec<_>>().await
}

// ============================================================================
// Page / State Tests
// ============================================================================

#[test]
fn test_page_into_result() {
    let ok = Page::new(1, vec![1, 2]).with_total_results(Some(10));
    assert!(!ok.is_err());
    assert_eq!(ok.len(), 2);
    assert_eq!(ok.total_results, Some(10));
    assert_eq!(ok.into_result().unwrap(), vec![1, 2]);

    let failed: Page<u32> = Page::failed(3, Error::decode("bad"));
    assert!(failed.is_err());
    assert!(failed.is_empty());
    assert_eq!(failed.number, 3);
    assert!(failed.into_result().unwrap_err().is_decode());
}

#[test]
fn test_pagination_state_record_page() {
    let mut state = PaginationState::new();
    assert_eq!(state.state, PaginatorState::Start);
    assert_eq!(state.next_page_number(), 1);

    state.record_page(5, Some(ContinuationToken::new("next")));
    assert_eq!(state.pages_fetched, 1);
    assert_eq!(state.items_fetched, 5);
    assert!(state.has_next());

    state.record_page(0, Some(ContinuationToken::new("")));
    assert_eq!(state.pages_fetched, 2);
    assert!(!state.has_next());
}

#[test]
fn test_paginator_state_terminal() {
    assert!(!PaginatorState::Start.is_terminal());
    assert!(!PaginatorState::Fetching.is_terminal());
    assert!(!PaginatorState::Emitting.is_terminal());
    assert!(PaginatorState::Done.is_terminal());
    assert!(PaginatorState::Failed.is_terminal());
    assert!(PaginatorState::Cancelled.is_terminal());
    assert_eq!(PaginatorState::Cancelled.to_string(), "cancelled");
}

// ============================================================================
// Paginator Tests
// ============================================================================

#[tokio::test]
async fn test_stops_at_max_pages() {
    let fetcher = ScriptedFetcher::new(vec![
        page(vec![1, 2], Some("t2")),
        page(vec![3, 4], Some("t3")),
        page(vec![5, 6], Some("t4")),
    ]);
    let stream = Paginator::new(spec(2), fetcher.clone()).spawn(1).unwrap();

    let pages = collect_pages(stream).await;
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[1].number, 2);
    assert_eq!(pages[1].items, vec![3, 4]);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_unbounded_runs_until_token_ends() {
    let fetcher = ScriptedFetcher::new(vec![
        page(vec![1], Some("t2")),
        page(vec![2], Some("t3")),
        page(vec![3], None),
    ]);
    let stream = Paginator::new(spec(0), fetcher.clone()).spawn(1).unwrap();

    let items = stream.collect_items().await.unwrap();
    assert_eq!(items, vec![1, 2, 3]);
    assert_eq!(
        fetcher.tokens(),
        vec![None, Some("t2".to_string()), Some("t3".to_string())]
    );
}

#[tokio::test]
async fn test_bound_above_available_pages() {
    let fetcher = ScriptedFetcher::new(vec![page(vec![1], Some("t2")), page(vec![2], Some(""))]);
    let stream = Paginator::new(spec(10), fetcher.clone()).spawn(1).unwrap();

    assert_eq!(collect_pages(stream).await.len(), 2);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_empty_intermediate_page_is_emitted() {
    let fetcher = ScriptedFetcher::new(vec![
        page(vec![1], Some("t2")),
        page(vec![], Some("t3")),
        page(vec![2], None),
    ]);
    let stream = Paginator::new(spec(0), fetcher).spawn(1).unwrap();

    let pages = collect_pages(stream).await;
    let sizes: Vec<_> = pages.iter().map(Page::len).collect();
    assert_eq!(sizes, vec![1, 0, 1]);
}

#[tokio::test]
async fn test_error_page_ends_stream() {
    let fetcher = ScriptedFetcher::new(vec![
        page(vec![1, 2], Some("t2")),
        Err(Error::decode("unexpected end of input")),
        page(vec![3], None),
    ]);
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);
    let state = Paginator::new(spec(0), fetcher.clone()).run(tx).await;

    assert_eq!(state.state, PaginatorState::Failed);
    assert_eq!(state.pages_fetched, 1);
    assert_eq!(fetcher.calls(), 2);

    let first = rx.recv().await.unwrap();
    assert!(!first.is_err());
    let second = rx.recv().await.unwrap();
    assert_eq!(second.number, 2);
    assert!(second.err.as_ref().is_some_and(Error::is_decode));
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_failed_first_page() {
    let fetcher = ScriptedFetcher::new(vec![Err(Error::remote(403, "forbidden", "quota"))]);
    let stream = Paginator::new(spec(0), fetcher).spawn(1).unwrap();

    let pages = collect_pages(stream).await;
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].number, 1);
    assert_eq!(pages[0].err.as_ref().and_then(Error::status), Some(403));
}

#[tokio::test]
async fn test_done_state_and_counts() {
    let fetcher = ScriptedFetcher::new(vec![page(vec![1, 2, 3], Some("t2")), page(vec![4], None)]);
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);
    let state = Paginator::new(spec(0), fetcher).run(tx).await;

    assert_eq!(state.state, PaginatorState::Done);
    assert_eq!(state.pages_fetched, 2);
    assert_eq!(state.items_fetched, 4);
    assert_eq!(state.token, None);
    assert_eq!(rx.recv().await.map(|p| p.len()), Some(3));
}

#[tokio::test]
async fn test_identical_runs_are_identical() {
    let script = || {
        ScriptedFetcher::new(vec![
            page(vec![5, 3], Some("a")),
            page(vec![9, 1], Some("b")),
            page(vec![7], None),
        ])
    };

    let first = Paginator::new(spec(0), script()).spawn(1).unwrap();
    let second = Paginator::new(spec(0), script()).spawn(1).unwrap();

    assert_eq!(
        first.collect_items().await.unwrap(),
        second.collect_items().await.unwrap()
    );
}

#[tokio::test(start_paused = true)]
async fn test_backpressure_limits_fetch_ahead() {
    let fetcher = Arc::new(EndlessFetcher::default());
    let mut stream = Paginator::new(spec(0), fetcher.clone()).spawn(1).unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    // One page buffered, one waiting to be sent
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);

    assert_eq!(stream.next_page().await.unwrap().items, vec![0]);
    assert_eq!(stream.next_page().await.unwrap().items, vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_fetching() {
    let fetcher = Arc::new(EndlessFetcher::default());
    let mut stream = Paginator::new(spec(0), fetcher.clone()).spawn(1).unwrap();

    stream.next_page().await.unwrap();
    drop(stream);

    tokio::time::sleep(Duration::from_millis(20)).await;
    let calls = fetcher.calls.load(Ordering::SeqCst);
    assert!(calls <= 3, "fetched {calls} pages after drop");

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), calls);
}

#[tokio::test]
async fn test_cancel_drops_in_flight_fetch() {
    let started = Arc::new(Notify::new());
    let dropped = Arc::new(AtomicBool::new(false));
    let fetcher = Arc::new(HangingFetcher {
        calls: AtomicUsize::new(0),
        started: started.clone(),
        dropped: dropped.clone(),
    });
    let mut stream = Paginator::new(spec(0), fetcher.clone()).spawn(1).unwrap();

    assert_eq!(stream.next_page().await.unwrap().items, vec![1]);
    started.notified().await;
    assert!(!dropped.load(Ordering::SeqCst));

    let state = stream.cancel().await.unwrap();
    assert_eq!(state.state, PaginatorState::Cancelled);
    assert_eq!(state.pages_fetched, 1);
    assert!(dropped.load(Ordering::SeqCst));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cancel_after_completion() {
    let fetcher = ScriptedFetcher::new(vec![page(vec![1], None)]);
    let mut stream = Paginator::new(spec(0), fetcher).spawn(1).unwrap();

    assert!(stream.next_page().await.is_some());
    assert!(stream.next_page().await.is_none());
    let state = stream.cancel().await.unwrap();
    assert_eq!(state.state, PaginatorState::Done);
}

#[tokio::test]
async fn test_item_stream_flattens_and_ends_after_error() {
    let fetcher = ScriptedFetcher::new(vec![
        page(vec![1, 2], Some("t2")),
        page(vec![3], Some("t3")),
        Err(Error::transport("connection reset")),
    ]);
    let items: Vec<Result<u32>> = Paginator::new(spec(0), fetcher)
        .spawn(2)
        .unwrap()
        .items()
        .collect()
        .await;

    assert_eq!(items.len(), 4);
    assert_eq!(items[0].as_ref().ok(), Some(&1));
    assert_eq!(items[2].as_ref().ok(), Some(&3));
    assert!(items[3].is_err());
}

#[tokio::test]
async fn test_collect_items_returns_error() {
    let fetcher = ScriptedFetcher::new(vec![page(vec![1], Some("t2")), Err(Error::decode("bad"))]);
    let stream = Paginator::new(spec(0), fetcher).spawn(1).unwrap();

    let err = stream.collect_items().await.unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_spawn_without_runtime_is_config_error() {
    let fetcher = ScriptedFetcher::new(vec![]);
    let err = Paginator::new(spec(0), fetcher).spawn(1).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_next_page_blocking() {
    let fetcher = ScriptedFetcher::new(vec![page(vec![7], None)]);
    let page = tokio_test::block_on(async {
        let mut stream = Paginator::new(spec(0), fetcher).spawn(1).unwrap();
        stream.next_page().await
    });
    assert_eq!(page.map(|p| p.items), Some(vec![7]));
}
