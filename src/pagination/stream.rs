//! Consumer side of a running paginator

use super::types::{Page, PaginationState};
use crate::error::{Error, Result};
use futures::Stream;
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{ready, Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Pages of one query, in fetch order.
///
/// Dropping the stream cancels the query: the producing task notices the
/// closed channel and stops within one fetch cycle.
///
/// ```rust,ignore
/// use futures::StreamExt;
///
/// let mut pages = client.search(&param)?;
/// while let Some(page) = pages.next().await {
///     let items = page.into_result()?;
///     println!("{} items", items.len());
/// }
/// ```
pub struct PageStream<T> {
    rx: mpsc::Receiver<Page<T>>,
    handle: Option<JoinHandle<PaginationState>>,
}

impl<T> PageStream<T> {
    pub(crate) fn new(rx: mpsc::Receiver<Page<T>>, handle: JoinHandle<PaginationState>) -> Self {
        Self {
            rx,
            handle: Some(handle),
        }
    }

    /// Wait for the next page; `None` once the stream has ended
    pub async fn next_page(&mut self) -> Option<Page<T>> {
        self.rx.recv().await
    }

    /// Flatten into individual items
    pub fn items(self) -> ItemStream<T> {
        ItemStream {
            pages: self,
            buffer: VecDeque::new(),
            done: false,
        }
    }

    /// Drain the stream into one list, stopping at the first error
    pub async fn collect_items(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page.into_result()?);
        }
        Ok(items)
    }

    /// Stop the query and wait for its task to finish.
    ///
    /// Pages already buffered are discarded. Returns the final state of
    /// the paginator.
    pub async fn cancel(mut self) -> Result<PaginationState> {
        self.rx.close();

        match self.handle.take() {
            Some(handle) => handle
                .await
                .map_err(|e| Error::Other(format!("pagination task failed: {e}"))),
            None => Ok(PaginationState::default()),
        }
    }
}

impl<T> Stream for PageStream<T> {
    type Item = Page<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().rx.poll_recv(cx)
    }
}

impl<T> std::fmt::Debug for PageStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageStream").finish_non_exhaustive()
    }
}

pin_project! {
    /// Items of one query, in server order.
    ///
    /// Yields `Err` once if the query failed, then ends.
    pub struct ItemStream<T> {
        #[pin]
        pages: PageStream<T>,
        buffer: VecDeque<T>,
        done: bool,
    }
}

impl<T> Stream for ItemStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }
            if *this.done {
                return Poll::Ready(None);
            }

            match ready!(this.pages.as_mut().poll_next(cx)) {
                Some(page) => match page.err {
                    Some(err) => {
                        *this.done = true;
                        return Poll::Ready(Some(Err(err)));
                    }
                    None => this.buffer.extend(page.items),
                },
                None => {
                    *this.done = true;
                    return Poll::Ready(None);
                }
            }
        }
    }
}
