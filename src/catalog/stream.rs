//! Cancellable stream of listed shows.
//!
//! A listing runs as its own Tokio task and hands shows over one at a time
//! through a channel of capacity 1, so the producer waits for the consumer
//! instead of buffering the catalog. The consumer may stop at any point:
//! [`ShowStream::cancel`] or dropping the stream aborts the producer.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::provider::{ProviderError, Show};

/// Counters reported by a listing that ran to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingSummary {
    /// Catalog entries examined.
    pub considered: usize,
    /// Shows handed to the stream.
    pub matched: usize,
}

/// Producer half given to the listing task.
#[derive(Debug, Clone)]
pub struct ShowSender {
    tx: mpsc::Sender<Show>,
}

impl ShowSender {
    /// Hand `show` to the consumer, waiting until it is ready for it.
    ///
    /// Returns `false` once the consumer has gone away; the producer should
    /// stop then.
    pub async fn emit(&self, show: Show) -> bool {
        self.tx.send(show).await.is_ok()
    }
}

/// Shows matched by a catalog listing, in catalog order.
///
/// Implements [`futures::Stream`]; the stream ends exactly once, when the
/// listing has considered every entry or has failed. Use [`finish`] to learn
/// which.
///
/// [`finish`]: ShowStream::finish
pub struct ShowStream {
    receiver: mpsc::Receiver<Show>,
    task: Option<JoinHandle<Result<ListingSummary, ProviderError>>>,
    /// Shows handed to the consumer so far.
    delivered: usize,
    cancelled: bool,
}

impl ShowStream {
    /// Run `producer` on a new task and stream what it emits.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn<F, Fut>(producer: F) -> Self
    where
        F: FnOnce(ShowSender) -> Fut,
        Fut: Future<Output = Result<ListingSummary, ProviderError>> + Send + 'static,
    {
        let (tx, receiver) = mpsc::channel(1);
        let task = tokio::spawn(producer(ShowSender { tx }));
        Self {
            receiver,
            task: Some(task),
            delivered: 0,
            cancelled: false,
        }
    }

    /// Receive the next show, or `None` once the listing has ended.
    pub async fn recv(&mut self) -> Option<Show> {
        let show = self.receiver.recv().await;
        if show.is_some() {
            self.delivered += 1;
        }
        show
    }

    /// Stop the listing. Shows not yet received are discarded.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Wait for the listing to end and report how it went.
    ///
    /// Shows not yet received are discarded. A fetch or decode failure, which
    /// only shows up as an early end of the stream, is returned here.
    ///
    /// After [`cancel`](ShowStream::cancel) the listing counts as done: if it
    /// was stopped midway, the summary covers only the shows received before
    /// cancelling.
    pub async fn finish(mut self) -> Result<ListingSummary, ProviderError> {
        self.receiver.close();
        while self.receiver.recv().await.is_some() {}

        let Some(task) = self.task.take() else {
            return Ok(ListingSummary::default());
        };
        match task.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() && self.cancelled => Ok(ListingSummary {
                considered: self.delivered,
                matched: self.delivered,
            }),
            Err(e) => Err(e.into()),
        }
    }
}

impl Stream for ShowStream {
    type Item = Show;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Show>> {
        let polled = self.receiver.poll_recv(cx);
        if let Poll::Ready(Some(_)) = &polled {
            self.delivered += 1;
        }
        polled
    }
}

impl Drop for ShowStream {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
