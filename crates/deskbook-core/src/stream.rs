// ── Store subscriptions ──
//
// Consumers re-render from these: every store mutation wakes the receiver
// with a fresh snapshot.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::store::BookingState;

/// A subscription to the booking store.
///
/// Holds the snapshot seen at creation (or at the last `changed()`) and
/// waits for further mutations.
pub struct StoreStream {
    current: BookingState,
    receiver: watch::Receiver<BookingState>,
}

impl StoreStream {
    pub(crate) fn new(receiver: watch::Receiver<BookingState>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// Snapshot captured at creation or at the last `changed()`.
    pub fn current(&self) -> &BookingState {
        &self.current
    }

    /// Latest snapshot (may be newer than `current()`).
    pub fn latest(&self) -> BookingState {
        self.receiver.borrow().clone()
    }

    /// Wait for the next mutation and return the new snapshot.
    /// `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<BookingState> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` of snapshots.
    pub fn into_stream(self) -> StoreWatchStream {
        StoreWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter over the store's watch channel. Yields the current
/// snapshot first, then one per mutation (intermediate ones may coalesce).
pub struct StoreWatchStream {
    inner: WatchStream<BookingState>,
}

impl Stream for StoreWatchStream {
    type Item = BookingState;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
