//! Observable state for the photo overview screen.
//!
//! A [`PhotoFeed`] starts one fetch when it is created and publishes the
//! request status and the resulting photo list through `watch` channels.

use std::{
    any::Any,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use futures::{FutureExt, Stream};
use shared::domain::{ApiStatus, PhotoRecord};
use tokio::{sync::watch, task::JoinHandle};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::photo_client::PhotoFetchClient;

struct FeedSlots {
    status: watch::Sender<ApiStatus>,
    photos: watch::Sender<Vec<PhotoRecord>>,
}

/// `None` once the owning feed has been dropped; the fetch task only writes
/// while holding this lock and the slots are still present.
type SharedSlots = Arc<Mutex<Option<FeedSlots>>>;

pub struct PhotoFeed {
    slots: SharedSlots,
    status_rx: watch::Receiver<ApiStatus>,
    photos_rx: watch::Receiver<Vec<PhotoRecord>>,
    fetch_task: JoinHandle<()>,
}

impl PhotoFeed {
    /// Creates the feed and immediately starts fetching photos from `client`.
    ///
    /// Must be called from within a Tokio runtime. The fetch runs exactly once
    /// and is never retried; dropping the feed cancels it.
    pub fn new(client: Arc<dyn PhotoFetchClient>) -> Self {
        let (status, status_rx) = watch::channel(ApiStatus::Loading);
        let (photos, photos_rx) = watch::channel(Vec::new());
        let slots: SharedSlots = Arc::new(Mutex::new(Some(FeedSlots { status, photos })));

        debug!("photo feed created; starting fetch");
        let fetch_task = tokio::spawn(run_fetch(client, Arc::clone(&slots)));

        Self {
            slots,
            status_rx,
            photos_rx,
            fetch_task,
        }
    }

    pub fn status(&self) -> ApiStatus {
        *self.status_rx.borrow()
    }

    pub fn photos(&self) -> Vec<PhotoRecord> {
        self.photos_rx.borrow().clone()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<ApiStatus> {
        self.status_rx.clone()
    }

    pub fn subscribe_photos(&self) -> watch::Receiver<Vec<PhotoRecord>> {
        self.photos_rx.clone()
    }

    /// Yields the current status first, then every subsequent change.
    ///
    /// Intermediate values may be coalesced if the consumer falls behind; the
    /// stream ends when the feed is dropped.
    pub fn status_stream(&self) -> impl Stream<Item = ApiStatus> + Send + Unpin + 'static {
        WatchStream::new(self.status_rx.clone())
    }

    /// Waits until the fetch has either succeeded or failed.
    pub async fn wait_settled(&self) -> ApiStatus {
        let mut status_rx = self.status_rx.clone();
        // `self.slots` keeps the senders alive, so the channel cannot close
        // while this borrow lasts; the fallback only keeps the match total.
        let settled = status_rx
            .wait_for(|status| status.is_settled())
            .await
            .map(|status| *status);
        match settled {
            Ok(status) => status,
            Err(_) => *status_rx.borrow(),
        }
    }
}

impl Drop for PhotoFeed {
    fn drop(&mut self) {
        lock_slots(&self.slots).take();
        self.fetch_task.abort();
    }
}

async fn run_fetch(client: Arc<dyn PhotoFetchClient>, slots: SharedSlots) {
    match AssertUnwindSafe(client.fetch_all()).catch_unwind().await {
        Ok(Ok(photos)) => {
            let count = photos.len();
            let published = publish(&slots, |slots| {
                slots.photos.send_replace(photos);
                slots.status.send_replace(ApiStatus::Done);
            });
            if published {
                info!(count, "photo feed loaded");
            }
        }
        Ok(Err(err)) => {
            warn!(kind = err.kind(), error = %err, "photo feed fetch failed");
            publish_failure(&slots);
        }
        Err(panic) => {
            warn!(
                kind = "panic",
                error = panic_message(panic.as_ref()),
                "photo feed fetch panicked"
            );
            publish_failure(&slots);
        }
    }
}

fn publish_failure(slots: &SharedSlots) {
    publish(slots, |slots| {
        slots.status.send_replace(ApiStatus::Error);
        slots.photos.send_replace(Vec::new());
    });
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

fn publish(slots: &SharedSlots, update: impl FnOnce(&FeedSlots)) -> bool {
    let guard = lock_slots(slots);
    match guard.as_ref() {
        Some(slots) => {
            update(slots);
            true
        }
        None => {
            debug!("photo feed dropped before fetch completed; discarding result");
            false
        }
    }
}

fn lock_slots(slots: &Mutex<Option<FeedSlots>>) -> MutexGuard<'_, Option<FeedSlots>> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
