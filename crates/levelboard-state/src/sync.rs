// SPDX-License-Identifier: Apache-2.0

//! Debounced bridge from URL-query changes to data fetches.
//!
//! The flow is strictly one-directional (URL -> fetch). The synchronizer
//! never writes the URL itself; updating it is the view's responsibility.
//! Forcing every fetch through the URL keeps history navigation and deep
//! links consistent for free.

use crate::route::RouteHandle;
use async_trait::async_trait;
use levelboard_query::{query_changed, QueryMap};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// The data-fetch callback. Fetches are spawned, not awaited or serialized:
/// a superseded slow fetch may resolve after a newer one and overwrite
/// fresher state (last-writer-wins, as in the system this models).
#[async_trait]
pub trait Fetcher: Send + Sync + 'static {
    async fn fetch(&self);
}

#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Wait collapsing rapid query changes into one fetch.
    pub debounce: Duration,
    /// Params whose changes must not trigger a fetch.
    pub ignore_params: Vec<String>,
    /// Fire once on spawn, skipping the debounce.
    pub immediate: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(400),
            ignore_params: Vec::new(),
            immediate: true,
        }
    }
}

/// Invokes a fetcher whenever the relevant subset of the URL query changes
/// while the bound route stays active. Holds a single pending debounce timer;
/// any new change cancels and restarts it.
pub struct QuerySynchronizer {
    watcher: JoinHandle<()>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl QuerySynchronizer {
    pub fn spawn(
        handle: &RouteHandle,
        bound_path: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
        options: SyncOptions,
    ) -> Self {
        let bound_path = bound_path.into();
        let mut rx = handle.subscribe();
        let pending = Arc::new(Mutex::new(None));
        let pending_in_task = Arc::clone(&pending);

        let watcher = tokio::spawn(async move {
            let mut previous: Option<QueryMap> = None;
            loop {
                let route = rx.borrow_and_update().clone();
                // The snapshot advances even while another route is active;
                // only the fetch itself is guarded against ghost firing.
                let observed = previous.replace(route.query.clone());
                if route.path == bound_path {
                    match observed {
                        None => {
                            if options.immediate {
                                execute(&pending_in_task, &fetcher, Duration::ZERO);
                            }
                        }
                        Some(old) => {
                            if query_changed(&old, &route.query, &options.ignore_params) {
                                execute(&pending_in_task, &fetcher, options.debounce);
                            }
                        }
                    }
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        });

        Self { watcher, pending }
    }
}

/// Cancel any pending execution, then run the fetcher after `wait`.
fn execute(pending: &Arc<Mutex<Option<JoinHandle<()>>>>, fetcher: &Arc<dyn Fetcher>, wait: Duration) {
    let fetcher = Arc::clone(fetcher);
    let task = tokio::spawn(async move {
        if !wait.is_zero() {
            sleep(wait).await;
        }
        // Detach the fetch: cancelling a pending timer must never cancel a
        // fetch that already started.
        tokio::spawn(async move { fetcher.fetch().await });
    });
    let mut slot = pending.lock().expect("pending timer lock");
    if let Some(stale) = slot.replace(task) {
        stale.abort();
    }
}

impl Drop for QuerySynchronizer {
    fn drop(&mut self) {
        self.watcher.abort();
        if let Some(task) = self.pending.lock().expect("pending timer lock").take() {
            task.abort();
        }
    }
}
