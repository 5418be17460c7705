// SPDX-License-Identifier: Apache-2.0

//! Keeps three representations consistent under one-directional flow:
//!
//! - URL change -> (synchronizer observes) -> fetch
//! - filter change from the UI -> write to URL -> (synchronizer observes) -> fetch
//!
//! The orchestrator never writes the URL as a reaction to a URL change, which
//! is what rules out feedback loops. Pagination resets are a caller concern.

use crate::route::RouteHandle;
use crate::sync::{Fetcher, QuerySynchronizer, SyncOptions};
use levelboard_query::{
    deserialize_filter_value, serialize_filters, FilterItem, FilterState, FilterValue,
};
use std::sync::{Arc, Mutex};

pub struct FilterOrchestrator {
    handle: RouteHandle,
    path: String,
    items: Arc<Vec<FilterItem>>,
    state: Arc<Mutex<FilterState>>,
    _sync: QuerySynchronizer,
}

impl FilterOrchestrator {
    /// Hydrates filter state from the current URL, then wires the
    /// change-triggered fetch. The order matters: the first fetch must
    /// reflect the true starting state, not the declared defaults.
    pub fn new(
        handle: RouteHandle,
        path: impl Into<String>,
        items: Vec<FilterItem>,
        initial_state: FilterState,
        fetcher: Arc<dyn Fetcher>,
        options: SyncOptions,
    ) -> Self {
        let path = path.into();
        let items = Arc::new(items);

        let mut state = initial_state;
        let query = handle.current().query;
        for item in items.iter() {
            if let Some(value) = deserialize_filter_value(item, &query) {
                state.insert(item.key.clone(), value);
            }
        }

        let sync = QuerySynchronizer::spawn(&handle, path.clone(), fetcher, options);

        Self {
            handle,
            path,
            items,
            state: Arc::new(Mutex::new(state)),
            _sync: sync,
        }
    }

    /// Snapshot of the current filter state.
    #[must_use]
    pub fn state(&self) -> FilterState {
        self.state.lock().expect("filter state lock").clone()
    }

    /// Apply one filter change from the UI and mirror it into the URL.
    pub fn set_filter(&self, key: impl Into<String>, value: FilterValue) {
        self.state
            .lock()
            .expect("filter state lock")
            .insert(key.into(), value);
        self.sync_to_url();
    }

    /// Apply several filter changes at once, then mirror them into the URL
    /// with a single navigation.
    pub fn set_filters(&self, changes: impl IntoIterator<Item = (String, FilterValue)>) {
        {
            let mut state = self.state.lock().expect("filter state lock");
            for (key, value) in changes {
                state.insert(key, value);
            }
        }
        self.sync_to_url();
    }

    /// Serialize every declared filter into the URL. Only non-empty values
    /// appear; the route handle drops the write if the view is no longer
    /// active.
    pub fn sync_to_url(&self) {
        let query = {
            let state = self.state.lock().expect("filter state lock");
            serialize_filters(&self.items, &state)
        };
        self.handle.replace_query(&self.path, query);
    }
}
