// SPDX-License-Identifier: Apache-2.0

use levelboard_query::QueryMap;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// One location snapshot: active path plus its decoded query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub query: QueryMap,
}

impl Route {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: QueryMap::new(),
        }
    }
}

/// Process-local stand-in for the browser location. Observers subscribe to a
/// watch channel; writers go through [`RouteHandle::replace_query`], which
/// carries the guards that keep filter views from fighting over navigation.
#[derive(Debug, Clone)]
pub struct RouteHandle {
    inner: Arc<watch::Sender<Route>>,
}

impl RouteHandle {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(Route::new(path));
        Self { inner: Arc::new(tx) }
    }

    #[must_use]
    pub fn with_query(path: impl Into<String>, query: QueryMap) -> Self {
        let (tx, _rx) = watch::channel(Route {
            path: path.into(),
            query,
        });
        Self { inner: Arc::new(tx) }
    }

    #[must_use]
    pub fn current(&self) -> Route {
        self.inner.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.inner.subscribe()
    }

    /// Replace the query of the current route.
    ///
    /// No-op when the active path differs from the caller's bound path (a
    /// view must not rewrite the URL mid-navigation) and when the query is
    /// already identical (duplicated navigation is routine while filtering).
    pub fn replace_query(&self, bound_path: &str, query: QueryMap) {
        let current = self.inner.borrow().clone();
        if current.path != bound_path {
            debug!(
                active = current.path.as_str(),
                bound = bound_path,
                "replace_query skipped: route no longer active"
            );
            return;
        }
        if current.query == query {
            return;
        }
        self.inner.send_replace(Route {
            path: current.path,
            query,
        });
    }

    /// Switch to a new path, clearing the query.
    pub fn navigate(&self, path: impl Into<String>) {
        self.inner.send_replace(Route::new(path));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_query_publishes_on_active_path() {
        let handle = RouteHandle::new("/repos");
        handle.replace_query("/repos", QueryMap::parse("owner=alice"));
        assert_eq!(handle.current().query.get_one("owner"), Some("alice"));
    }

    #[test]
    fn replace_query_is_guarded_by_path() {
        let handle = RouteHandle::new("/repos");
        handle.navigate("/home");
        handle.replace_query("/repos", QueryMap::parse("owner=alice"));
        assert!(handle.current().query.is_empty());
        assert_eq!(handle.current().path, "/home");
    }

    #[test]
    fn duplicate_query_does_not_notify_subscribers() {
        let handle = RouteHandle::new("/repos");
        handle.replace_query("/repos", QueryMap::parse("owner=alice"));
        let mut rx = handle.subscribe();
        rx.mark_unchanged();
        handle.replace_query("/repos", QueryMap::parse("owner=alice"));
        assert!(!rx.has_changed().expect("channel open"));
    }

    #[test]
    fn navigate_clears_the_query() {
        let handle = RouteHandle::new("/repos");
        handle.replace_query("/repos", QueryMap::parse("owner=alice"));
        handle.navigate("/home");
        assert!(handle.current().query.is_empty());
    }
}
