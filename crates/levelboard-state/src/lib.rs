#![forbid(unsafe_code)]
//! Session-state runtime for the levelboard frontend: a process-local route
//! handle standing in for the browser location, a debounced query-to-fetch
//! synchronizer, and the filter orchestrator tying them to the codec.
//!
//! Everything here is serialized through the async event loop; the only
//! suspend points are debounce timers and the caller's fetch futures.

mod labels;
mod notify;
mod orchestrator;
mod prefs;
mod route;
mod sync;

pub use labels::{ClassLabel, ClassLabelCache, LabelLoader, LoadError};
pub use notify::{Notice, Notifier, Severity, MAX_NOTICES};
pub use orchestrator::FilterOrchestrator;
pub use prefs::{JsonFilePrefStore, Language, MemoryPrefStore, PrefStore, Preferences, Theme};
pub use route::{Route, RouteHandle};
pub use sync::{Fetcher, QuerySynchronizer, SyncOptions};

pub const CRATE_NAME: &str = "levelboard-state";
