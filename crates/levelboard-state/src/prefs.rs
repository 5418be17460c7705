// SPDX-License-Identifier: Apache-2.0

//! Theme and language preferences, read once at startup and written on
//! toggle. The store trait is the stand-in for browser local storage; a
//! failed write degrades to a warning, never an error surfaced to the view.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::warn;

const THEME_KEY: &str = "theme";
const LANG_KEY: &str = "lang";

pub trait PrefStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store, used in tests and as the default.
#[derive(Debug, Default)]
pub struct MemoryPrefStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl PrefStore for MemoryPrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("pref lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .expect("pref lock")
            .insert(key.to_string(), value.to_string());
    }
}

/// Store backed by one JSON object file.
#[derive(Debug)]
pub struct JsonFilePrefStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl JsonFilePrefStore {
    /// Open the store, reading any existing file. A missing or unreadable
    /// file starts empty.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(path = %path.display(), %err, "preference file unreadable, starting empty");
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn persist(&self, values: &BTreeMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(values) {
            Ok(s) => s,
            Err(err) => {
                warn!(%err, "preferences not serializable");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), %err, "preference write failed");
        }
    }
}

impl PrefStore for JsonFilePrefStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().expect("pref lock").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().expect("pref lock");
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Es,
}

impl Language {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn PrefStore>,
}

impl Preferences {
    #[must_use]
    pub fn new(store: Arc<dyn PrefStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) {
        self.store.set(THEME_KEY, theme.as_str());
    }

    pub fn toggle_theme(&self) -> Theme {
        let next = self.theme().toggle();
        self.set_theme(next);
        next
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.store
            .get(LANG_KEY)
            .as_deref()
            .and_then(Language::parse)
            .unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) {
        self.store.set(LANG_KEY, language.as_str());
    }
}
