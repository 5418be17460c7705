// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::path::PathBuf;

/// Server configuration, read from `LEVELBOARD_*` environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub results_dir: PathBuf,
    /// Optional directory holding `home.html` / `repo.html` shell overrides.
    pub assets_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            results_dir: PathBuf::from("results"),
            assets_dir: None,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env::var("LEVELBOARD_BIND").unwrap_or(defaults.bind_addr),
            results_dir: env::var("LEVELBOARD_RESULTS_DIR")
                .map_or(defaults.results_dir, PathBuf::from),
            assets_dir: env::var("LEVELBOARD_ASSETS_DIR").ok().map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.results_dir, PathBuf::from("results"));
        assert!(cfg.assets_dir.is_none());
    }
}
