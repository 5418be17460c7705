// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use levelboard_model::ClassId;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Display label for one construct class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLabel {
    pub class: ClassId,
    pub label: String,
}

#[derive(Debug)]
pub struct LoadError(pub String);

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::error::Error for LoadError {}

#[async_trait]
pub trait LabelLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<ClassLabel>, LoadError>;
}

/// Cache of class display labels. Passed explicitly to whoever needs labels;
/// there is deliberately no module-level shared instance. `force` is the one
/// invalidation trigger.
#[derive(Default)]
pub struct ClassLabelCache {
    cached: Mutex<Vec<ClassLabel>>,
}

impl ClassLabelCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return cached labels, loading through `loader` when the cache is empty
    /// or `force` is set.
    pub async fn get_or_fetch(
        &self,
        loader: &dyn LabelLoader,
        force: bool,
    ) -> Result<Vec<ClassLabel>, LoadError> {
        let mut cached = self.cached.lock().await;
        if cached.is_empty() || force {
            *cached = loader.load().await?;
        }
        Ok(cached.clone())
    }
}
