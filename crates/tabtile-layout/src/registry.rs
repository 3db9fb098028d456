// ABOUTME: Registry mapping a tab type to the factory that builds its content.
// ABOUTME: Lets restored layouts rebuild live tabs from persisted metadata.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use crate::tab::{ContentRef, TabSpec};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("No content factory registered for tab type {0:?}")]
    Unregistered(String),

    #[error("Invalid data for {kind} tab: {reason}")]
    InvalidData { kind: String, reason: String },
}

type Factory = Box<dyn Fn(&Value) -> Result<ContentRef, ContentError> + Send + Sync>;

#[derive(Default)]
pub struct ContentRegistry {
    factories: HashMap<String, Factory>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the factory for a tab type
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&Value) -> Result<ContentRef, ContentError> + Send + Sync + 'static,
    {
        self.factories.insert(kind.into(), Box::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    pub fn resolve(&self, kind: &str, data: &Value) -> Result<ContentRef, ContentError> {
        let factory = self
            .factories
            .get(kind)
            .ok_or_else(|| ContentError::Unregistered(kind.to_string()))?;
        factory(data)
    }

    /// Build a tab request with its content already resolved
    pub fn tab_spec(&self, kind: &str, data: Value) -> Result<TabSpec, ContentError> {
        let content = self.resolve(kind, &data)?;
        Ok(TabSpec::new(kind, data).content(content))
    }
}

impl fmt::Debug for ContentRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&String> = self.factories.keys().collect();
        kinds.sort();
        f.debug_struct("ContentRegistry").field("kinds", &kinds).finish()
    }
}
