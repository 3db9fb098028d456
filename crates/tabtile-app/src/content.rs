// ABOUTME: Content kinds the reading app can host in tabs.
// ABOUTME: Registers one factory per kind so persisted layouts can be rebuilt.

use serde_json::Value;
use std::sync::Arc;

use tabtile_layout::{ContentError, ContentRef, ContentRegistry, TabContent};

/// Kinds of view that take a target id in their data
const TARGETED_KINDS: &[&str] = &["document", "flashcards", "extract"];

/// Kinds of view that need no target
const STANDALONE_KINDS: &[&str] = &["queue", "review", "library"];

/// Placeholder for the view the UI would mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewHandle {
    pub kind: String,
    pub target: Option<String>,
}

impl TabContent for ViewHandle {}

pub fn registry() -> ContentRegistry {
    let mut registry = ContentRegistry::new();
    for &kind in TARGETED_KINDS {
        registry.register(kind, move |data: &Value| {
            let target = data.get("id").and_then(Value::as_str).ok_or_else(|| {
                ContentError::InvalidData {
                    kind: kind.to_string(),
                    reason: "missing string \"id\"".to_string(),
                }
            })?;
            Ok(Arc::new(ViewHandle {
                kind: kind.to_string(),
                target: Some(target.to_string()),
            }) as ContentRef)
        });
    }
    for &kind in STANDALONE_KINDS {
        registry.register(kind, move |_: &Value| {
            Ok(Arc::new(ViewHandle {
                kind: kind.to_string(),
                target: None,
            }) as ContentRef)
        });
    }
    registry
}
