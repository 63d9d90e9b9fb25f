//! Capability checks for the acting user.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Capability required to read drafts and previews.
pub const EDIT_OTHERS_PAGES: &str = "edit_others_pages";

/// Host-side capability checker for the current request's actor
pub trait CapabilityChecker: Send + Sync {
    fn current_user_can(&self, capability: &str) -> bool;

    /// Id of the acting user; `None` for anonymous callers
    fn current_user_id(&self) -> Option<u64>;
}

/// Actor with an explicit capability set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn new(id: u64, capabilities: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id: Some(id),
            capabilities: capabilities.into_iter().map(Into::into).collect(),
        }
    }

    /// Editor actor holding the preview capability
    pub fn editor(id: u64) -> Self {
        Self::new(id, [EDIT_OTHERS_PAGES])
    }
}

impl CapabilityChecker for Actor {
    fn current_user_can(&self, capability: &str) -> bool {
        self.id.is_some() && self.capabilities.contains(capability)
    }

    fn current_user_id(&self) -> Option<u64> {
        self.id
    }
}
