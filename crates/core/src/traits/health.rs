//! Per-component health probe result

use serde::{Deserialize, Serialize};

/// Outcome of one component's health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    pub healthy: bool,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ComponentHealth {
    pub fn ok() -> Self {
        Self {
            healthy: true,
            detail: None,
        }
    }

    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            healthy: false,
            detail: Some(detail.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors() {
        assert!(ComponentHealth::ok().healthy);
        let failing = ComponentHealth::failing("model not loaded");
        assert!(!failing.healthy);
        assert_eq!(failing.detail.as_deref(), Some("model not loaded"));
    }
}
