//! Scenario definition for headless showcase runs.

use anyhow::{Context, Result};
use epoch_core::Property;
use epoch_showcase::ModalPhase;
use serde::Deserialize;
use std::path::Path;

/// Sequence of input and assertion steps.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse scenario {}", path.display()))
    }
}

fn default_tolerance() -> f32 {
    0.01
}

/// One scenario step. Element ids are plain strings; pointer coordinates are
/// viewport pixels.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Wait {
        ms: u64,
    },
    Tick {
        frames: u32,
    },
    PointerMove {
        target: String,
        x: f32,
        y: f32,
    },
    PointerEnter {
        target: String,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    PointerLeave {
        target: String,
        #[serde(default)]
        x: f32,
        #[serde(default)]
        y: f32,
    },
    Click {
        target: String,
    },
    SelectCard {
        index: usize,
    },
    /// Key by DOM name (`Escape`, `Enter`, `ArrowLeft`, ...)
    Key {
        key: String,
    },
    DragStart {
        target: String,
    },
    DragMove {
        target: String,
        delta: f32,
    },
    DragEnd {
        target: String,
    },
    AssertPhase {
        phase: ModalPhase,
    },
    AssertProperty {
        id: String,
        property: Property,
        value: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    /// Passes when `value` is one of the element's class tokens
    AssertClass {
        id: String,
        value: String,
    },
    AssertPointerEvents {
        id: String,
        enabled: bool,
    },
}

impl ScenarioStep {
    /// Assertion name used in reports, `None` for input steps
    pub fn assertion_name(&self) -> Option<&'static str> {
        match self {
            ScenarioStep::AssertPhase { .. } => Some("assert_phase"),
            ScenarioStep::AssertProperty { .. } => Some("assert_property"),
            ScenarioStep::AssertClass { .. } => Some("assert_class"),
            ScenarioStep::AssertPointerEvents { .. } => Some("assert_pointer_events"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "name": "open glossy",
                "steps": [
                    { "type": "select_card", "index": 7 },
                    { "type": "wait", "ms": 900 },
                    { "type": "assert_phase", "phase": "open" },
                    { "type": "assert_property", "id": "modal-overlay", "property": "opacity", "value": 1.0 },
                    { "type": "key", "key": "Escape" }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.name.as_deref(), Some("open glossy"));
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(
            scenario.steps[2],
            ScenarioStep::AssertPhase { phase: ModalPhase::Open }
        ));
        match &scenario.steps[3] {
            ScenarioStep::AssertProperty { property, tolerance, .. } => {
                assert_eq!(*property, Property::Opacity);
                assert_eq!(*tolerance, 0.01);
            }
            other => panic!("unexpected step {other:?}"),
        }
        assert_eq!(scenario.steps[4].assertion_name(), None);
    }

    #[test]
    fn test_unknown_step_type_rejected() {
        let err = Scenario::from_json(r#"{ "steps": [ { "type": "teleport" } ] }"#).unwrap_err();
        assert!(err.to_string().contains("teleport"), "{err}");
    }
}
