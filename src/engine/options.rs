//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Field name used for the subject's state unless configured otherwise.
pub const DEFAULT_STATE_FIELD: &str = "state";

/// Settings for an [`Engine`](crate::engine::Engine).
///
/// Deserializable with defaults, so an embedding can nest it inside its own
/// configuration and omit whatever it does not override.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Name of the subject field that holds the current state.
    pub state_field: String,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            state_field: DEFAULT_STATE_FIELD.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_field_is_state() {
        assert_eq!(EngineOptions::default().state_field, "state");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let options: EngineOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, EngineOptions::default());

        let options: EngineOptions = serde_json::from_str(r#"{"state_field":"status"}"#).unwrap();
        assert_eq!(options.state_field, "status");
    }
}
