use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Action type of the entries the replay cares about. Everything else in the
/// log (navigation, camera moves, etc.) is passed over.
pub const SELECT_ACTION: &str = "select_customization_option";

/// Sentinel the editor logs in place of the real attribute name when the user
/// picks the "empty" tile. The true attribute must be recovered from the
/// preceding entry.
pub const PLACEHOLDER_PARAMETER: &str = "Empty_Icon";

/// One entry of the recorded action log.
///
/// Field names mirror the editor's export schema verbatim. Unknown fields are
/// retained in `extra` so a corrected copy round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    #[serde(rename = "Action_type", default)]
    pub action_type: String,

    /// Attribute the event applies to (e.g. "Hair", "Gender").
    #[serde(rename = "Parameter", default)]
    pub parameter: String,

    /// Value the user selected, typically embedding a generated asset id.
    #[serde(rename = "New_Value", default)]
    pub new_value: String,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ActionEvent {
    /// True for entries of the customization-selection type.
    pub fn is_selection(&self) -> bool {
        self.action_type == SELECT_ACTION
    }
}

/// Top-level shape of the input document. A document without an `action_log`
/// array is treated as an empty log rather than an error.
#[derive(Debug, Default, Deserialize)]
pub struct ActionLogDocument {
    #[serde(default)]
    pub action_log: Vec<ActionEvent>,
}
