//! Dropdown option helpers
//!
//! Options feed the host's UI when it lists record types, fields or
//! other Salesforce metadata.

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// A single selectable option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodePropertyOption {
    /// Display name
    pub name: String,
    /// Value sent back when the option is chosen
    pub value: JsonValue,
}

impl NodePropertyOption {
    /// Create an option
    pub fn new(name: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Sort options by name, ascending. Options with equal names keep their order.
pub fn sort_options(options: &mut [NodePropertyOption]) {
    options.sort_by(|a, b| a.name.cmp(&b.name));
}
