use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Entry;

/// The `type` field of the JSON data file.
///
/// Exports write numeric codes as integers. Imports accept either form, so a
/// file edited by hand with `"type": "3"` still loads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TypeValue {
    Number(i64),
    Text(String),
}

impl TypeValue {
    /// Only codes that print back identically become numbers (`"01"` stays text).
    pub fn from_code(code: &str) -> Self {
        match code.parse::<i64>() {
            Ok(n) if n.to_string() == code => TypeValue::Number(n),
            _ => TypeValue::Text(code.to_string()),
        }
    }

    pub fn to_code(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeValue::Number(n) => write!(f, "{n}"),
            TypeValue::Text(s) => f.write_str(s),
        }
    }
}

/// One element of the JSON data file used by export, import and sort.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExportRecord {
    /// Written on export, ignored on import.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub type_value: TypeValue,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<&Entry> for ExportRecord {
    fn from(entry: &Entry) -> Self {
        Self {
            id: Some(entry.id),
            type_value: TypeValue::from_code(&entry.type_code),
            name: entry.name.clone(),
            description: entry.description.clone(),
            url: entry.url.clone(),
        }
    }
}
