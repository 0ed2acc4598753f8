use serde::{Deserialize, Serialize};

/// One catalog row as it travels over the wire (`GET /get/{id}`, edit responses).
///
/// The `type` key holds the type code as stored in the table, not its label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Entry {
    pub id: i64,
    #[serde(rename = "type")]
    pub type_code: String,
    pub name: String,
    pub description: String,
    pub url: String,
}
