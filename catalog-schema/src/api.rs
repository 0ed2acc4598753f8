use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Entry;

/// `{success, message}` envelope shared by the AJAX endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Successful `POST /edit/{id}` payload.
#[derive(Debug, Clone, Serialize)]
pub struct EditResponse {
    pub success: bool,
    pub message: String,
    pub record: Entry,
    pub type_mapping: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotFoundBody {
    pub error: String,
}

/// An id that may arrive as a JSON number or a numeric string.
///
/// Drag handles read ids from `data-id` attributes, so browsers tend to send strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LaxId {
    Number(i64),
    Text(String),
}

impl LaxId {
    pub fn to_id(&self) -> Option<i64> {
        match self {
            LaxId::Number(n) => Some(*n),
            LaxId::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// `POST /swap_positions` body. Both ids are optional so that a missing one
/// can be reported as a request error instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SwapRequest {
    #[serde(default)]
    pub id1: Option<LaxId>,
    #[serde(default)]
    pub id2: Option<LaxId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_request_accepts_numbers_and_strings() {
        let req: SwapRequest =
            serde_json::from_str(r#"{"id1": 4, "id2": " 9 "}"#).expect("valid body");
        assert_eq!(req.id1.and_then(|id| id.to_id()), Some(4));
        assert_eq!(req.id2.and_then(|id| id.to_id()), Some(9));
    }

    #[test]
    fn swap_request_tolerates_missing_ids() {
        let req: SwapRequest = serde_json::from_str(r#"{"id1": "x"}"#).expect("valid body");
        assert_eq!(req.id1.and_then(|id| id.to_id()), None);
        assert!(req.id2.is_none());
    }
}
