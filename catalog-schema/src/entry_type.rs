use serde::Serialize;
use std::collections::BTreeMap;

/// Known type codes with their display labels, in display order.
pub const KNOWN_TYPES: [(&str, &str); 6] = [
    ("1", "System"),
    ("2", "Productivity"),
    ("3", "Development"),
    ("4", "AI"),
    ("5", "Operations"),
    ("6", "Docs & Tutorials"),
];

pub fn type_label(code: &str) -> Option<&'static str> {
    KNOWN_TYPES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, label)| *label)
}

/// Label for a type code; unknown codes are shown verbatim.
pub fn display_label(code: &str) -> &str {
    type_label(code).unwrap_or(code)
}

/// Position of a code in the display order. Unknown codes sort last.
pub fn display_rank(code: &str) -> usize {
    KNOWN_TYPES
        .iter()
        .position(|(known, _)| *known == code)
        .unwrap_or(usize::MAX)
}

/// Code -> label map, serialized as the `type_mapping` object of edit responses.
pub fn type_mapping() -> BTreeMap<&'static str, &'static str> {
    KNOWN_TYPES.iter().copied().collect()
}

/// A selectable type in the filter dropdown or the add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeOption {
    pub code: String,
    pub label: String,
}

impl TypeOption {
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let label = display_label(&code).to_string();
        Self { code, label }
    }
}
