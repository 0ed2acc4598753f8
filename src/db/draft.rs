use catalog_schema::ExportRecord;
use std::collections::HashMap;

use crate::db::Column;
use crate::error::{CatalogError, FieldErrors};

const REQUIRED_MESSAGE: &str = "This field is required";

/// Validated values for every editable column, used by insert, update and import.
///
/// Values are trimmed and guaranteed non-empty; the only way to obtain one is
/// through a validating constructor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    type_code: String,
    name: String,
    description: String,
    url: String,
}

impl EntryDraft {
    /// Validates a column -> value mapping, typically a submitted form.
    ///
    /// Keys that are not editable columns (`id`, `page`, ...) are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Result<Self, CatalogError> {
        let mut errors = FieldErrors::default();
        let mut take = |column: Column| -> String {
            match fields.get(column.as_str()).map(|v| v.trim()) {
                Some(value) if !value.is_empty() => value.to_string(),
                _ => {
                    errors.insert(column, REQUIRED_MESSAGE);
                    String::new()
                }
            }
        };

        let draft = Self {
            type_code: take(Column::Type),
            name: take(Column::Name),
            description: take(Column::Description),
            url: take(Column::Url),
        };

        if errors.is_empty() {
            Ok(draft)
        } else {
            Err(CatalogError::Validation(errors))
        }
    }

    pub fn new(
        type_code: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let fields = HashMap::from([
            (Column::Type.as_str().to_string(), type_code.into()),
            (Column::Name.as_str().to_string(), name.into()),
            (Column::Description.as_str().to_string(), description.into()),
            (Column::Url.as_str().to_string(), url.into()),
        ]);
        Self::from_fields(&fields)
    }

    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TryFrom<&ExportRecord> for EntryDraft {
    type Error = CatalogError;

    fn try_from(record: &ExportRecord) -> Result<Self, Self::Error> {
        EntryDraft::new(
            record.type_value.to_code(),
            record.name.clone(),
            record.description.clone(),
            record.url.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn values_are_trimmed() {
        let draft = EntryDraft::from_fields(&form(&[
            ("type", " 1 "),
            ("name", "Tool A\n"),
            ("description", "x"),
            ("url", "http://a"),
            ("page", "3"),
        ]))
        .expect("valid form");
        assert_eq!(draft.type_code(), "1");
        assert_eq!(draft.name(), "Tool A");
    }

    #[test]
    fn blank_and_missing_fields_are_reported_per_column() {
        let err = EntryDraft::from_fields(&form(&[("type", "1"), ("name", "   ")]))
            .expect_err("blank name and missing columns");
        let errors = match err {
            CatalogError::Validation(errors) => errors,
            other => panic!("expected validation error, got {other:?}"),
        };
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Column::Name), Some(REQUIRED_MESSAGE));
        assert!(errors.get(Column::Type).is_none());
        assert_eq!(
            errors.to_string(),
            "name: This field is required; description: This field is required; url: This field is required"
        );
    }
}
