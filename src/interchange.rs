//! JSON data file: export the table, import it back, sort it in place.

use catalog_schema::{Entry, ExportRecord, TypeValue};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::cmp::Ordering;
use std::path::Path;
use tracing::info;

use crate::db::{DbActorHandle, EntryDraft, EntryFilter};
use crate::error::CatalogError;

/// Serializes records with four-space indentation; non-ASCII text is kept as-is.
pub fn to_pretty_json(records: &[ExportRecord]) -> Result<String, CatalogError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut ser)?;
    String::from_utf8(buf)
        .map_err(|e| CatalogError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub async fn read_records(path: &Path) -> Result<Vec<ExportRecord>, CatalogError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

pub async fn write_records(path: &Path, records: &[ExportRecord]) -> Result<(), CatalogError> {
    let json = to_pretty_json(records)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}

/// Writes every entry, in id order, to `path`. Returns the number written.
pub async fn export_table(db: &DbActorHandle, path: &Path) -> Result<usize, CatalogError> {
    let rows = db.list(EntryFilter::default(), None).await?;
    let records: Vec<ExportRecord> = rows
        .into_iter()
        .map(Entry::from)
        .map(|entry| ExportRecord::from(&entry))
        .collect();

    write_records(path, &records).await?;
    info!(path = %path.display(), exported = records.len(), "table exported");
    Ok(records.len())
}

/// Replaces the table with the records in `path`.
///
/// Every record is validated before anything is written; one bad record
/// aborts the whole import.
pub async fn import_file(db: &DbActorHandle, path: &Path) -> Result<u64, CatalogError> {
    let records = read_records(path).await?;
    let drafts = records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            EntryDraft::try_from(record)
                .map_err(|e| CatalogError::InvalidRequest(format!("record #{idx}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let imported = db.replace_all(drafts).await?;
    info!(path = %path.display(), imported, "table imported");
    Ok(imported)
}

/// Stable sort by type, then by the character length of the name.
pub fn sort_records(records: &mut [ExportRecord]) {
    records.sort_by(|a, b| {
        compare_types(&a.type_value, &b.type_value)
            .then_with(|| a.name.chars().count().cmp(&b.name.chars().count()))
    });
}

/// Numeric codes first in numeric order, then text codes lexicographically.
fn compare_types(a: &TypeValue, b: &TypeValue) -> Ordering {
    match (a, b) {
        (TypeValue::Number(x), TypeValue::Number(y)) => x.cmp(y),
        (TypeValue::Number(_), TypeValue::Text(_)) => Ordering::Less,
        (TypeValue::Text(_), TypeValue::Number(_)) => Ordering::Greater,
        (TypeValue::Text(x), TypeValue::Text(y)) => x.cmp(y),
    }
}

/// Sorts the data file at `path` in place. Returns the number of records.
pub async fn sort_file(path: &Path) -> Result<usize, CatalogError> {
    let mut records = read_records(path).await?;
    sort_records(&mut records);
    write_records(path, &records).await?;
    info!(path = %path.display(), sorted = records.len(), "data file sorted");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(type_value: TypeValue, name: &str) -> ExportRecord {
        ExportRecord {
            id: None,
            type_value,
            name: name.to_string(),
            description: "d".to_string(),
            url: "u".to_string(),
        }
    }

    #[test]
    fn sort_orders_by_type_then_name_length() {
        let mut records = vec![
            record(TypeValue::Number(2), "bb"),
            record(TypeValue::Number(10), "a"),
            record(TypeValue::Number(2), "a"),
            record(TypeValue::Text("misc".to_string()), "x"),
            record(TypeValue::Number(1), "longer name"),
            record(TypeValue::Number(2), "c"),
        ];
        sort_records(&mut records);
        let order: Vec<(String, &str)> = records
            .iter()
            .map(|r| (r.type_value.to_code(), r.name.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("1".to_string(), "longer name"),
                ("2".to_string(), "a"),
                ("2".to_string(), "c"),
                ("2".to_string(), "bb"),
                ("10".to_string(), "a"),
                ("misc".to_string(), "x"),
            ]
        );
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut records = vec![
            record(TypeValue::Number(1), "abcd"),
            record(TypeValue::Number(1), "工具箱"),
        ];
        sort_records(&mut records);
        assert_eq!(records[0].name, "工具箱");
    }

    #[test]
    fn pretty_json_uses_four_spaces_and_keeps_unicode() {
        let json = to_pretty_json(&[record(TypeValue::Number(4), "模型")]).expect("serialize");
        assert!(json.starts_with("[\n    {\n        \"type\": 4,"));
        assert!(json.contains("\"name\": \"模型\""));
    }
}
