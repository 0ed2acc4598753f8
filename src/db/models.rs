use catalog_schema::Entry;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbEntry {
    pub id: i64,
    #[sqlx(rename = "type")]
    pub type_code: String,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<DbEntry> for Entry {
    fn from(row: DbEntry) -> Self {
        Entry {
            id: row.id,
            type_code: row.type_code,
            name: row.name,
            description: row.description,
            url: row.url,
        }
    }
}
