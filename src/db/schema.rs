//! SQL DDL for initializing the database schema, plus the static column list
//! the query builder and form validation iterate over.

use std::fmt;

pub const TABLE_NAME: &str = "ewb_dh_data";

/// SQLite schema: the single `ewb_dh_data` catalog table.
///
/// `AUTOINCREMENT` keeps ids monotonic, so a deleted id is never handed out again
/// and the swap sentinel (always below every live id) cannot collide with a new row.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS ewb_dh_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    type TEXT NOT NULL,
    name TEXT NOT NULL,
    description TEXT NOT NULL,
    url TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_ewb_dh_data_type ON ewb_dh_data(type);
"#;

/// Columns of `ewb_dh_data`, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Id,
    Type,
    Name,
    Description,
    Url,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Id,
        Column::Type,
        Column::Name,
        Column::Description,
        Column::Url,
    ];

    /// Every column an insert or update must supply.
    pub const EDITABLE: [Column; 4] = [Column::Type, Column::Name, Column::Description, Column::Url];

    pub const fn as_str(self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Type => "type",
            Column::Name => "name",
            Column::Description => "description",
            Column::Url => "url",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `SELECT` list for full rows, in table order.
pub(crate) fn select_list() -> String {
    Column::ALL.map(Column::as_str).join(", ")
}
