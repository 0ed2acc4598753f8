//! Repository operations on a single SQLite connection.
//!
//! Each function runs against the connection it is handed; the DB actor opens
//! a fresh one per request and closes it afterwards.

use catalog_schema::display_rank;
use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info};

use crate::db::draft::EntryDraft;
use crate::db::filter::{EntryFilter, PageWindow};
use crate::db::models::DbEntry;
use crate::db::schema::{TABLE_NAME, select_list};
use crate::error::CatalogError;

pub async fn insert(conn: &mut SqliteConnection, draft: &EntryDraft) -> Result<i64, CatalogError> {
    let id: i64 = sqlx::query_scalar(&format!(
        "INSERT INTO {TABLE_NAME} (type, name, description, url) VALUES (?, ?, ?, ?) RETURNING id"
    ))
    .bind(draft.type_code())
    .bind(draft.name())
    .bind(draft.description())
    .bind(draft.url())
    .fetch_one(&mut *conn)
    .await?;

    info!(id, type_code = draft.type_code(), "entry inserted");
    Ok(id)
}

/// Overwrites every editable column of one row and returns the stored result.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    draft: &EntryDraft,
) -> Result<DbEntry, CatalogError> {
    let res = sqlx::query(&format!(
        "UPDATE {TABLE_NAME} SET type = ?, name = ?, description = ?, url = ? WHERE id = ?"
    ))
    .bind(draft.type_code())
    .bind(draft.name())
    .bind(draft.description())
    .bind(draft.url())
    .bind(id)
    .execute(&mut *conn)
    .await?;

    let affected = res.rows_affected();
    debug!(id, affected, "entry update applied");
    if affected == 0 {
        return Err(CatalogError::record_not_found(id));
    }

    info!(id, "entry updated");
    fetch_one(conn, id)
        .await?
        .ok_or_else(|| CatalogError::record_not_found(id))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), CatalogError> {
    let exists: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {TABLE_NAME} WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    if exists == 0 {
        return Err(CatalogError::record_not_found(id));
    }

    sqlx::query(&format!("DELETE FROM {TABLE_NAME} WHERE id = ?"))
        .bind(id)
        .execute(&mut *conn)
        .await?;

    info!(id, "entry deleted");
    Ok(())
}

pub async fn fetch_one(conn: &mut SqliteConnection, id: i64) -> Result<Option<DbEntry>, CatalogError> {
    let row = sqlx::query_as::<_, DbEntry>(&format!(
        "SELECT {} FROM {TABLE_NAME} WHERE id = ?",
        select_list()
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(row)
}

/// Matching rows in id order; `window = None` returns all of them.
pub async fn fetch_page(
    conn: &mut SqliteConnection,
    filter: &EntryFilter,
    window: Option<PageWindow>,
) -> Result<Vec<DbEntry>, CatalogError> {
    let clause = filter.where_clause();
    let mut sql = format!(
        "SELECT {} FROM {TABLE_NAME}{} ORDER BY id ASC",
        select_list(),
        clause.sql
    );
    if window.is_some() {
        sql.push_str(" LIMIT ? OFFSET ?");
    }

    let mut query = sqlx::query_as::<_, DbEntry>(&sql);
    for param in &clause.params {
        query = query.bind(param.clone());
    }
    if let Some(window) = window {
        query = query.bind(window.limit()).bind(window.offset());
    }

    let rows = query.fetch_all(&mut *conn).await?;
    debug!(
        keyword = filter.keyword().unwrap_or(""),
        type_code = filter.type_code().unwrap_or(""),
        page = window.map(|w| w.page),
        returned = rows.len(),
        "entries fetched"
    );
    Ok(rows)
}

pub async fn count(conn: &mut SqliteConnection, filter: &EntryFilter) -> Result<u64, CatalogError> {
    let clause = filter.where_clause();
    let sql = format!("SELECT COUNT(*) FROM {TABLE_NAME}{}", clause.sql);

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    for param in &clause.params {
        query = query.bind(param.clone());
    }
    let total = query.fetch_one(&mut *conn).await?;

    Ok(u64::try_from(total).unwrap_or(0))
}

/// Distinct type codes present in the table: known codes in display order, unknown ones after.
pub async fn type_codes(conn: &mut SqliteConnection) -> Result<Vec<String>, CatalogError> {
    let mut codes: Vec<String> = sqlx::query_scalar(&format!(
        "SELECT DISTINCT type FROM {TABLE_NAME} WHERE type IS NOT NULL ORDER BY type"
    ))
    .fetch_all(&mut *conn)
    .await?;

    codes.sort_by_key(|code| display_rank(code));
    Ok(codes)
}

/// Exchanges the ids of two rows so their positions in the id-ascending listing swap.
///
/// The three moves run in one transaction; the row parked at the sentinel id is
/// never visible outside it. Dropping `tx` on any error rolls everything back.
pub async fn swap_ids(conn: &mut SqliteConnection, id1: i64, id2: i64) -> Result<(), CatalogError> {
    if id1 == id2 {
        return Err(CatalogError::InvalidRequest(
            "cannot swap a record with itself".to_string(),
        ));
    }

    let mut tx = conn.begin().await?;

    let found: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM {TABLE_NAME} WHERE id IN (?, ?)"
    ))
    .bind(id1)
    .bind(id2)
    .fetch_one(&mut *tx)
    .await?;
    if found != 2 {
        return Err(CatalogError::NotFound(format!(
            "One or both records not found (id1={id1}, id2={id2})"
        )));
    }

    // Strictly below every live id and every id AUTOINCREMENT will ever assign.
    let sentinel: i64 = sqlx::query_scalar(&format!(
        "SELECT MIN(COALESCE(MIN(id), 0), 0) - 1 FROM {TABLE_NAME}"
    ))
    .fetch_one(&mut *tx)
    .await?;

    let move_id = format!("UPDATE {TABLE_NAME} SET id = ? WHERE id = ?");
    for (to, from) in [(sentinel, id1), (id1, id2), (id2, sentinel)] {
        sqlx::query(&move_id)
            .bind(to)
            .bind(from)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    info!(id1, id2, sentinel, "entry positions swapped");
    Ok(())
}

/// Replaces the whole table with `drafts`, restarting the id sequence at 1.
pub async fn replace_all(
    conn: &mut SqliteConnection,
    drafts: &[EntryDraft],
) -> Result<u64, CatalogError> {
    let mut tx = conn.begin().await?;

    sqlx::query(&format!("DELETE FROM {TABLE_NAME}"))
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM sqlite_sequence WHERE name = ?")
        .bind(TABLE_NAME)
        .execute(&mut *tx)
        .await?;

    let insert_sql = format!(
        "INSERT INTO {TABLE_NAME} (type, name, description, url) VALUES (?, ?, ?, ?)"
    );
    for draft in drafts {
        sqlx::query(&insert_sql)
            .bind(draft.type_code())
            .bind(draft.name())
            .bind(draft.description())
            .bind(draft.url())
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    let imported = drafts.len() as u64;
    info!(imported, "table replaced");
    Ok(imported)
}
