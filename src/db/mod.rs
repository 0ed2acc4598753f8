//! Database module: schema, row model, query builder and the DB actor.
//!
//! Layout:
//! - `schema.rs`: SQL DDL and the static column list
//! - `models.rs`: Rust struct mirroring a table row
//! - `draft.rs`: validated insert/update payload
//! - `filter.rs`: keyword/type `WHERE` builder and page windows
//! - `ops.rs`: repository operations on one connection
//! - `actor.rs`: the actor that owns database access

pub mod actor;
pub mod draft;
pub mod filter;
pub mod models;
pub mod ops;
pub mod schema;

pub use actor::{DbActorHandle, spawn};
pub use draft::EntryDraft;
pub use filter::{EntryFilter, PageWindow, WhereClause};
pub use models::DbEntry;
pub use schema::{Column, SQLITE_INIT, TABLE_NAME};
