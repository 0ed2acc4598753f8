use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use catalog_schema::ApiMessage;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error as ThisError;

use crate::db::Column;

#[derive(Debug, ThisError)]
pub enum CatalogError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Ractor error: {0}")]
    Ractor(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    pub fn record_not_found(id: i64) -> Self {
        CatalogError::NotFound(format!("Record {id} not found"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) | CatalogError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Database(_)
            | CatalogError::Io(_)
            | CatalogError::Json(_)
            | CatalogError::Template(_)
            | CatalogError::Ractor(_)
            | CatalogError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ApiMessage::failure(self.to_string()))).into_response()
    }
}

impl From<JsonRejection> for CatalogError {
    fn from(rejection: JsonRejection) -> Self {
        CatalogError::InvalidRequest(rejection.body_text())
    }
}

/// Per-column validation messages, kept in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Column, String>);

impl FieldErrors {
    pub fn insert(&mut self, column: Column, message: impl Into<String>) {
        self.0.insert(column, message.into());
    }

    pub fn get(&self, column: Column) -> Option<&str> {
        self.0.get(&column).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (column, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{column}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
