use crate::db::{EntryDraft, EntryFilter, PageWindow};
use crate::error::CatalogError;
use crate::server::flash::{self, Flash};
use crate::server::pagination;
use crate::server::render::{IndexParts, IndexView};
use crate::server::router::CatalogState;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use catalog_schema::{ApiMessage, EditResponse, Entry, NotFoundBody, type_mapping};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Path ids are opaque segments; one that is not an integer names no record.
fn parse_id(raw: &str) -> Result<i64, CatalogError> {
    raw.trim()
        .parse()
        .map_err(|_| CatalogError::NotFound(format!("Record {raw} not found")))
}

fn list_redirect(page: u32) -> Redirect {
    Redirect::to(&format!("/?page={page}"))
}

/// GET /
///
/// Renders one page of the filtered listing. The requested page is clamped
/// into range here, after counting with the same filter used to fetch rows.
pub async fn index(
    State(state): State<CatalogState>,
    Query(query): Query<ListQuery>,
    jar: PrivateCookieJar,
) -> Result<impl IntoResponse, CatalogError> {
    let search = query.search.as_deref().map(str::trim).unwrap_or_default().to_string();
    let type_filter = query.type_filter.unwrap_or_default();
    let filter = EntryFilter::new(Some(search.clone()), Some(type_filter.clone()));

    let total_items = state.db.count(filter.clone()).await?;
    let total_pages = pagination::total_pages(total_items, state.page_size);
    let page = pagination::clamp_page(pagination::parse_page(query.page.as_deref()), total_pages);

    let rows = state
        .db
        .list(filter, Some(PageWindow::new(page, state.page_size)))
        .await?;
    let present_types = state.db.type_codes().await?;
    let (jar, flashes) = flash::take(jar);

    let view = IndexView::from(IndexParts {
        rows: rows.into_iter().map(Entry::from).collect(),
        page,
        total_pages,
        total_items,
        search,
        type_filter,
        present_types,
        flashes,
    });
    let html = state.renderer.render_index(&view)?;
    Ok((jar, Html(html)))
}

/// POST /add
pub async fn add(
    State(state): State<CatalogState>,
    jar: PrivateCookieJar,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let page = pagination::parse_page(form.get("page").map(String::as_str));

    let outcome = match EntryDraft::from_fields(&form) {
        Ok(draft) => state.db.insert(draft).await,
        Err(e) => Err(e),
    };
    let message = match outcome {
        Ok(id) => Flash::success(format!("Record {id} added")),
        Err(e) => {
            warn!(error = %e, "add rejected");
            Flash::danger(format!("Add failed: {e}"))
        }
    };

    let jar = flash::push(jar, message, state.insecure_cookie);
    (jar, list_redirect(page))
}

/// GET /edit/{id}
///
/// Editing happens in a modal on the list page; a direct visit goes back there.
pub async fn edit_redirect(Query(query): Query<PageQuery>) -> Redirect {
    list_redirect(pagination::parse_page(query.page.as_deref()))
}

/// POST /edit/{id}
pub async fn edit(
    State(state): State<CatalogState>,
    Path(raw_id): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Json<EditResponse>, CatalogError> {
    let id = parse_id(&raw_id)?;
    let draft = EntryDraft::from_fields(&form)?;
    let row = state.db.update(id, draft).await?;

    Ok(Json(EditResponse {
        success: true,
        message: format!("Record {id} updated"),
        record: row.into(),
        type_mapping: type_mapping(),
    }))
}

/// DELETE /delete/{id}
///
/// Every failure, including a missing record, answers 400.
pub async fn delete_entry(
    State(state): State<CatalogState>,
    Path(raw_id): Path<String>,
) -> Response {
    let outcome = match parse_id(&raw_id) {
        Ok(id) => state.db.delete(id).await.map(|()| id),
        Err(e) => Err(e),
    };
    match outcome {
        Ok(id) => Json(ApiMessage::ok(format!("Record {id} deleted"))).into_response(),
        Err(e) => {
            warn!(id = %raw_id, error = %e, "delete rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiMessage::failure(format!("Delete failed: {e}"))),
            )
                .into_response()
        }
    }
}

/// GET /get/{id}
pub async fn get_entry(
    State(state): State<CatalogState>,
    Path(raw_id): Path<String>,
) -> Result<Response, CatalogError> {
    let row = match parse_id(&raw_id) {
        Ok(id) => state.db.get(id).await?,
        Err(_) => None,
    };
    match row {
        Some(row) => Ok(Json(Entry::from(row)).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Json(NotFoundBody {
                error: "Record not found".to_string(),
            }),
        )
            .into_response()),
    }
}
