use crate::config::Config;
use crate::db::DbActorHandle;
use crate::error::CatalogError;
use crate::server::render::Renderer;
use crate::server::routes::{entries, reorder, transfer};

use axum::{
    Router,
    extract::{FromRef, Request},
    http::{HeaderName, HeaderValue, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post},
};
use axum_extra::extract::cookie::Key;
use base64::Engine as _;
use rand::RngCore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::catch_panic::CatchPanicLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct CatalogState {
    pub db: DbActorHandle,
    pub renderer: Arc<Renderer>,
    pub cookie_key: Key,
    pub page_size: u32,
    pub export_path: Arc<PathBuf>,
    pub insecure_cookie: bool,
}

impl CatalogState {
    /// `cookie_key` is resolved by the caller (see `BasicConfig::cookie_key`) so
    /// tests and the binary can inject their own.
    pub fn new(db: DbActorHandle, cfg: &Config, cookie_key: Key) -> Result<Self, CatalogError> {
        Ok(Self {
            db,
            renderer: Arc::new(Renderer::new()?),
            cookie_key,
            page_size: cfg.catalog.page_size.max(1),
            export_path: Arc::new(cfg.catalog.export_path.clone()),
            insecure_cookie: cfg.basic.insecure_cookie,
        })
    }
}

impl FromRef<CatalogState> for Key {
    fn from_ref(state: &CatalogState) -> Self {
        state.cookie_key.clone()
    }
}

async fn not_found_handler() -> StatusCode {
    StatusCode::NOT_FOUND
}

/// One line per request, leveled by status class. The request id is echoed
/// from `x-request-id` when the client sent a usable one.
async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);
    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let line = format!(
        "| {:>3} | {request_id} | {:^7} | {protocol:<8} | {path} | {}ms | {user_agent}",
        status.as_u16(),
        method.as_str(),
        start.elapsed().as_millis(),
    );
    match status {
        s if s.is_server_error() => error!("{line}"),
        s if s.is_client_error() => warn!("{line}"),
        _ => info!("{line}"),
    }

    resp
}

pub fn catalog_router(state: CatalogState) -> Router {
    Router::new()
        .route("/", get(entries::index))
        .route("/add", post(entries::add))
        .route("/edit/{id}", get(entries::edit_redirect).post(entries::edit))
        .route("/delete/{id}", delete(entries::delete_entry))
        .route("/get/{id}", get(entries::get_entry))
        .route("/export", get(transfer::export))
        .route("/swap_positions", post(reorder::swap_positions))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(CatchPanicLayer::new())
        .layer(middleware::from_fn(access_log))
}
