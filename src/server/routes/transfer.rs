use crate::interchange;
use crate::server::flash::{self, Flash};
use crate::server::router::CatalogState;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use tracing::error;

/// GET /export
///
/// Dumps the table to the configured export file and reports the outcome as a flash.
pub async fn export(State(state): State<CatalogState>, jar: PrivateCookieJar) -> impl IntoResponse {
    let path = state.export_path.as_path();
    let message = match interchange::export_table(&state.db, path).await {
        Ok(count) => Flash::success(format!(
            "Exported {count} records to {}",
            path.display()
        )),
        Err(e) => {
            error!(path = %path.display(), error = %e, "export failed");
            Flash::danger(format!("Export failed: {e}"))
        }
    };

    let jar = flash::push(jar, message, state.insecure_cookie);
    (jar, Redirect::to("/"))
}
