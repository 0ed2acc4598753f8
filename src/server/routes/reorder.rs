use crate::error::CatalogError;
use crate::server::router::CatalogState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use catalog_schema::{ApiMessage, LaxId, SwapRequest};

/// POST /swap_positions
///
/// Exchanges the listing positions of two rows by swapping their ids.
/// 400 for missing or malformed ids, 404 when either row is absent,
/// 500 with the engine message when the transaction fails.
pub async fn swap_positions(
    State(state): State<CatalogState>,
    payload: Result<Json<SwapRequest>, JsonRejection>,
) -> Result<Json<ApiMessage>, CatalogError> {
    let Json(req) = payload?;

    let id1 = req.id1.as_ref().and_then(LaxId::to_id);
    let id2 = req.id2.as_ref().and_then(LaxId::to_id);
    let (Some(id1), Some(id2)) = (id1, id2) else {
        return Err(CatalogError::InvalidRequest(
            "id1 and id2 are required integer ids".to_string(),
        ));
    };

    state.db.swap(id1, id2).await?;
    Ok(Json(ApiMessage::ok(format!(
        "Swapped positions of records {id1} and {id2}"
    ))))
}
