use actix_web::{web, HttpResponse, Responder};
use log::info;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    book_id: web::Path<String>,
) -> impl Responder {
    match delete_book(&state, &book_id).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "deleted" })),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "detail": err.to_string() })),
    }
}

/// Removes the stored cover image first (best-effort), then the row. Both
/// steps tolerate an id that is already gone.
async fn delete_book(state: &AppState, book_id: &str) -> Result<(), ApiError> {
    info!("deleting book {}", book_id);
    if let Some(path) = state.store.asset_path(book_id)? {
        state.assets.delete(&path);
    }
    state.store.delete(book_id)?;
    Ok(())
}
