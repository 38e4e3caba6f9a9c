use actix_web::{web, HttpResponse, Responder};
use common::model::book::BookPatch;
use log::info;
use serde_json::json;

use crate::error::ApiError;
use crate::state::AppState;

pub(crate) async fn process(
    state: web::Data<AppState>,
    book_id: web::Path<String>,
    form: web::Form<BookPatch>,
) -> impl Responder {
    match update_book(&state, &book_id, form.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(json!({ "status": "updated" })),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "detail": err.to_string() })),
    }
}

async fn update_book(state: &AppState, book_id: &str, patch: BookPatch) -> Result<(), ApiError> {
    info!("updating book {}", book_id);
    state.store.update_fields(book_id, &patch)?;
    Ok(())
}
