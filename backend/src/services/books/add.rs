use actix_multipart::{Field, Multipart};
use actix_web::{web, HttpResponse, Responder};
use common::model::book::UNKNOWN;
use futures_util::StreamExt;
use log::info;
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::store::NewBook;

/// HTTP handler for `POST /add-book`.
///
/// - On success: `200 OK` with the generated book id.
/// - On invalid input: `400 Bad Request` with the error detail.
/// - On storage failure: `500 Internal Server Error` with the error detail.
pub(crate) async fn process(state: web::Data<AppState>, payload: Multipart) -> impl Responder {
    match create_book(&state, payload).await {
        Ok(id) => HttpResponse::Ok().json(json!({ "status": "success", "id": id })),
        Err(ApiError::Validation(msg)) => HttpResponse::BadRequest().json(json!({ "detail": msg })),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "detail": err.to_string() })),
    }
}

async fn field_bytes(field: &mut Field) -> Result<Vec<u8>, ApiError> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.next().await {
        let chunk = chunk
            .map_err(|e| ApiError::Validation(format!("malformed multipart payload: {}", e)))?;
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

async fn text_field(field: &mut Field) -> Result<String, ApiError> {
    let bytes = field_bytes(field).await?;
    String::from_utf8(bytes)
        .map_err(|_| ApiError::Validation("form field is not valid UTF-8".to_string()))
}

/// Reads the multipart form, validates the metadata, writes the cover image
/// and then inserts the row. The image is on disk before the row exists, so
/// a stored record always points at a written file.
async fn create_book(state: &AppState, mut payload: Multipart) -> Result<String, ApiError> {
    let mut title = None;
    let mut author = None;
    let mut publisher = None;
    let mut year = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| ApiError::Validation(format!("malformed multipart payload: {}", e)))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        match name.as_deref() {
            Some("title") => title = Some(text_field(&mut field).await?),
            Some("author") => author = Some(text_field(&mut field).await?),
            Some("publisher") => publisher = Some(text_field(&mut field).await?),
            Some("year") => year = Some(text_field(&mut field).await?),
            Some("file") => {
                let filename = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename().map(|f| f.to_string()))
                    .unwrap_or_default();
                let data = field_bytes(&mut field).await?;
                file = Some((filename, data));
            }
            _ => {}
        }
    }

    let title = title.ok_or_else(|| ApiError::Validation("title is required".to_string()))?;
    if title.chars().count() < 3 {
        return Err(ApiError::Validation(
            "title must be at least 3 characters".to_string(),
        ));
    }
    let author = author.ok_or_else(|| ApiError::Validation("author is required".to_string()))?;
    if author.chars().count() < 2 {
        return Err(ApiError::Validation(
            "author must be at least 2 characters".to_string(),
        ));
    }
    let publisher = publisher.unwrap_or_else(|| UNKNOWN.to_string());
    let year = match year.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => Some(raw.parse::<i32>().map_err(|_| {
            ApiError::Validation("year must be an integer".to_string())
        })?),
        None => None,
    };
    let (filename, data) =
        file.ok_or_else(|| ApiError::Validation("file is required".to_string()))?;

    let book_id = Uuid::new_v4().to_string();
    info!("adding book \"{}\" as {}", title, book_id);

    let asset = state.assets.save(&book_id, &data, &filename)?;
    state.store.create(&NewBook {
        id: book_id.clone(),
        title,
        author,
        publisher,
        year,
        image: asset.url,
        internal_path: asset.internal_path,
    })?;

    Ok(book_id)
}
