//! # Book Management Service Module
//!
//! Groups the endpoints that create, edit and remove locally stored books.
//! Each sub-module holds one handler (`process`) wrapping the actual logic.
//!
//! ## Registered Routes:
//!
//! *   **`POST /add-book`**:
//!     - **Handler**: `add::process`
//!     - **Description**: Accepts a multipart form with the book metadata
//!       (`title`, `author`, optional `publisher` and `year`) and the cover
//!       image under `file`. The image is written to the upload directory
//!       first, then the row is inserted; the response carries the generated
//!       book id.
//!
//! *   **`PATCH /books/{book_id}`**:
//!     - **Handler**: `update::process`
//!     - **Description**: Partial update from an urlencoded form. Only the
//!       supplied fields are written; unknown ids are a silent no-op.
//!
//! *   **`DELETE /books/{book_id}`**:
//!     - **Handler**: `delete::process`
//!     - **Description**: Removes the stored cover image (best-effort) and
//!       the database row. Deleting twice is fine.

mod add;
mod delete;
mod update;

use actix_web::web;

/// Registers the book management routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/add-book", web::post().to(add::process))
        .route("/books/{book_id}", web::patch().to(update::process))
        .route("/books/{book_id}", web::delete().to(delete::process));
}
