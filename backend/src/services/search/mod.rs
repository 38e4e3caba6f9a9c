//! # Search Service Module
//!
//! Provides the `GET /search` endpoint: a combined lookup over the local
//! record store and the remote OpenLibrary catalog. Local rows come first,
//! remote documents follow, and pagination runs over the concatenated list.
//! Neither source failing ever fails the request; a failed source simply
//! contributes nothing.

mod query;

use actix_web::web;

/// Registers the search endpoint.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(query::process));
}
