use actix_web::{web, HttpResponse, Responder};
use common::model::book::Book;
use common::model::search::{SearchMetadata, SearchResponse};
use futures_util::join;
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;

use crate::catalog::REMOTE_RESULT_LIMIT;
use crate::error::ApiError;
use crate::state::AppState;

const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_size")]
    size: usize,
}

fn default_page() -> usize {
    1
}

fn default_size() -> usize {
    10
}

pub(crate) async fn process(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    match search_books(&state, params.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(ApiError::Validation(msg)) => HttpResponse::BadRequest().json(json!({ "detail": msg })),
        Err(err) => HttpResponse::InternalServerError().json(json!({ "detail": err.to_string() })),
    }
}

/// Looks up both sources and paginates the concatenated list, local rows
/// first. A failing source is logged and contributes an empty list; the
/// request itself only fails on invalid parameters.
async fn search_books(state: &AppState, params: SearchParams) -> Result<SearchResponse, ApiError> {
    if params.q.chars().count() < 3 {
        return Err(ApiError::Validation(
            "q must be at least 3 characters".to_string(),
        ));
    }
    if params.page < 1 {
        return Err(ApiError::Validation("page must be at least 1".to_string()));
    }
    if params.size < 1 || params.size > MAX_PAGE_SIZE {
        return Err(ApiError::Validation(format!(
            "size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    let needle = params.q.to_lowercase();
    info!("searching for \"{}\"", needle);

    // The two lookups are independent; run the blocking store query off the
    // async executor while the remote request is in flight.
    let store = state.store.clone();
    let lookup = tokio::task::spawn_blocking(move || store.find_by_text(&needle));
    let (local, remote) = join!(lookup, state.catalog.search(&params.q, REMOTE_RESULT_LIMIT));

    let mut books = match local {
        Ok(Ok(rows)) => rows,
        Ok(Err(err)) => {
            warn!(
                "record store lookup failed, continuing without local results: {}",
                err
            );
            Vec::new()
        }
        Err(err) => {
            warn!("record store lookup did not finish: {}", err);
            Vec::new()
        }
    };
    info!("{} books found in the record store", books.len());

    match remote {
        Ok(found) => books.extend(found),
        Err(err) => warn!(
            "remote catalog unavailable, continuing without its results: {}",
            err
        ),
    }

    Ok(paginate(books, params.page, params.size))
}

/// Slices the combined result list into one page. Offsets past the end yield
/// a short or empty page, never an error.
fn paginate(books: Vec<Book>, page: usize, size: usize) -> SearchResponse {
    let total = books.len();
    let total_pages = total.div_ceil(size);
    let books = books
        .into_iter()
        .skip((page - 1) * size)
        .take(size)
        .collect();

    SearchResponse {
        metadata: SearchMetadata {
            total,
            page,
            total_pages,
        },
        books,
    }
}

#[cfg(test)]
mod tests {
    use super::paginate;
    use crate::catalog::CatalogClient;
    use crate::state::AppState;
    use crate::store::assets::AssetStore;
    use crate::store::{BookStore, NewBook};
    use actix_web::{test, web, App};
    use common::model::book::{Book, UNKNOWN};
    use common::model::search::SearchResponse;
    use std::fs;
    use tempfile::TempDir;

    fn books(total: usize) -> Vec<Book> {
        (0..total)
            .map(|i| Book {
                id: format!("b{}", i),
                title: Some(format!("Book {}", i)),
                author: "Some Author".to_string(),
                publisher: UNKNOWN.to_string(),
                year: None,
                image: None,
            })
            .collect()
    }

    #[::core::prelude::v1::test]
    fn pages_cover_the_whole_list() {
        let response = paginate(books(25), 3, 10);
        assert_eq!(response.metadata.total, 25);
        assert_eq!(response.metadata.page, 3);
        assert_eq!(response.metadata.total_pages, 3);
        assert_eq!(response.books.len(), 5);
        assert_eq!(response.books[0].id, "b20");
        assert_eq!(response.books[4].id, "b24");
    }

    #[::core::prelude::v1::test]
    fn exact_multiple_has_no_trailing_page() {
        let response = paginate(books(20), 2, 10);
        assert_eq!(response.metadata.total_pages, 2);
        assert_eq!(response.books.len(), 10);
    }

    #[::core::prelude::v1::test]
    fn empty_result_set_has_zero_pages() {
        let response = paginate(books(0), 1, 10);
        assert_eq!(response.metadata.total, 0);
        assert_eq!(response.metadata.total_pages, 0);
        assert!(response.books.is_empty());
    }

    #[::core::prelude::v1::test]
    fn page_past_the_end_is_empty_not_an_error() {
        let response = paginate(books(5), 4, 10);
        assert_eq!(response.metadata.total_pages, 1);
        assert!(response.books.is_empty());
    }

    #[::core::prelude::v1::test]
    fn a_page_never_exceeds_the_requested_size() {
        for page in 1..=4 {
            let response = paginate(books(31), page, 10);
            assert!(response.books.len() <= 10);
        }
    }

    fn test_state(dir: &TempDir) -> AppState {
        let store = BookStore::new(dir.path().join("books.sqlite"));
        store.init().expect("schema");
        let upload_dir = dir.path().join("images");
        fs::create_dir_all(&upload_dir).expect("upload dir");
        AppState {
            store,
            assets: AssetStore::new(upload_dir, "http://127.0.0.1:8000"),
            // nothing listens on the discard port, so the remote source
            // degrades to an empty list
            catalog: CatalogClient::new("http://127.0.0.1:9").expect("client"),
        }
    }

    fn dune() -> NewBook {
        NewBook {
            id: "b1".to_string(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publisher: "Chilton Books".to_string(),
            year: Some(1965),
            image: "http://127.0.0.1:8000/static/images/b1.jpg".to_string(),
            internal_path: "static/images/b1.jpg".to_string(),
        }
    }

    #[actix_web::test]
    async fn search_returns_local_matches_when_remote_is_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(&dir);
        state.store.create(&dune()).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(crate::services::search::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/search?q=DUNE").to_request();
        let response: SearchResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.metadata.total, 1);
        assert_eq!(response.metadata.page, 1);
        assert_eq!(response.metadata.total_pages, 1);
        assert_eq!(response.books[0].title.as_deref(), Some("Dune"));
    }

    #[actix_web::test]
    async fn search_with_no_matches_reports_zero_pages() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(&dir)))
                .configure(crate::services::search::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/search?q=nothing-here")
            .to_request();
        let response: SearchResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.metadata.total, 0);
        assert_eq!(response.metadata.total_pages, 0);
        assert!(response.books.is_empty());
    }

    #[actix_web::test]
    async fn short_query_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(&dir)))
                .configure(crate::services::search::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/search?q=ab").to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 400);
    }

    #[actix_web::test]
    async fn out_of_range_page_size_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state(&dir)))
                .configure(crate::services::search::configure_routes),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/search?q=dune&size=51")
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), 400);
    }
}
