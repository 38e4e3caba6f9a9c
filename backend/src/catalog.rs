//! Client for the OpenLibrary search API.
//!
//! One outbound request per search, no retries. Failures are returned as
//! [`RemoteError`] so the search aggregator can log and discard them; the
//! catalog being unreachable must never fail a search request.

use std::time::Duration;

use common::model::book::{Book, UNKNOWN};
use reqwest::header;
use serde_json::Value;
use uuid::Uuid;

use crate::error::RemoteError;

const HTTP_TIMEOUT_SECS: u64 = 6;
const HTTP_USER_AGENT: &str = "book-catalog-backend/0.1";
const COVER_URL_PREFIX: &str = "https://covers.openlibrary.org/b/id";

/// Result-count cap passed to the remote catalog on every search.
pub const REMOTE_RESULT_LIMIT: usize = 20;

#[derive(Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(CatalogClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Runs one search against the remote catalog and maps each returned
    /// document into the local book shape.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Book>, RemoteError> {
        let url = format!(
            "{}/search.json?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .http
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .header(header::USER_AGENT, HTTP_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status(status.as_u16()));
        }

        let data: Value = response.json().await?;
        let docs = data
            .get("docs")
            .and_then(Value::as_array)
            .ok_or_else(|| RemoteError::Payload("response has no docs list".to_string()))?;

        Ok(docs.iter().map(map_doc).collect())
    }
}

/// Maps one OpenLibrary search document into the local book shape. Documents
/// without an edition key get a synthesized id carrying the same `ol_`
/// prefix; missing author or publisher fields fall back to the sentinel.
fn map_doc(doc: &Value) -> Book {
    let id = doc
        .get("edition_key")
        .and_then(Value::as_array)
        .and_then(|keys| keys.first())
        .and_then(Value::as_str)
        .map(|key| format!("ol_{}", key))
        .unwrap_or_else(|| format!("ol_{}", Uuid::new_v4()));

    let author = doc
        .get("author_name")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());

    let publisher = doc
        .get("publisher")
        .and_then(Value::as_array)
        .and_then(|publishers| publishers.first())
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN.to_string());

    Book {
        id,
        title: doc.get("title").and_then(Value::as_str).map(str::to_string),
        author,
        publisher,
        year: doc
            .get("first_publish_year")
            .and_then(Value::as_i64)
            .map(|year| year as i32),
        image: doc
            .get("cover_i")
            .and_then(Value::as_i64)
            .map(|cover| format!("{}/{}-L.jpg", COVER_URL_PREFIX, cover)),
    }
}

#[cfg(test)]
mod tests {
    use super::map_doc;
    use common::model::book::UNKNOWN;
    use serde_json::json;

    #[test]
    fn maps_a_complete_document() {
        let doc = json!({
            "edition_key": ["OL123M", "OL456M"],
            "title": "Dune",
            "author_name": ["Frank Herbert", "Someone Else"],
            "publisher": ["Chilton Books", "Ace"],
            "first_publish_year": 1965,
            "cover_i": 11481354
        });

        let book = map_doc(&doc);
        assert_eq!(book.id, "ol_OL123M");
        assert_eq!(book.title.as_deref(), Some("Dune"));
        assert_eq!(book.author, "Frank Herbert, Someone Else");
        assert_eq!(book.publisher, "Chilton Books");
        assert_eq!(book.year, Some(1965));
        assert_eq!(
            book.image.as_deref(),
            Some("https://covers.openlibrary.org/b/id/11481354-L.jpg")
        );
    }

    #[test]
    fn fills_sentinels_for_missing_fields() {
        let book = map_doc(&json!({}));

        assert!(book.id.starts_with("ol_"));
        assert!(book.title.is_none());
        assert_eq!(book.author, UNKNOWN);
        assert_eq!(book.publisher, UNKNOWN);
        assert_eq!(book.year, None);
        assert!(book.image.is_none());
    }

    #[test]
    fn empty_edition_key_list_still_gets_a_synthesized_id() {
        let book = map_doc(&json!({ "edition_key": [] }));

        assert!(book.id.starts_with("ol_"));
        assert!(book.id.len() > "ol_".len());
    }

    #[test]
    fn empty_author_list_falls_back_to_the_sentinel() {
        let book = map_doc(&json!({ "author_name": [] }));
        assert_eq!(book.author, UNKNOWN);
    }
}
