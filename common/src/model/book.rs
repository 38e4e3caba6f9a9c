use serde::{Deserialize, Serialize};

/// Placeholder used wherever a book field is required but the source did not
/// supply one (publisher at creation, author/publisher of remote documents).
pub const UNKNOWN: &str = "unknown";

/// A single catalog entry as returned by the search endpoint.
///
/// Locally stored books carry a UUID `id`; entries sourced from the remote
/// catalog carry an `ol_`-prefixed id and are never persisted. The filesystem
/// location of a stored cover image is kept in the database only and is not
/// part of this model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    /// Always present for locally stored books; remote documents may omit it.
    pub title: Option<String>,
    pub author: String,
    pub publisher: String,
    pub year: Option<i32>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
/// Partial update to a stored book. Fields left out keep their prior values;
/// empty strings and a zero year count as "not supplied" and are skipped.
pub struct BookPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}
