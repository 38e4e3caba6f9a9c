use crate::model::book::Book;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetadata {
    /// Combined size of the local and remote result sets before pagination.
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub metadata: SearchMetadata,
    pub books: Vec<Book>,
}
