pub mod books;
pub mod search;
