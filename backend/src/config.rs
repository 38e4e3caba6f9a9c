use std::env;
use std::path::PathBuf;

/// Runtime configuration, read once at startup.
///
/// Every value has a development default so the server runs with no
/// environment at all; deployments override via `BOOKS_*` variables instead
/// of editing source.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file holding the `books` table.
    pub database_path: PathBuf,
    /// Root of the public static tree; uploads land in its `images/` subdir.
    pub static_dir: PathBuf,
    /// Absolute URL prefix under which this server is reachable, used to
    /// build the image URLs stored with each book.
    pub public_base_url: String,
    /// Base URL of the OpenLibrary API.
    pub openlibrary_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("BOOKS_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("BOOKS_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8000);
        let public_base_url =
            env::var("BOOKS_PUBLIC_URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));

        AppConfig {
            database_path: env::var("BOOKS_DB")
                .unwrap_or_else(|_| "books.sqlite".to_string())
                .into(),
            static_dir: env::var("BOOKS_STATIC_DIR")
                .unwrap_or_else(|_| "static".to_string())
                .into(),
            openlibrary_url: env::var("OPENLIBRARY_URL")
                .unwrap_or_else(|_| "https://openlibrary.org".to_string()),
            host,
            port,
            public_base_url,
        }
    }

    /// Directory uploaded cover images are written to.
    pub fn upload_dir(&self) -> PathBuf {
        self.static_dir.join("images")
    }
}
