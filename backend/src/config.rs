//! Process configuration.
//!
//! All knobs come from the environment and are read once at startup; the
//! resulting [`AppConfig`] is immutable and shared by value.

use std::env;
use std::path::PathBuf;

use pagination::{PageSize, PageSizeError};
use thiserror::Error;

use crate::domain::DEFAULT_BANNED_WORDS;

/// Default bind address when `BIND_ADDR` is unset.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// Default home feed size when `NEWS_PAGE_SIZE` is unset.
pub const DEFAULT_NEWS_PAGE_SIZE: usize = 10;

/// Errors raised while reading the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric variable did not parse.
    #[error("{name} must be a positive integer: {message}")]
    InvalidNumber { name: String, message: String },
    /// The page size failed validation.
    #[error("NEWS_PAGE_SIZE is invalid: {0}")]
    InvalidPageSize(#[from] PageSizeError),
}

/// Immutable startup configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: String,
    /// SQLite database location; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// File holding the 64-byte session signing key.
    pub session_key_file: Option<PathBuf>,
    /// Whether session cookies carry the `Secure` attribute.
    pub session_cookie_secure: bool,
    /// Maximum number of records on the home feed.
    pub news_page_size: PageSize,
    /// Vocabulary rejected in comment text.
    pub banned_words: Vec<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr =
            env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned());
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let session_key_file = env::var("SESSION_KEY_FILE")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        let session_cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|value| matches!(value.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let news_page_size = match env::var("NEWS_PAGE_SIZE") {
            Ok(raw) => {
                let parsed: usize =
                    raw.trim()
                        .parse()
                        .map_err(|err: std::num::ParseIntError| ConfigError::InvalidNumber {
                            name: "NEWS_PAGE_SIZE".to_owned(),
                            message: err.to_string(),
                        })?;
                PageSize::new(parsed)?
            }
            Err(_) => PageSize::new(DEFAULT_NEWS_PAGE_SIZE)?,
        };

        let banned_words = env::var("BANNED_WORDS")
            .map(|raw| parse_banned_words(&raw))
            .unwrap_or_else(|_| default_banned_words());

        Ok(Self {
            bind_addr,
            database_url,
            session_key_file,
            session_cookie_secure,
            news_page_size,
            banned_words,
        })
    }
}

/// The built-in banned vocabulary as owned strings.
pub fn default_banned_words() -> Vec<String> {
    DEFAULT_BANNED_WORDS
        .iter()
        .map(|word| (*word).to_owned())
        .collect()
}

fn parse_banned_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
