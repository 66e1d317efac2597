//! Session key loading and cookie policy.
//!
//! The signing key lives in a file named by `SESSION_KEY_FILE`. Debug builds
//! fall back to an ephemeral key so local runs need no provisioning; release
//! builds refuse to start without a real key of sufficient length.

use std::path::{Path, PathBuf};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_MIN_LEN: usize = 64;

/// Errors raised while loading the session key.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file exists but is too short for release builds.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds require `SESSION_KEY_FILE` to be set.
    #[error("SESSION_KEY_FILE must be set in release builds")]
    MissingKeyFile,
}

/// Load the session signing key from `path`.
///
/// With no path, or an unreadable file, debug builds warn and generate an
/// ephemeral key; release builds fail.
pub fn session_key(path: Option<&Path>) -> Result<Key, SessionConfigError> {
    let Some(path) = path else {
        if cfg!(debug_assertions) {
            warn!("SESSION_KEY_FILE not set; using temporary session key (dev only)");
            return Ok(Key::generate());
        }
        return Err(SessionConfigError::MissingKeyFile);
    };

    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if !cfg!(debug_assertions) && length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) => {
            if cfg!(debug_assertions) {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(SessionConfigError::KeyRead {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}

/// Build the cookie session middleware used by the server.
pub fn session_middleware(key: Key, cookie_secure: bool) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_http_only(true)
        .cookie_same_site(SameSite::Lax)
        .cookie_secure(cookie_secure)
        .build()
}
