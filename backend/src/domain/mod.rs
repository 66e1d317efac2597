//! Domain primitives, aggregates, and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers, the ports at the edges of the hexagon, and the
//! services implementing the driving ports. Keep types immutable and
//! document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.

pub mod account_service;
pub mod auth;
pub mod comment;
pub mod comment_service;
pub mod error;
pub mod news;
pub mod news_service;
pub mod note;
pub mod note_service;
pub mod ports;
pub mod slug;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{
    LoginCredentials, LoginValidationError, PASSWORD_MIN, SignupDetails, SignupValidationError,
};
pub use self::comment::{
    COMMENT_WARNING, Comment, CommentId, CommentValidationError, DEFAULT_BANNED_WORDS,
    validate_comment_text,
};
pub use self::comment_service::CommentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::news::{News, NewsDraft, NewsId, NewsValidationError};
pub use self::news_service::NewsService;
pub use self::note::{
    Note, NoteDraft, NoteId, NoteValidationError, SLUG_WARNING, duplicate_slug_message,
};
pub use self::note_service::NoteService;
pub use self::slug::{NoteSlug, SLUG_MAX, SlugValidationError};
pub use self::user::{PasswordHash, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
