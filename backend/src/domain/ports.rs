//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to interact with storage
//! adapters. Each trait exposes strongly typed errors so adapters map their
//! failures into predictable variants instead of returning `anyhow::Result`.
//! Driving ports are the use-case surface consumed by inbound adapters.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use super::auth::{LoginCredentials, SignupDetails};
use super::comment::{Comment, CommentId};
use super::error::Error;
use super::news::{News, NewsDraft, NewsId};
use super::note::{Note, NoteDraft, NoteId};
use super::slug::NoteSlug;
use super::user::{PasswordHash, User, UserId, Username};

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// Another account already holds this username.
    #[error("username {username} is already taken")]
    DuplicateUsername { username: String },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-username violations.
    pub fn duplicate_username(username: impl Into<String>) -> Self {
        Self::DuplicateUsername {
            username: username.into(),
        }
    }
}

/// Persistence errors raised by [`NewsRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsPersistenceError {
    /// Repository connection could not be established.
    #[error("news repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("news repository query failed: {message}")]
    Query { message: String },
}

impl NewsPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`CommentRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentPersistenceError {
    /// Repository connection could not be established.
    #[error("comment repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("comment repository query failed: {message}")]
    Query { message: String },
}

impl CommentPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`NoteRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotePersistenceError {
    /// Repository connection could not be established.
    #[error("note repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("note repository query failed: {message}")]
    Query { message: String },
    /// Another note already holds this slug.
    #[error("slug {slug} is already taken")]
    DuplicateSlug { slug: String },
}

impl NotePersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for unique-slug violations.
    pub fn duplicate_slug(slug: impl Into<String>) -> Self {
        Self::DuplicateSlug { slug: slug.into() }
    }
}

/// Persistence port for user accounts.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account with its password digest.
    async fn create(
        &self,
        username: &Username,
        password: &PasswordHash,
    ) -> Result<User, UserPersistenceError>;

    /// Fetch a user and stored digest by login name.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// Persistence port for news records.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Insert a seeded news record.
    async fn create(&self, draft: &NewsDraft) -> Result<News, NewsPersistenceError>;

    /// Newest records first, at most `limit` of them.
    async fn recent(&self, limit: usize) -> Result<Vec<News>, NewsPersistenceError>;

    /// Fetch one record by identifier.
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsPersistenceError>;
}

/// Persistence port for comments.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment stamped with the current time.
    async fn create(
        &self,
        news_id: NewsId,
        author: &UserId,
        text: &str,
    ) -> Result<Comment, CommentPersistenceError>;

    /// All comments on a record, oldest first.
    async fn list_for_news(
        &self,
        news_id: NewsId,
    ) -> Result<Vec<Comment>, CommentPersistenceError>;

    /// Fetch one comment by identifier.
    async fn find_by_id(&self, id: CommentId)
    -> Result<Option<Comment>, CommentPersistenceError>;

    /// Replace the text of an existing comment.
    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Comment, CommentPersistenceError>;

    /// Remove a comment.
    async fn delete(&self, id: CommentId) -> Result<(), CommentPersistenceError>;
}

/// Persistence port for personal notes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Insert a note; slugs are unique across all authors.
    async fn create(
        &self,
        author: &UserId,
        title: &str,
        body: &str,
        slug: &NoteSlug,
    ) -> Result<Note, NotePersistenceError>;

    /// All notes owned by `author` in insertion order.
    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError>;

    /// Fetch one note by slug, regardless of owner.
    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NotePersistenceError>;

    /// Replace title, body, and slug of an existing note.
    async fn update(
        &self,
        id: NoteId,
        title: &str,
        body: &str,
        slug: &NoteSlug,
    ) -> Result<Note, NotePersistenceError>;

    /// Remove a note.
    async fn delete(&self, id: NoteId) -> Result<(), NotePersistenceError>;
}

/// Read side of the public news feed.
#[async_trait]
pub trait NewsQueries: Send + Sync {
    /// The home feed: newest first, capped at the configured page size.
    async fn home_feed(&self) -> Result<Vec<News>, Error>;

    /// One record with its comment thread, oldest comment first.
    async fn detail(&self, id: NewsId) -> Result<(News, Vec<Comment>), Error>;
}

/// Comment use cases available to authenticated readers.
#[async_trait]
pub trait CommentCommands: Send + Sync {
    /// Attach a new comment to a news record.
    async fn submit(
        &self,
        author: &UserId,
        news_id: NewsId,
        text: &str,
    ) -> Result<Comment, Error>;

    /// Rewrite the text of the caller's own comment.
    async fn edit(&self, caller: &UserId, id: CommentId, text: &str) -> Result<Comment, Error>;

    /// Remove the caller's own comment, returning the parent record id.
    async fn delete(&self, caller: &UserId, id: CommentId) -> Result<NewsId, Error>;
}

/// Read side of the private notes list.
#[async_trait]
pub trait NoteQueries: Send + Sync {
    /// Every note the caller owns, oldest first.
    async fn list(&self, caller: &UserId) -> Result<Vec<Note>, Error>;

    /// One of the caller's notes by slug.
    async fn fetch(&self, caller: &UserId, slug: &NoteSlug) -> Result<Note, Error>;
}

/// Note use cases available to authenticated authors.
#[async_trait]
pub trait NoteCommands: Send + Sync {
    /// Create a note, deriving a slug from the title when none is given.
    async fn add(&self, caller: &UserId, draft: NoteDraft) -> Result<Note, Error>;

    /// Replace the caller's own note addressed by slug.
    async fn edit(
        &self,
        caller: &UserId,
        slug: &NoteSlug,
        draft: NoteDraft,
    ) -> Result<Note, Error>;

    /// Remove the caller's own note addressed by slug.
    async fn delete(&self, caller: &UserId, slug: &NoteSlug) -> Result<(), Error>;
}

/// Account lifecycle use cases.
#[async_trait]
pub trait AccountCommands: Send + Sync {
    /// Register a new account.
    async fn signup(&self, details: SignupDetails) -> Result<User, Error>;

    /// Verify credentials and return the matching user.
    async fn authenticate(&self, credentials: LoginCredentials) -> Result<User, Error>;
}
