//! Comment data model and profanity screening.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::news::NewsId;
use super::user::UserId;

/// Message attached to a comment rejected for banned vocabulary.
pub const COMMENT_WARNING: &str = "Mind your language!";

/// Words rejected in comment text when no override is configured.
pub const DEFAULT_BANNED_WORDS: &[&str] = &["scoundrel", "rascal"];

/// Store-assigned identifier for a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw store identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw store identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CommentId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Validation errors raised when screening comment text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    /// The text was blank once trimmed.
    EmptyText,
    /// The text contained a banned word.
    BannedWord,
}

impl CommentValidationError {
    /// The form field this validation failure is scoped to.
    pub fn field(&self) -> &'static str {
        "text"
    }
}

impl fmt::Display for CommentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "comment text must not be empty"),
            Self::BannedWord => f.write_str(COMMENT_WARNING),
        }
    }
}

impl std::error::Error for CommentValidationError {}

/// Screen comment text against the banned vocabulary.
///
/// Matching is a case-insensitive substring check: a banned word embedded in
/// a longer word still rejects the text.
pub fn validate_comment_text(
    text: &str,
    banned_words: &[String],
) -> Result<(), CommentValidationError> {
    if text.trim().is_empty() {
        return Err(CommentValidationError::EmptyText);
    }
    let lowered = text.to_lowercase();
    if banned_words
        .iter()
        .any(|word| !word.is_empty() && lowered.contains(&word.to_lowercase()))
    {
        return Err(CommentValidationError::BannedWord);
    }
    Ok(())
}

/// Reader comment on a news record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    id: CommentId,
    news_id: NewsId,
    author: UserId,
    text: String,
    created: DateTime<Utc>,
}

impl Comment {
    /// Build a comment from store-provided parts.
    pub fn new(
        id: CommentId,
        news_id: NewsId,
        author: UserId,
        text: impl Into<String>,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            news_id,
            author,
            text: text.into(),
            created,
        }
    }

    /// Store identifier.
    pub fn id(&self) -> CommentId {
        self.id
    }

    /// News record the comment belongs to.
    pub fn news_id(&self) -> NewsId {
        self.news_id
    }

    /// Author of the comment.
    pub fn author(&self) -> &UserId {
        &self.author
    }

    /// Comment text.
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Creation timestamp used for thread ordering.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
}
