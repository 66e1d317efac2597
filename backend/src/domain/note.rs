//! Personal note data model.
//!
//! Notes are strictly private: every read and write is scoped to the
//! owning author, and other users observe only absence.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::slug::{NoteSlug, SlugValidationError};
use super::user::UserId;

/// Suffix appended to a duplicate slug in the rejection message.
pub const SLUG_WARNING: &str = " - this slug is already taken; choose a unique value.";

/// Store-assigned identifier for a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(i64);

impl NoteId {
    /// Wrap a raw store identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw store identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NoteId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Validation errors raised when constructing a [`NoteDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// The title was blank once trimmed.
    EmptyTitle,
    /// The body was blank once trimmed.
    EmptyBody,
    /// The caller-supplied slug failed the slug rules.
    Slug(SlugValidationError),
}

impl NoteValidationError {
    /// The form field this validation failure is scoped to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::EmptyBody => "body",
            Self::Slug(_) => "slug",
        }
    }
}

impl fmt::Display for NoteValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyBody => write!(f, "note body must not be empty"),
            Self::Slug(inner) => inner.fmt(f),
        }
    }
}

impl std::error::Error for NoteValidationError {}

impl From<SlugValidationError> for NoteValidationError {
    fn from(value: SlugValidationError) -> Self {
        Self::Slug(value)
    }
}

/// Private note owned by a single author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    id: NoteId,
    title: String,
    body: String,
    slug: NoteSlug,
    author: UserId,
}

impl Note {
    /// Build a note from store-provided parts.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        body: impl Into<String>,
        slug: NoteSlug,
        author: UserId,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            slug,
            author,
        }
    }

    /// Store identifier, also the stable list ordering key.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Note title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Note body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Globally unique address segment.
    pub fn slug(&self) -> &NoteSlug {
        &self.slug
    }

    /// Owning author.
    pub fn author(&self) -> &UserId {
        &self.author
    }
}

/// Validated, unpersisted note payload.
///
/// Carries the caller's slug when one was supplied; [`NoteDraft::resolve_slug`]
/// derives one from the title otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    body: String,
    slug: Option<NoteSlug>,
}

impl NoteDraft {
    /// Validate and construct a draft from raw inputs.
    pub fn try_new(
        title: impl Into<String>,
        body: impl Into<String>,
        slug: Option<String>,
    ) -> Result<Self, NoteValidationError> {
        let title = title.into();
        let body = body.into();
        if title.trim().is_empty() {
            return Err(NoteValidationError::EmptyTitle);
        }
        if body.trim().is_empty() {
            return Err(NoteValidationError::EmptyBody);
        }
        let slug = slug.map(NoteSlug::new).transpose()?;
        Ok(Self { title, body, slug })
    }

    /// Note title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Note body.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Caller-supplied slug, if any.
    pub fn explicit_slug(&self) -> Option<&NoteSlug> {
        self.slug.as_ref()
    }

    /// The slug this draft will persist under.
    pub fn resolve_slug(&self) -> NoteSlug {
        self.slug
            .clone()
            .unwrap_or_else(|| NoteSlug::derive(&self.title))
    }
}

/// The full duplicate-slug rejection message for `slug`.
pub fn duplicate_slug_message(slug: &NoteSlug) -> String {
    format!("{slug}{SLUG_WARNING}")
}
