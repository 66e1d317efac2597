//! Slug validation and derivation for note addresses.
//!
//! Slugs are lowercase ASCII words separated by single hyphens, at most
//! [`SLUG_MAX`] characters. When a caller supplies no slug one is derived
//! from the note title by transliteration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum accepted slug length in characters.
pub const SLUG_MAX: usize = 100;

/// Validation errors raised by [`NoteSlug::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlugValidationError {
    /// The slug was empty.
    Empty,
    /// The slug exceeded [`SLUG_MAX`] characters.
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// The slug contained characters outside `a-z`, `0-9`, and `-`, or had
    /// a hyphen in a disallowed position.
    InvalidFormat,
}

impl fmt::Display for SlugValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "slug must not be empty"),
            Self::TooLong { max } => write!(f, "slug must be at most {max} characters"),
            Self::InvalidFormat => write!(
                f,
                "slug may only contain lowercase letters, digits, and single inner hyphens"
            ),
        }
    }
}

impl std::error::Error for SlugValidationError {}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn has_valid_shape(slug: &str) -> bool {
    !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug.chars().all(is_slug_char)
}

/// Validated note address segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NoteSlug(String);

impl NoteSlug {
    /// Validate and construct a slug from caller input.
    pub fn new(slug: impl Into<String>) -> Result<Self, SlugValidationError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(SlugValidationError::Empty);
        }
        if slug.chars().count() > SLUG_MAX {
            return Err(SlugValidationError::TooLong { max: SLUG_MAX });
        }
        if !has_valid_shape(&slug) {
            return Err(SlugValidationError::InvalidFormat);
        }
        Ok(Self(slug))
    }

    /// Derive a slug from a note title.
    ///
    /// Non-Latin titles are transliterated, then lowercased and hyphenated.
    /// The result is truncated to [`SLUG_MAX`] characters. Titles with no
    /// sluggable characters fall back to `note`.
    pub fn derive(title: &str) -> Self {
        let mut derived = slug::slugify(title);
        if derived.chars().count() > SLUG_MAX {
            derived = derived.chars().take(SLUG_MAX).collect();
            derived = derived.trim_end_matches('-').to_owned();
        }
        if derived.is_empty() {
            derived = "note".to_owned();
        }
        Self(derived)
    }
}

impl AsRef<str> for NoteSlug {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for NoteSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<NoteSlug> for String {
    fn from(value: NoteSlug) -> Self {
        value.0
    }
}

impl TryFrom<String> for NoteSlug {
    type Error = SlugValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
