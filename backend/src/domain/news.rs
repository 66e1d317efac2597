//! News data model.
//!
//! News records are seed data: created in bulk by operators or fixtures,
//! never mutated through user-facing flows.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a news record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsId(i64);

impl NewsId {
    /// Wrap a raw store identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw store identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for NewsId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NewsId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Validation errors raised when constructing a [`NewsDraft`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsValidationError {
    /// The title was blank once trimmed.
    EmptyTitle,
    /// The body was blank once trimmed.
    EmptyBody,
}

impl fmt::Display for NewsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "news title must not be empty"),
            Self::EmptyBody => write!(f, "news body must not be empty"),
        }
    }
}

impl std::error::Error for NewsValidationError {}

/// Published news record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct News {
    id: NewsId,
    title: String,
    body: String,
    date: NaiveDate,
}

impl News {
    /// Build a news record from store-provided parts.
    pub fn new(
        id: NewsId,
        title: impl Into<String>,
        body: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            date,
        }
    }

    /// Store identifier.
    pub fn id(&self) -> NewsId {
        self.id
    }

    /// Headline shown on listings.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Full article text.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Publication date used for feed ordering.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Unpersisted news record used for seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsDraft {
    title: String,
    body: String,
    date: Option<NaiveDate>,
}

impl NewsDraft {
    /// Validate and construct a draft; `date` defaults to today at persist time.
    pub fn try_new(
        title: impl Into<String>,
        body: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Self, NewsValidationError> {
        let title = title.into();
        let body = body.into();
        if title.trim().is_empty() {
            return Err(NewsValidationError::EmptyTitle);
        }
        if body.trim().is_empty() {
            return Err(NewsValidationError::EmptyBody);
        }
        Ok(Self { title, body, date })
    }

    /// Headline for the new record.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Article text for the new record.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Publication date, or today when absent.
    pub fn date_or_today(&self) -> NaiveDate {
        self.date
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "body", NewsValidationError::EmptyTitle)]
    #[case("  ", "body", NewsValidationError::EmptyTitle)]
    #[case("title", " ", NewsValidationError::EmptyBody)]
    fn draft_rejects_blank_fields(
        #[case] title: &str,
        #[case] body: &str,
        #[case] expected: NewsValidationError,
    ) {
        let err = NewsDraft::try_new(title, body, None).expect_err("blank fields must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn draft_defaults_date_to_today() {
        let draft = NewsDraft::try_new("Headline", "Body", None).expect("valid draft");
        assert_eq!(draft.date_or_today(), chrono::Utc::now().date_naive());
    }

    #[rstest]
    fn draft_keeps_explicit_date() {
        let date = NaiveDate::from_ymd_opt(2020, 5, 17).expect("valid date");
        let draft = NewsDraft::try_new("Headline", "Body", Some(date)).expect("valid draft");
        assert_eq!(draft.date_or_today(), date);
    }
}
