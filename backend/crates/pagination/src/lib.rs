//! Page-size primitives for list endpoints.
//!
//! List assemblers cap their output at a fixed, validated page size rather
//! than passing raw integers around. [`PageSize`] carries that invariant:
//! it is always at least one, so a capped listing can never silently become
//! an empty or unbounded one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors raised when constructing a [`PageSize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// Page sizes must be at least one.
    #[error("page size must be at least one")]
    Zero,
}

/// Validated page size for capped listings.
///
/// # Examples
/// ```
/// use pagination::PageSize;
///
/// let size = PageSize::new(10).expect("valid page size");
/// assert_eq!(size.get(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    /// Validate and construct a page size.
    pub const fn new(value: usize) -> Result<Self, PageSizeError> {
        if value == 0 {
            return Err(PageSizeError::Zero);
        }
        Ok(Self(value))
    }

    /// The underlying count.
    pub const fn get(self) -> usize {
        self.0
    }

    /// Truncate `items` to at most this page size, preserving order.
    ///
    /// # Examples
    /// ```
    /// use pagination::PageSize;
    ///
    /// let size = PageSize::new(2).expect("valid page size");
    /// assert_eq!(size.cap(vec![3, 2, 1]), vec![3, 2]);
    /// ```
    pub fn cap<T>(self, mut items: Vec<T>) -> Vec<T> {
        items.truncate(self.0);
        items
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
