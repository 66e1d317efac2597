//! Comment domain services.
//!
//! Submission screens text against the banned vocabulary and checks the
//! parent record exists. Edit and delete are owner-only; a comment owned by
//! someone else is reported as absent, never as forbidden, so the endpoint
//! leaks nothing about other users' comments.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::comment::{CommentValidationError, validate_comment_text};
use crate::domain::ports::{
    CommentCommands, CommentPersistenceError, CommentRepository, NewsPersistenceError,
    NewsRepository,
};
use crate::domain::{Comment, CommentId, Error, NewsId, UserId};

/// Comment command service implementing [`CommentCommands`].
#[derive(Clone)]
pub struct CommentService<N, C> {
    news_repo: Arc<N>,
    comment_repo: Arc<C>,
    banned_words: Arc<Vec<String>>,
}

impl<N, C> CommentService<N, C> {
    /// Create a new service over the given repositories and vocabulary.
    pub fn new(news_repo: Arc<N>, comment_repo: Arc<C>, banned_words: Vec<String>) -> Self {
        Self {
            news_repo,
            comment_repo,
            banned_words: Arc::new(banned_words),
        }
    }
}

impl<N, C> CommentService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    fn map_news_error(error: NewsPersistenceError) -> Error {
        match error {
            NewsPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("news repository unavailable: {message}"))
            }
            NewsPersistenceError::Query { message } => {
                Error::internal(format!("news repository error: {message}"))
            }
        }
    }

    fn map_comment_error(error: CommentPersistenceError) -> Error {
        match error {
            CommentPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("comment repository unavailable: {message}"))
            }
            CommentPersistenceError::Query { message } => {
                Error::internal(format!("comment repository error: {message}"))
            }
        }
    }

    fn map_validation_error(error: CommentValidationError) -> Error {
        Error::field_validation(error.field(), error.to_string())
    }

    /// Load a comment visible to `caller`, reporting foreign comments as
    /// absent.
    async fn fetch_owned(&self, caller: &UserId, id: CommentId) -> Result<Comment, Error> {
        let comment = self
            .comment_repo
            .find_by_id(id)
            .await
            .map_err(Self::map_comment_error)?
            .filter(|comment| comment.author() == caller)
            .ok_or_else(|| Error::not_found("comment not found"))?;
        Ok(comment)
    }
}

#[async_trait]
impl<N, C> CommentCommands for CommentService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn submit(
        &self,
        author: &UserId,
        news_id: NewsId,
        text: &str,
    ) -> Result<Comment, Error> {
        validate_comment_text(text, &self.banned_words).map_err(Self::map_validation_error)?;

        self.news_repo
            .find_by_id(news_id)
            .await
            .map_err(Self::map_news_error)?
            .ok_or_else(|| Error::not_found("news record not found"))?;

        self.comment_repo
            .create(news_id, author, text)
            .await
            .map_err(Self::map_comment_error)
    }

    async fn edit(&self, caller: &UserId, id: CommentId, text: &str) -> Result<Comment, Error> {
        validate_comment_text(text, &self.banned_words).map_err(Self::map_validation_error)?;

        let existing = self.fetch_owned(caller, id).await?;
        self.comment_repo
            .update_text(existing.id(), text)
            .await
            .map_err(Self::map_comment_error)
    }

    async fn delete(&self, caller: &UserId, id: CommentId) -> Result<NewsId, Error> {
        let existing = self.fetch_owned(caller, id).await?;
        self.comment_repo
            .delete(existing.id())
            .await
            .map_err(Self::map_comment_error)?;
        Ok(existing.news_id())
    }
}
