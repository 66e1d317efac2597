//! News feed domain services.
//!
//! Implements the read-side driving port for the public feed: the home
//! listing is capped at the configured page size and ordered newest first,
//! and the detail view carries the comment thread oldest first.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageSize;

use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, NewsPersistenceError, NewsQueries, NewsRepository,
};
use crate::domain::{Comment, Error, News, NewsId};

/// News query service implementing [`NewsQueries`].
#[derive(Clone)]
pub struct NewsService<N, C> {
    news_repo: Arc<N>,
    comment_repo: Arc<C>,
    page_size: PageSize,
}

impl<N, C> NewsService<N, C> {
    /// Create a new service over the given repositories.
    pub fn new(news_repo: Arc<N>, comment_repo: Arc<C>, page_size: PageSize) -> Self {
        Self {
            news_repo,
            comment_repo,
            page_size,
        }
    }
}

impl<N, C> NewsService<N, C>
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
}

#[async_trait]
impl<N, C> NewsQueries for NewsService<N, C>
where
    N: NewsRepository,
    C: CommentRepository,
{
    async fn home_feed(&self) -> Result<Vec<News>, Error> {
        self.news_repo
            .recent(self.page_size.get())
            .await
            .map_err(Self::map_news_error)
    }

    async fn detail(&self, id: NewsId) -> Result<(News, Vec<Comment>), Error> {
        let news = self
            .news_repo
            .find_by_id(id)
            .await
            .map_err(Self::map_news_error)?
            .ok_or_else(|| Error::not_found("news record not found"))?;

        let comments = self
            .comment_repo
            .list_for_news(id)
            .await
            .map_err(Self::map_comment_error)?;

        Ok((news, comments))
    }
}
