//! Diesel-backed [`CommentRepository`] adapter.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use super::diesel_helpers::run_blocking;
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comments;
use crate::domain::ports::{CommentPersistenceError, CommentRepository};
use crate::domain::{Comment, CommentId, NewsId, UserId};

/// SQLite persistence for comments.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn checkout(pool: &DbPool) -> Result<super::pool::DbConnection, CommentPersistenceError> {
    pool.get()
        .map_err(|err| CommentPersistenceError::connection(err.to_string()))
}

fn query_error(err: diesel::result::Error) -> CommentPersistenceError {
    CommentPersistenceError::query(err.to_string())
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(
        &self,
        news_id: NewsId,
        author: &UserId,
        text: &str,
    ) -> Result<Comment, CommentPersistenceError> {
        let pool = self.pool.clone();
        let author = author.clone();
        let text = text.to_owned();
        run_blocking(CommentPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = NewCommentRow {
                news_id: news_id.get(),
                author_id: author.as_ref(),
                text: &text,
                created: Utc::now().naive_utc(),
            };
            let inserted: CommentRow = diesel::insert_into(comments::table)
                .values(&row)
                .returning(CommentRow::as_returning())
                .get_result(&mut conn)
                .map_err(query_error)?;
            inserted.into_domain()
        })
        .await
    }

    async fn list_for_news(
        &self,
        news_id: NewsId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let pool = self.pool.clone();
        run_blocking(CommentPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let rows = comments::table
                .filter(comments::news_id.eq(news_id.get()))
                .order((comments::created.asc(), comments::id.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(&mut conn)
                .map_err(query_error)?;
            rows.into_iter().map(CommentRow::into_domain).collect()
        })
        .await
    }

    async fn find_by_id(
        &self,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let pool = self.pool.clone();
        run_blocking(CommentPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = comments::table
                .find(id.get())
                .select(CommentRow::as_select())
                .first::<CommentRow>(&mut conn)
                .optional()
                .map_err(query_error)?;
            row.map(CommentRow::into_domain).transpose()
        })
        .await
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Comment, CommentPersistenceError> {
        let pool = self.pool.clone();
        let text = text.to_owned();
        run_blocking(CommentPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let updated: CommentRow = diesel::update(comments::table.find(id.get()))
                .set(comments::text.eq(&text))
                .returning(CommentRow::as_returning())
                .get_result(&mut conn)
                .map_err(|err| match err {
                    diesel::result::Error::NotFound => {
                        CommentPersistenceError::query(format!("comment {id} not found"))
                    }
                    other => query_error(other),
                })?;
            updated.into_domain()
        })
        .await
    }

    async fn delete(&self, id: CommentId) -> Result<(), CommentPersistenceError> {
        let pool = self.pool.clone();
        run_blocking(CommentPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let affected = diesel::delete(comments::table.find(id.get()))
                .execute(&mut conn)
                .map_err(query_error)?;
            if affected == 0 {
                return Err(CommentPersistenceError::query(format!(
                    "comment {id} not found"
                )));
            }
            Ok(())
        })
        .await
    }
}
