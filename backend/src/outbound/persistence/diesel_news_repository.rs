//! Diesel-backed [`NewsRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use super::diesel_helpers::run_blocking;
use super::models::{NewNewsRow, NewsRow};
use super::pool::DbPool;
use super::schema::news;
use crate::domain::ports::{NewsPersistenceError, NewsRepository};
use crate::domain::{News, NewsDraft, NewsId};

/// SQLite persistence for news records.
#[derive(Clone)]
pub struct DieselNewsRepository {
    pool: DbPool,
}

impl DieselNewsRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn checkout(pool: &DbPool) -> Result<super::pool::DbConnection, NewsPersistenceError> {
    pool.get()
        .map_err(|err| NewsPersistenceError::connection(err.to_string()))
}

fn query_error(err: diesel::result::Error) -> NewsPersistenceError {
    NewsPersistenceError::query(err.to_string())
}

#[async_trait]
impl NewsRepository for DieselNewsRepository {
    async fn create(&self, draft: &NewsDraft) -> Result<News, NewsPersistenceError> {
        let pool = self.pool.clone();
        let draft = draft.clone();
        run_blocking(NewsPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = NewNewsRow {
                title: draft.title(),
                body: draft.body(),
                date: draft.date_or_today(),
            };
            let inserted: NewsRow = diesel::insert_into(news::table)
                .values(&row)
                .returning(NewsRow::as_returning())
                .get_result(&mut conn)
                .map_err(query_error)?;
            Ok(News::from(inserted))
        })
        .await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<News>, NewsPersistenceError> {
        let pool = self.pool.clone();
        run_blocking(NewsPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let rows = news::table
                .order((news::date.desc(), news::id.desc()))
                .limit(i64::try_from(limit).unwrap_or(i64::MAX))
                .select(NewsRow::as_select())
                .load::<NewsRow>(&mut conn)
                .map_err(query_error)?;
            Ok(rows.into_iter().map(News::from).collect())
        })
        .await
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsPersistenceError> {
        let pool = self.pool.clone();
        run_blocking(NewsPersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = news::table
                .find(id.get())
                .select(NewsRow::as_select())
                .first::<NewsRow>(&mut conn)
                .optional()
                .map_err(query_error)?;
            Ok(row.map(News::from))
        })
        .await
    }
}
