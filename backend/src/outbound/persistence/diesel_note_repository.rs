//! Diesel-backed [`NoteRepository`] adapter.

use async_trait::async_trait;
use diesel::prelude::*;

use super::diesel_helpers::{is_unique_violation, run_blocking};
use super::models::{NewNoteRow, NoteRow};
use super::pool::DbPool;
use super::schema::notes;
use crate::domain::ports::{NotePersistenceError, NoteRepository};
use crate::domain::{Note, NoteId, NoteSlug, UserId};

/// SQLite persistence for personal notes.
#[derive(Clone)]
pub struct DieselNoteRepository {
    pool: DbPool,
}

impl DieselNoteRepository {
    /// Create a new repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn checkout(pool: &DbPool) -> Result<super::pool::DbConnection, NotePersistenceError> {
    pool.get()
        .map_err(|err| NotePersistenceError::connection(err.to_string()))
}

fn query_error(err: diesel::result::Error) -> NotePersistenceError {
    NotePersistenceError::query(err.to_string())
}

#[async_trait]
impl NoteRepository for DieselNoteRepository {
    async fn create(
        &self,
        author: &UserId,
        title: &str,
        body: &str,
        slug: &NoteSlug,
    ) -> Result<Note, NotePersistenceError> {
        let pool = self.pool.clone();
        let author = author.clone();
        let title = title.to_owned();
        let body = body.to_owned();
        let slug = slug.clone();
        run_blocking(NotePersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = NewNoteRow {
                title: &title,
                body: &body,
                slug: slug.as_ref(),
                author_id: author.as_ref(),
            };
            let inserted: NoteRow = diesel::insert_into(notes::table)
                .values(&row)
                .returning(NoteRow::as_returning())
                .get_result(&mut conn)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        NotePersistenceError::duplicate_slug(slug.as_ref())
                    } else {
                        query_error(err)
                    }
                })?;
            inserted.into_domain()
        })
        .await
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let pool = self.pool.clone();
        let author = author.clone();
        run_blocking(NotePersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let rows = notes::table
                .filter(notes::author_id.eq(author.as_ref()))
                .order(notes::id.asc())
                .select(NoteRow::as_select())
                .load::<NoteRow>(&mut conn)
                .map_err(query_error)?;
            rows.into_iter().map(NoteRow::into_domain).collect()
        })
        .await
    }

    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NotePersistenceError> {
        let pool = self.pool.clone();
        let slug = slug.clone();
        run_blocking(NotePersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let row = notes::table
                .filter(notes::slug.eq(slug.as_ref()))
                .select(NoteRow::as_select())
                .first::<NoteRow>(&mut conn)
                .optional()
                .map_err(query_error)?;
            row.map(NoteRow::into_domain).transpose()
        })
        .await
    }

    async fn update(
        &self,
        id: NoteId,
        title: &str,
        body: &str,
        slug: &NoteSlug,
    ) -> Result<Note, NotePersistenceError> {
        let pool = self.pool.clone();
        let title = title.to_owned();
        let body = body.to_owned();
        let slug = slug.clone();
        run_blocking(NotePersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let updated: NoteRow = diesel::update(notes::table.find(id.get()))
                .set((
                    notes::title.eq(&title),
                    notes::body.eq(&body),
                    notes::slug.eq(slug.as_ref()),
                ))
                .returning(NoteRow::as_returning())
                .get_result(&mut conn)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        NotePersistenceError::duplicate_slug(slug.as_ref())
                    } else if matches!(err, diesel::result::Error::NotFound) {
                        NotePersistenceError::query(format!("note {id} not found"))
                    } else {
                        query_error(err)
                    }
                })?;
            updated.into_domain()
        })
        .await
    }

    async fn delete(&self, id: NoteId) -> Result<(), NotePersistenceError> {
        let pool = self.pool.clone();
        run_blocking(NotePersistenceError::connection, move || {
            let mut conn = checkout(&pool)?;
            let affected = diesel::delete(notes::table.find(id.get()))
                .execute(&mut conn)
                .map_err(query_error)?;
            if affected == 0 {
                return Err(NotePersistenceError::query(format!("note {id} not found")));
            }
            Ok(())
        })
        .await
    }
}
