//! Diesel row types and their domain conversions.
//!
//! Row structs mirror the table layout exactly; conversion into domain
//! entities validates stored data and reports corruption as query errors
//! rather than panicking.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use super::schema::{comments, news, notes, users};
use crate::domain::ports::{
    CommentPersistenceError, NotePersistenceError, UserPersistenceError,
};
use crate::domain::{
    Comment, CommentId, News, NewsId, Note, NoteId, NoteSlug, PasswordHash, User, UserId,
    Username,
};

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: &'a str,
    pub username: &'a str,
    pub password_hash: &'a str,
}

impl UserRow {
    /// Convert into the domain user plus its stored digest.
    pub fn into_domain(self) -> Result<(User, PasswordHash), UserPersistenceError> {
        let id = UserId::new(&self.id).map_err(|err| {
            UserPersistenceError::query(format!("corrupt user id {}: {err}", self.id))
        })?;
        let username = Username::new(self.username).map_err(|err| {
            UserPersistenceError::query(format!("corrupt username for user {id}: {err}"))
        })?;
        Ok((
            User::new(id, username),
            PasswordHash::from_encoded(self.password_hash),
        ))
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = news)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NewsRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub date: NaiveDate,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = news)]
pub struct NewNewsRow<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub date: NaiveDate,
}

impl From<NewsRow> for News {
    fn from(row: NewsRow) -> Self {
        News::new(NewsId::new(row.id), row.title, row.body, row.date)
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CommentRow {
    pub id: i64,
    pub news_id: i64,
    pub author_id: String,
    pub text: String,
    pub created: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow<'a> {
    pub news_id: i64,
    pub author_id: &'a str,
    pub text: &'a str,
    pub created: NaiveDateTime,
}

impl CommentRow {
    /// Convert into the domain comment; timestamps are stored as naive UTC.
    pub fn into_domain(self) -> Result<Comment, CommentPersistenceError> {
        let author = UserId::new(&self.author_id).map_err(|err| {
            CommentPersistenceError::query(format!(
                "corrupt author id {} on comment {}: {err}",
                self.author_id, self.id
            ))
        })?;
        Ok(Comment::new(
            CommentId::new(self.id),
            NewsId::new(self.news_id),
            author,
            self.text,
            self.created.and_utc(),
        ))
    }
}

#[derive(Debug, Queryable, Selectable, Identifiable)]
#[diesel(table_name = notes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct NoteRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub slug: String,
    pub author_id: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = notes)]
pub struct NewNoteRow<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub slug: &'a str,
    pub author_id: &'a str,
}

impl NoteRow {
    /// Convert into the domain note, validating the stored slug and author.
    pub fn into_domain(self) -> Result<Note, NotePersistenceError> {
        let slug = NoteSlug::new(&self.slug).map_err(|err| {
            NotePersistenceError::query(format!(
                "corrupt slug {} on note {}: {err}",
                self.slug, self.id
            ))
        })?;
        let author = UserId::new(&self.author_id).map_err(|err| {
            NotePersistenceError::query(format!(
                "corrupt author id {} on note {}: {err}",
                self.author_id, self.id
            ))
        })?;
        Ok(Note::new(
            NoteId::new(self.id),
            self.title,
            self.body,
            slug,
            author,
        ))
    }
}
