//! In-memory repositories.
//!
//! Mutex-guarded stores backing handler tests and the no-database dev mode.
//! Semantics mirror the Diesel adapters: identifiers are monotonically
//! assigned, usernames and slugs are unique, and feed ordering matches the
//! SQL queries.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    CommentPersistenceError, CommentRepository, NewsPersistenceError, NewsRepository,
    NotePersistenceError, NoteRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Comment, CommentId, News, NewsDraft, NewsId, Note, NoteId, NoteSlug, PasswordHash, User,
    UserId, Username,
};

/// In-memory [`UserRepository`].
#[derive(Default)]
pub struct MemoryUserRepository {
    store: Mutex<HashMap<String, (User, PasswordHash)>>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(
        &self,
        username: &Username,
        password: &PasswordHash,
    ) -> Result<User, UserPersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))?;
        if guard
            .values()
            .any(|(user, _)| user.username().as_ref() == username.as_ref())
        {
            return Err(UserPersistenceError::duplicate_username(username.as_ref()));
        }
        let user = User::new(UserId::random(), username.clone());
        guard.insert(
            user.id().as_ref().to_owned(),
            (user.clone(), password.clone()),
        );
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<(User, PasswordHash)>, UserPersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))?;
        Ok(guard
            .values()
            .find(|(user, _)| user.username().as_ref() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))?;
        Ok(guard.get(id.as_ref()).map(|(user, _)| user.clone()))
    }
}

#[derive(Default)]
struct NewsStore {
    rows: Vec<News>,
    next_id: i64,
}

/// In-memory [`NewsRepository`].
#[derive(Default)]
pub struct MemoryNewsRepository {
    store: Mutex<NewsStore>,
}

#[async_trait]
impl NewsRepository for MemoryNewsRepository {
    async fn create(&self, draft: &NewsDraft) -> Result<News, NewsPersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| NewsPersistenceError::connection("news store lock poisoned"))?;
        guard.next_id += 1;
        let news = News::new(
            NewsId::new(guard.next_id),
            draft.title(),
            draft.body(),
            draft.date_or_today(),
        );
        guard.rows.push(news.clone());
        Ok(news)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<News>, NewsPersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| NewsPersistenceError::connection("news store lock poisoned"))?;
        let mut rows = guard.rows.clone();
        rows.sort_by(|a, b| b.date().cmp(&a.date()).then(b.id().cmp(&a.id())));
        rows.truncate(limit);
        Ok(rows)
    }

    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>, NewsPersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| NewsPersistenceError::connection("news store lock poisoned"))?;
        Ok(guard.rows.iter().find(|news| news.id() == id).cloned())
    }
}

#[derive(Default)]
struct CommentStore {
    rows: Vec<Comment>,
    next_id: i64,
}

/// In-memory [`CommentRepository`].
#[derive(Default)]
pub struct MemoryCommentRepository {
    store: Mutex<CommentStore>,
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn create(
        &self,
        news_id: NewsId,
        author: &UserId,
        text: &str,
    ) -> Result<Comment, CommentPersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| CommentPersistenceError::connection("comment store lock poisoned"))?;
        guard.next_id += 1;
        let comment = Comment::new(
            CommentId::new(guard.next_id),
            news_id,
            author.clone(),
            text,
            Utc::now(),
        );
        guard.rows.push(comment.clone());
        Ok(comment)
    }

    async fn list_for_news(
        &self,
        news_id: NewsId,
    ) -> Result<Vec<Comment>, CommentPersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| CommentPersistenceError::connection("comment store lock poisoned"))?;
        let mut rows: Vec<Comment> = guard
            .rows
            .iter()
            .filter(|comment| comment.news_id() == news_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created().cmp(&b.created()).then(a.id().cmp(&b.id())));
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        id: CommentId,
    ) -> Result<Option<Comment>, CommentPersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| CommentPersistenceError::connection("comment store lock poisoned"))?;
        Ok(guard.rows.iter().find(|comment| comment.id() == id).cloned())
    }

    async fn update_text(
        &self,
        id: CommentId,
        text: &str,
    ) -> Result<Comment, CommentPersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| CommentPersistenceError::connection("comment store lock poisoned"))?;
        let position = guard
            .rows
            .iter()
            .position(|comment| comment.id() == id)
            .ok_or_else(|| CommentPersistenceError::query(format!("comment {id} not found")))?;
        let existing = &guard.rows[position];
        let updated = Comment::new(
            existing.id(),
            existing.news_id(),
            existing.author().clone(),
            text,
            existing.created(),
        );
        guard.rows[position] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: CommentId) -> Result<(), CommentPersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| CommentPersistenceError::connection("comment store lock poisoned"))?;
        let before = guard.rows.len();
        guard.rows.retain(|comment| comment.id() != id);
        if guard.rows.len() == before {
            return Err(CommentPersistenceError::query(format!(
                "comment {id} not found"
            )));
        }
        Ok(())
    }
}

#[derive(Default)]
struct NoteStore {
    rows: Vec<Note>,
    next_id: i64,
}

/// In-memory [`NoteRepository`].
#[derive(Default)]
pub struct MemoryNoteRepository {
    store: Mutex<NoteStore>,
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn create(
        &self,
        author: &UserId,
        title: &str,
        body: &str,
        slug: &NoteSlug,
    ) -> Result<Note, NotePersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| NotePersistenceError::connection("note store lock poisoned"))?;
        if guard.rows.iter().any(|note| note.slug() == slug) {
            return Err(NotePersistenceError::duplicate_slug(slug.as_ref()));
        }
        guard.next_id += 1;
        let note = Note::new(
            NoteId::new(guard.next_id),
            title,
            body,
            slug.clone(),
            author.clone(),
        );
        guard.rows.push(note.clone());
        Ok(note)
    }

    async fn list_by_author(&self, author: &UserId) -> Result<Vec<Note>, NotePersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| NotePersistenceError::connection("note store lock poisoned"))?;
        let mut rows: Vec<Note> = guard
            .rows
            .iter()
            .filter(|note| note.author() == author)
            .cloned()
            .collect();
        rows.sort_by_key(Note::id);
        Ok(rows)
    }

    async fn find_by_slug(&self, slug: &NoteSlug) -> Result<Option<Note>, NotePersistenceError> {
        let guard = self
            .store
            .lock()
            .map_err(|_| NotePersistenceError::connection("note store lock poisoned"))?;
        Ok(guard.rows.iter().find(|note| note.slug() == slug).cloned())
    }

    async fn update(
        &self,
        id: NoteId,
        title: &str,
        body: &str,
        slug: &NoteSlug,
    ) -> Result<Note, NotePersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| NotePersistenceError::connection("note store lock poisoned"))?;
        if guard
            .rows
            .iter()
            .any(|note| note.slug() == slug && note.id() != id)
        {
            return Err(NotePersistenceError::duplicate_slug(slug.as_ref()));
        }
        let position = guard
            .rows
            .iter()
            .position(|note| note.id() == id)
            .ok_or_else(|| NotePersistenceError::query(format!("note {id} not found")))?;
        let updated = Note::new(
            id,
            title,
            body,
            slug.clone(),
            guard.rows[position].author().clone(),
        );
        guard.rows[position] = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: NoteId) -> Result<(), NotePersistenceError> {
        let mut guard = self
            .store
            .lock()
            .map_err(|_| NotePersistenceError::connection("note store lock poisoned"))?;
        let before = guard.rows.len();
        guard.rows.retain(|note| note.id() != id);
        if guard.rows.len() == before {
            return Err(NotePersistenceError::query(format!("note {id} not found")));
        }
        Ok(())
    }
}
