//! Personal note domain services.
//!
//! Every operation is scoped to the calling author. A note owned by someone
//! else is reported as absent, never as forbidden. Slugs are unique across
//! the whole store; a clash is rejected as a field validation failure that
//! names the offending slug.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::note::duplicate_slug_message;
use crate::domain::ports::{
    NoteCommands, NotePersistenceError, NoteQueries, NoteRepository,
};
use crate::domain::{Error, Note, NoteDraft, NoteSlug, UserId};

/// Note service implementing [`NoteQueries`] and [`NoteCommands`].
#[derive(Clone)]
pub struct NoteService<R> {
    note_repo: Arc<R>,
}

impl<R> NoteService<R> {
    /// Create a new service over the given repository.
    pub fn new(note_repo: Arc<R>) -> Self {
        Self { note_repo }
    }
}

impl<R> NoteService<R>
where
    R: NoteRepository,
{
    fn map_note_error(error: NotePersistenceError) -> Error {
        match error {
            NotePersistenceError::Connection { message } => {
                Error::service_unavailable(format!("note repository unavailable: {message}"))
            }
            NotePersistenceError::Query { message } => {
                Error::internal(format!("note repository error: {message}"))
            }
            NotePersistenceError::DuplicateSlug { slug } => {
                Error::field_validation("slug", duplicate_slug_message_raw(&slug))
            }
        }
    }

    fn duplicate_slug_error(slug: &NoteSlug) -> Error {
        Error::field_validation("slug", duplicate_slug_message(slug))
    }

    /// Load a note visible to `caller`, reporting foreign notes as absent.
    async fn fetch_owned(&self, caller: &UserId, slug: &NoteSlug) -> Result<Note, Error> {
        self.note_repo
            .find_by_slug(slug)
            .await
            .map_err(Self::map_note_error)?
            .filter(|note| note.author() == caller)
            .ok_or_else(|| Error::not_found("note not found"))
    }
}

fn duplicate_slug_message_raw(slug: &str) -> String {
    format!("{slug}{}", crate::domain::note::SLUG_WARNING)
}

#[async_trait]
impl<R> NoteQueries for NoteService<R>
where
    R: NoteRepository,
{
    async fn list(&self, caller: &UserId) -> Result<Vec<Note>, Error> {
        self.note_repo
            .list_by_author(caller)
            .await
            .map_err(Self::map_note_error)
    }

    async fn fetch(&self, caller: &UserId, slug: &NoteSlug) -> Result<Note, Error> {
        self.fetch_owned(caller, slug).await
    }
}

#[async_trait]
impl<R> NoteCommands for NoteService<R>
where
    R: NoteRepository,
{
    async fn add(&self, caller: &UserId, draft: NoteDraft) -> Result<Note, Error> {
        let slug = draft.resolve_slug();
        if self
            .note_repo
            .find_by_slug(&slug)
            .await
            .map_err(Self::map_note_error)?
            .is_some()
        {
            return Err(Self::duplicate_slug_error(&slug));
        }

        self.note_repo
            .create(caller, draft.title(), draft.body(), &slug)
            .await
            .map_err(Self::map_note_error)
    }

    async fn edit(
        &self,
        caller: &UserId,
        slug: &NoteSlug,
        draft: NoteDraft,
    ) -> Result<Note, Error> {
        let existing = self.fetch_owned(caller, slug).await?;
        let next_slug = draft.resolve_slug();

        if next_slug != *existing.slug()
            && self
                .note_repo
                .find_by_slug(&next_slug)
                .await
                .map_err(Self::map_note_error)?
                .is_some()
        {
            return Err(Self::duplicate_slug_error(&next_slug));
        }

        self.note_repo
            .update(existing.id(), draft.title(), draft.body(), &next_slug)
            .await
            .map_err(Self::map_note_error)
    }

    async fn delete(&self, caller: &UserId, slug: &NoteSlug) -> Result<(), Error> {
        let existing = self.fetch_owned(caller, slug).await?;
        self.note_repo
            .delete(existing.id())
            .await
            .map_err(Self::map_note_error)
    }
}
