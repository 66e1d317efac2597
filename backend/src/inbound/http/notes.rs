//! Personal notes API handlers.
//!
//! ```text
//! GET    /api/v1/notes
//! POST   /api/v1/notes        {"title":"...","body":"...","slug":null}
//! GET    /api/v1/notes/done
//! GET    /api/v1/notes/{slug}
//! PUT    /api/v1/notes/{slug} {"title":"...","body":"...","slug":"..."}
//! DELETE /api/v1/notes/{slug}
//! ```
//!
//! Every route requires a session; anonymous callers are redirected to login
//! with the original path in `next`. Mutations answer `302 Found` pointing at
//! the notes landing page.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Error, Note, NoteDraft, NoteSlug, NoteValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirects;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Note create/update body.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    pub title: String,
    pub body: String,
    /// Explicit slug; derived from the title when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
}

impl TryFrom<NoteForm> for NoteDraft {
    type Error = NoteValidationError;

    fn try_from(value: NoteForm) -> Result<Self, Self::Error> {
        Self::try_new(value.title, value.body, value.slug)
    }
}

/// One note as returned by the API.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub slug: String,
    /// Identifier of the owning author.
    pub author: String,
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().get(),
            title: note.title().to_owned(),
            body: note.body().to_owned(),
            slug: note.slug().to_string(),
            author: note.author().to_string(),
        }
    }
}

fn map_note_validation_error(err: NoteValidationError) -> Error {
    Error::field_validation(err.field(), err.to_string())
}

/// A slug that fails validation cannot address any note.
fn parse_slug(raw: &str) -> Result<NoteSlug, Error> {
    NoteSlug::new(raw).map_err(|_| Error::not_found("note not found"))
}

/// The caller's notes, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/notes",
    responses(
        (status = 200, description = "Notes owned by the caller", body = [NoteView]),
        (status = 302, description = "Anonymous; redirect to login")
    ),
    tags = ["notes"],
    operation_id = "listNotes"
)]
#[get("/notes")]
pub async fn list_notes(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let notes = state.notes.list(&user_id).await?;
    let views: Vec<NoteView> = notes.iter().map(NoteView::from).collect();
    Ok(HttpResponse::Ok().json(views))
}

/// Create a note for the caller.
#[utoipa::path(
    post,
    path = "/api/v1/notes",
    request_body = NoteForm,
    responses(
        (status = 302, description = "Note stored; redirect to the landing page"),
        (status = 400, description = "Invalid form or duplicate slug", body = Error)
    ),
    tags = ["notes"],
    operation_id = "addNote"
)]
#[post("/notes")]
pub async fn add_note(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<NoteForm>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let draft = NoteDraft::try_from(payload.into_inner()).map_err(map_note_validation_error)?;
    state.note_commands.add(&user_id, draft).await?;
    Ok(redirects::notes_done_redirect())
}

/// Landing page acknowledging a completed note mutation.
#[utoipa::path(
    get,
    path = "/api/v1/notes/done",
    responses(
        (status = 200, description = "Acknowledgement"),
        (status = 302, description = "Anonymous; redirect to login")
    ),
    tags = ["notes"],
    operation_id = "notesDone"
)]
#[get("/notes/done")]
pub async fn notes_done(req: HttpRequest, session: SessionContext) -> ApiResult<HttpResponse> {
    if session.user_id()?.is_none() {
        return Ok(redirects::login_redirect(req.path()));
    }
    Ok(HttpResponse::Ok().json(json!({ "detail": "done" })))
}

/// One of the caller's notes.
///
/// A note owned by someone else is reported as `404 Not Found`.
#[utoipa::path(
    get,
    path = "/api/v1/notes/{slug}",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 200, description = "Note detail", body = NoteView),
        (status = 302, description = "Anonymous; redirect to login"),
        (status = 404, description = "No such note", body = Error)
    ),
    tags = ["notes"],
    operation_id = "noteDetail"
)]
#[get("/notes/{slug}")]
pub async fn note_detail(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let slug = parse_slug(&path)?;
    let note = state.notes.fetch(&user_id, &slug).await?;
    Ok(HttpResponse::Ok().json(NoteView::from(&note)))
}

/// Replace the caller's own note.
#[utoipa::path(
    put,
    path = "/api/v1/notes/{slug}",
    params(("slug" = String, Path, description = "Note slug")),
    request_body = NoteForm,
    responses(
        (status = 302, description = "Note updated; redirect to the landing page"),
        (status = 400, description = "Invalid form or duplicate slug", body = Error),
        (status = 404, description = "No such note", body = Error)
    ),
    tags = ["notes"],
    operation_id = "editNote"
)]
#[put("/notes/{slug}")]
pub async fn edit_note(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<NoteForm>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let slug = parse_slug(&path)?;
    let draft = NoteDraft::try_from(payload.into_inner()).map_err(map_note_validation_error)?;
    state.note_commands.edit(&user_id, &slug, draft).await?;
    Ok(redirects::notes_done_redirect())
}

/// Remove the caller's own note.
#[utoipa::path(
    delete,
    path = "/api/v1/notes/{slug}",
    params(("slug" = String, Path, description = "Note slug")),
    responses(
        (status = 302, description = "Note removed; redirect to the landing page"),
        (status = 404, description = "No such note", body = Error)
    ),
    tags = ["notes"],
    operation_id = "deleteNote"
)]
#[delete("/notes/{slug}")]
pub async fn delete_note(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let slug = parse_slug(&path)?;
    state.note_commands.delete(&user_id, &slug).await?;
    Ok(redirects::notes_done_redirect())
}
