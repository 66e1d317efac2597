//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, User};
use crate::inbound::http::accounts::{LoginRequest, SignupRequest};
use crate::inbound::http::comments::CommentForm;
use crate::inbound::http::news::{CommentView, NewsDetail, NewsSummary};
use crate::inbound::http::notes::{NoteForm, NoteView};
use crate::inbound::http::{accounts, comments, news, notes};

/// Public OpenAPI surface used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gazette API",
        description = "News feed with comments, plus private personal notes."
    ),
    paths(
        accounts::signup,
        accounts::login,
        accounts::login_page,
        accounts::logout,
        news::home_feed,
        news::news_detail,
        comments::submit_comment,
        comments::edit_comment,
        comments::delete_comment,
        notes::list_notes,
        notes::add_note,
        notes::notes_done,
        notes::note_detail,
        notes::edit_note,
        notes::delete_note,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        SignupRequest,
        LoginRequest,
        CommentForm,
        NewsSummary,
        NewsDetail,
        CommentView,
        NoteForm,
        NoteView,
    ))
)]
pub struct ApiDoc;
