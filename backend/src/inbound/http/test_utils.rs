//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use pagination::PageSize;

use crate::config::default_banned_words;
use crate::domain::{AccountService, CommentService, NewsService, NoteService};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::memory::{
    MemoryCommentRepository, MemoryNewsRepository, MemoryNoteRepository, MemoryUserRepository,
};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Handler state over in-memory stores, with the stores exposed for seeding.
pub struct TestPorts {
    pub http: HttpState,
    pub users: Arc<MemoryUserRepository>,
    pub news: Arc<MemoryNewsRepository>,
    pub comments: Arc<MemoryCommentRepository>,
    pub notes: Arc<MemoryNoteRepository>,
}

/// Build [`TestPorts`] with the given feed page size.
pub fn memory_ports(page_size: usize) -> TestPorts {
    let users = Arc::new(MemoryUserRepository::default());
    let news = Arc::new(MemoryNewsRepository::default());
    let comments = Arc::new(MemoryCommentRepository::default());
    let notes = Arc::new(MemoryNoteRepository::default());

    let page_size = PageSize::new(page_size).expect("valid page size");
    let http = HttpState::new(
        Arc::new(NewsService::new(news.clone(), comments.clone(), page_size)),
        Arc::new(CommentService::new(
            news.clone(),
            comments.clone(),
            default_banned_words(),
        )),
        Arc::new(NoteService::new(notes.clone())),
        Arc::new(NoteService::new(notes.clone())),
        Arc::new(AccountService::new(users.clone())),
    );

    TestPorts {
        http,
        users,
        news,
        comments,
        notes,
    }
}

/// [`TestPorts`] with the default page size of ten.
pub fn default_ports() -> TestPorts {
    memory_ports(10)
}
