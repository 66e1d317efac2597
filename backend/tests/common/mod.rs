//! Shared wiring for the HTTP integration suites.
//!
//! Assembles the full route table over in-memory stores, with the stores
//! exposed so tests can seed data directly through the driven ports.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, Error, test as actix_test, web};
use pagination::PageSize;
use serde_json::json;

use backend::config::default_banned_words;
use backend::domain::{AccountService, CommentService, NewsService, NoteService};
use backend::inbound::http::{configure_api, state::HttpState};
use backend::outbound::persistence::{
    MemoryCommentRepository, MemoryNewsRepository, MemoryNoteRepository, MemoryUserRepository,
};

/// Application state plus the raw stores behind it.
pub struct Harness {
    pub http: HttpState,
    pub users: Arc<MemoryUserRepository>,
    pub news: Arc<MemoryNewsRepository>,
    pub comments: Arc<MemoryCommentRepository>,
    pub notes: Arc<MemoryNoteRepository>,
}

/// Wire the services over fresh in-memory stores.
pub fn harness(page_size: usize) -> Harness {
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

    Harness {
        http,
        users,
        news,
        comments,
        notes,
    }
}

/// Build the application served by the binary, minus TLS and real keys.
pub fn test_app(
    harness: &Harness,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    > + use<>,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    App::new()
        .app_data(web::Data::new(harness.http.clone()))
        .wrap(session)
        .configure(configure_api)
}

/// Register an account and return the session cookie it established.
pub async fn sign_up<S>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = Error>,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/signup")
            .set_json(json!({
                "username": username,
                "password": "a long password",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}

/// Extract the session cookie from a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

/// Read the `Location` header as a string.
pub fn location(response: &ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("location header")
        .to_str()
        .expect("ascii location")
        .to_owned()
}
