//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod comments;
pub mod error;
pub mod news;
pub mod notes;
pub mod redirects;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Register every API route under the `/api/v1` scope.
///
/// Shared by the server binary and by tests so both always serve the same
/// route table. Expects an `HttpState` in app data.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(accounts::signup)
            .service(accounts::login)
            .service(accounts::login_page)
            .service(accounts::logout)
            .service(news::home_feed)
            .service(comments::submit_comment)
            .service(comments::edit_comment)
            .service(comments::delete_comment)
            // `/news/{id}` must come after `/news/{id}/comments` submissions
            // are registered; `/notes/done` must come before `/notes/{slug}`.
            .service(news::news_detail)
            .service(notes::notes_done)
            .service(notes::list_notes)
            .service(notes::add_note)
            .service(notes::note_detail)
            .service(notes::edit_note)
            .service(notes::delete_note),
    );
}
