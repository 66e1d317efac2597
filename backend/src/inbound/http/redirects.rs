//! Redirect responses shared by form-style endpoints.
//!
//! Mutating endpoints answer successful submissions with `302 Found` the way
//! a server-rendered site would, and send anonymous callers to the login
//! endpoint with the original path preserved in a `next` query parameter.

use actix_web::HttpResponse;
use actix_web::http::header;
use url::form_urlencoded;

use crate::domain::NewsId;

/// Path of the login endpoint redirect targets point at.
pub const LOGIN_PATH: &str = "/api/v1/auth/login";
/// Landing path after a successful note mutation.
pub const NOTES_DONE_PATH: &str = "/api/v1/notes/done";

/// `302 Found` pointing an anonymous caller at login, with `next` set to the
/// path they asked for.
pub fn login_redirect(next: &str) -> HttpResponse {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    found(&format!("{LOGIN_PATH}?{query}"))
}

/// `302 Found` pointing at the comment thread of a news record.
pub fn comments_redirect(news_id: NewsId) -> HttpResponse {
    found(&format!("/api/v1/news/{news_id}#comments"))
}

/// `302 Found` pointing at the notes landing page.
pub fn notes_done_redirect() -> HttpResponse {
    found(NOTES_DONE_PATH)
}

fn found(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use rstest::rstest;

    fn location(response: &HttpResponse) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("ascii location")
    }

    #[rstest]
    fn login_redirect_preserves_the_requested_path() {
        let response = login_redirect("/api/v1/notes/my-note");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            location(&response),
            "/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnotes%2Fmy-note"
        );
    }

    #[rstest]
    fn comments_redirect_targets_the_thread_anchor() {
        let response = comments_redirect(NewsId::new(7));
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/api/v1/news/7#comments");
    }

    #[rstest]
    fn notes_done_redirect_targets_the_landing_page() {
        let response = notes_done_redirect();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), NOTES_DONE_PATH);
    }
}
