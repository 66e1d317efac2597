//! Comment API handlers.
//!
//! ```text
//! POST   /api/v1/news/{id}/comments {"text":"A fine article."}
//! PUT    /api/v1/comments/{id}      {"text":"Rewritten."}
//! DELETE /api/v1/comments/{id}
//! ```
//!
//! Anonymous callers are redirected to login with the original path in
//! `next`. Successful mutations answer `302 Found` pointing back at the
//! parent record's comment thread.

use actix_web::{HttpRequest, HttpResponse, delete, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{CommentId, Error, NewsId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::redirects;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Comment submission body.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    pub text: String,
}

/// Attach a comment to a news record.
#[utoipa::path(
    post,
    path = "/api/v1/news/{id}/comments",
    params(("id" = i64, Path, description = "News record identifier")),
    request_body = CommentForm,
    responses(
        (status = 302, description = "Comment stored; redirect to the thread"),
        (status = 400, description = "Blank or banned text", body = Error),
        (status = 404, description = "No such record", body = Error)
    ),
    tags = ["comments"],
    operation_id = "submitComment"
)]
#[post("/news/{id}/comments")]
pub async fn submit_comment(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CommentForm>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let news_id = NewsId::new(path.into_inner());
    let comment = state
        .comments
        .submit(&user_id, news_id, &payload.text)
        .await?;
    Ok(redirects::comments_redirect(comment.news_id()))
}

/// Rewrite the caller's own comment.
///
/// A comment owned by someone else is reported as `404 Not Found`.
#[utoipa::path(
    put,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    request_body = CommentForm,
    responses(
        (status = 302, description = "Comment updated; redirect to the thread"),
        (status = 400, description = "Blank or banned text", body = Error),
        (status = 404, description = "No such comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "editComment"
)]
#[put("/comments/{id}")]
pub async fn edit_comment(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<CommentForm>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let comment = state
        .comments
        .edit(&user_id, CommentId::new(path.into_inner()), &payload.text)
        .await?;
    Ok(redirects::comments_redirect(comment.news_id()))
}

/// Remove the caller's own comment.
///
/// A comment owned by someone else is reported as `404 Not Found`.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/{id}",
    params(("id" = i64, Path, description = "Comment identifier")),
    responses(
        (status = 302, description = "Comment removed; redirect to the thread"),
        (status = 404, description = "No such comment", body = Error)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{id}")]
pub async fn delete_comment(
    req: HttpRequest,
    session: SessionContext,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let Some(user_id) = session.user_id()? else {
        return Ok(redirects::login_redirect(req.path()));
    };
    let news_id = state
        .comments
        .delete(&user_id, CommentId::new(path.into_inner()))
        .await?;
    Ok(redirects::comments_redirect(news_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::NewsRepository;
    use crate::domain::{COMMENT_WARNING, NewsDraft};
    use crate::inbound::http::accounts::SignupRequest;
    use crate::inbound::http::test_utils::{TestPorts, default_ports, test_session_middleware};
    use actix_web::cookie::Cookie;
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test as actix_test};
    use serde_json::Value;

    fn test_app(
        ports: &TestPorts,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(ports.http.clone()))
            .wrap(test_session_middleware())
            .configure(crate::inbound::http::configure_api)
    }

    async fn sign_up<S>(app: &S, username: &str) -> Cookie<'static>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse,
                Error = actix_web::Error,
            >,
    {
        let response = actix_test::call_service(
            app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(&SignupRequest {
                    username: username.into(),
                    password: "a long password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie")
            .into_owned()
    }

    async fn seed_one_news(ports: &TestPorts) -> i64 {
        let draft = NewsDraft::try_new("Headline", "Body", None).expect("valid draft");
        ports.news.create(&draft).await.expect("seed news").id().get()
    }

    fn location(response: &actix_web::dev::ServiceResponse) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .expect("location header")
            .to_str()
            .expect("ascii location")
            .to_owned()
    }

    #[actix_web::test]
    async fn anonymous_submission_redirects_to_login_with_next() {
        let ports = default_ports();
        let news_id = seed_one_news(&ports).await;
        let app = actix_test::init_service(test_app(&ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/news/{news_id}/comments"))
                .set_json(&CommentForm {
                    text: "A fine article.".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            location(&response),
            format!("/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnews%2F{news_id}%2Fcomments")
        );
    }

    #[actix_web::test]
    async fn submission_redirects_to_the_thread_anchor() {
        let ports = default_ports();
        let news_id = seed_one_news(&ports).await;
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = sign_up(&app, "reader").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/news/{news_id}/comments"))
                .cookie(cookie)
                .set_json(&CommentForm {
                    text: "A fine article.".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), format!("/api/v1/news/{news_id}#comments"));
    }

    #[actix_web::test]
    async fn banned_vocabulary_is_rejected_with_the_warning() {
        let ports = default_ports();
        let news_id = seed_one_news(&ports).await;
        let app = actix_test::init_service(test_app(&ports)).await;
        let cookie = sign_up(&app, "reader").await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/news/{news_id}/comments"))
                .cookie(cookie)
                .set_json(&CommentForm {
                    text: "You utter scoundrel.".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["message"], COMMENT_WARNING);
        assert_eq!(body["details"]["field"], "text");
    }

    #[actix_web::test]
    async fn authors_edit_their_own_comments_only() {
        let ports = default_ports();
        let news_id = seed_one_news(&ports).await;
        let app = actix_test::init_service(test_app(&ports)).await;
        let author = sign_up(&app, "author").await;
        let other = sign_up(&app, "other").await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/news/{news_id}/comments"))
                .cookie(author.clone())
                .set_json(&CommentForm {
                    text: "original".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::FOUND);

        let foreign_edit = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/comments/1")
                .cookie(other)
                .set_json(&CommentForm {
                    text: "hijacked".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(foreign_edit.status(), StatusCode::NOT_FOUND);

        let own_edit = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri("/api/v1/comments/1")
                .cookie(author)
                .set_json(&CommentForm {
                    text: "rewritten".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(own_edit.status(), StatusCode::FOUND);
        assert_eq!(location(&own_edit), format!("/api/v1/news/{news_id}#comments"));
    }

    #[actix_web::test]
    async fn delete_is_owner_only_and_single_shot() {
        let ports = default_ports();
        let news_id = seed_one_news(&ports).await;
        let app = actix_test::init_service(test_app(&ports)).await;
        let author = sign_up(&app, "author").await;
        let other = sign_up(&app, "other").await;

        let created = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri(&format!("/api/v1/news/{news_id}/comments"))
                .cookie(author.clone())
                .set_json(&CommentForm { text: "mine".into() })
                .to_request(),
        )
        .await;
        assert_eq!(created.status(), StatusCode::FOUND);

        let foreign_delete = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/comments/1")
                .cookie(other)
                .to_request(),
        )
        .await;
        assert_eq!(foreign_delete.status(), StatusCode::NOT_FOUND);

        let own_delete = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/comments/1")
                .cookie(author.clone())
                .to_request(),
        )
        .await;
        assert_eq!(own_delete.status(), StatusCode::FOUND);

        let second_delete = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri("/api/v1/comments/1")
                .cookie(author)
                .to_request(),
        )
        .await;
        assert_eq!(second_delete.status(), StatusCode::NOT_FOUND);
    }
}
