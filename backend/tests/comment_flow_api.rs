//! End-to-end tests for the comment lifecycle: submit, edit, delete, and the
//! redirects and masking around each.

#[allow(dead_code)]
mod common;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use backend::domain::{COMMENT_WARNING, NewsDraft};
use backend::domain::ports::NewsRepository;

use common::{harness, location, sign_up, test_app};

async fn seed_news(harness: &common::Harness) -> i64 {
    let draft = NewsDraft::try_new("Headline", "Body", None).expect("valid draft");
    harness
        .news
        .create(&draft)
        .await
        .expect("seed news")
        .id()
        .get()
}

#[actix_web::test]
async fn a_signed_in_reader_can_comment_and_lands_on_the_thread() {
    let harness = harness(10);
    let news_id = seed_news(&harness).await;
    let app = actix_test::init_service(test_app(&harness)).await;
    let cookie = sign_up(&app, "reader").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/news/{news_id}/comments"))
            .cookie(cookie)
            .set_json(json!({ "text": "A fine article." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), format!("/api/v1/news/{news_id}#comments"));

    let detail = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/news/{news_id}"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(detail).await;
    assert_eq!(body["comments"][0]["text"], "A fine article.");
}

#[actix_web::test]
async fn anonymous_commenting_bounces_to_login() {
    let harness = harness(10);
    let news_id = seed_news(&harness).await;
    let app = actix_test::init_service(test_app(&harness)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/news/{news_id}/comments"))
            .set_json(json!({ "text": "hello" }))
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
async fn banned_vocabulary_is_rejected() {
    let harness = harness(10);
    let news_id = seed_news(&harness).await;
    let app = actix_test::init_service(test_app(&harness)).await;
    let cookie = sign_up(&app, "reader").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/news/{news_id}/comments"))
            .cookie(cookie)
            .set_json(json!({ "text": "What a SCOUNDREL move." }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], COMMENT_WARNING);
    assert_eq!(body["details"]["field"], "text");
}

#[actix_web::test]
async fn only_the_author_may_edit_or_delete() {
    let harness = harness(10);
    let news_id = seed_news(&harness).await;
    let app = actix_test::init_service(test_app(&harness)).await;
    let author = sign_up(&app, "author").await;
    let other = sign_up(&app, "other").await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/news/{news_id}/comments"))
            .cookie(author.clone())
            .set_json(json!({ "text": "original" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let detail = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/news/{news_id}"))
            .to_request(),
    )
    .await;
    let body: Value = actix_test::read_body_json(detail).await;
    let comment_id = body["comments"][0]["id"].as_i64().expect("comment id");

    // A stranger sees 404, never 403.
    let forbidden = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/comments/{comment_id}"))
            .cookie(other.clone())
            .set_json(json!({ "text": "hijacked" }))
            .to_request(),
    )
    .await;
    assert_eq!(forbidden.status(), StatusCode::NOT_FOUND);

    let edited = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/comments/{comment_id}"))
            .cookie(author.clone())
            .set_json(json!({ "text": "revised" }))
            .to_request(),
    )
    .await;
    assert_eq!(edited.status(), StatusCode::FOUND);

    let masked_delete = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/comments/{comment_id}"))
            .cookie(other)
            .to_request(),
    )
    .await;
    assert_eq!(masked_delete.status(), StatusCode::NOT_FOUND);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/comments/{comment_id}"))
            .cookie(author)
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::FOUND);
    assert_eq!(location(&deleted), format!("/api/v1/news/{news_id}#comments"));
}

#[actix_web::test]
async fn logout_ends_the_session() {
    let harness = harness(10);
    let news_id = seed_news(&harness).await;
    let app = actix_test::init_service(test_app(&harness)).await;
    let cookie = sign_up(&app, "reader").await;

    let logout = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(logout.status(), StatusCode::NO_CONTENT);
    let cleared = common::session_cookie(&logout);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri(&format!("/api/v1/news/{news_id}/comments"))
            .cookie(cleared)
            .set_json(json!({ "text": "still here?" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(location(&response).starts_with("/api/v1/auth/login?next="));
}
