//! Account API handlers.
//!
//! ```text
//! POST /api/v1/auth/signup {"username":"reader","password":"a long password"}
//! POST /api/v1/auth/login  {"username":"reader","password":"a long password"}
//! GET  /api/v1/auth/login
//! POST /api/v1/auth/logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    Error, LoginCredentials, LoginValidationError, SignupDetails, SignupValidationError, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Signup request body for `POST /api/v1/auth/signup`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<SignupRequest> for SignupDetails {
    type Error = SignupValidationError;

    fn try_from(value: SignupRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Register an account and establish a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = User),
        (status = 400, description = "Invalid username or password", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "signup",
    security([])
)]
#[post("/auth/signup")]
pub async fn signup(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<SignupRequest>,
) -> ApiResult<HttpResponse> {
    let details =
        SignupDetails::try_from(payload.into_inner()).map_err(map_signup_validation_error)?;
    let user = state.accounts.signup(details).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Created().json(user))
}

fn map_signup_validation_error(err: SignupValidationError) -> Error {
    Error::field_validation(err.field(), err.to_string())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    session: SessionContext,
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.accounts.authenticate(credentials).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().json(user))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::field_validation(
            "username",
            "username must not be empty",
        ),
        LoginValidationError::EmptyPassword => Error::field_validation(
            "password",
            "password must not be empty",
        ),
    }
}

/// The login landing page anonymous callers are redirected to.
///
/// Always `200 OK`; the `next` query parameter is echoed back so clients can
/// resume after authenticating.
#[utoipa::path(
    get,
    path = "/api/v1/auth/login",
    responses((status = 200, description = "Login prompt")),
    tags = ["accounts"],
    operation_id = "loginPage",
    security([])
)]
#[get("/auth/login")]
pub async fn login_page(query: web::Query<LoginPageQuery>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "detail": "authenticate with POST /api/v1/auth/login",
        "next": query.next,
    }))
}

/// Query parameters accepted by the login landing page.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct LoginPageQuery {
    /// Path the caller originally asked for.
    pub next: Option<String>,
}

/// Drop the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Session ended")),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::{TestPorts, default_ports, test_session_middleware};
    use actix_web::http::StatusCode;
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

    #[actix_web::test]
    async fn signup_creates_an_account_and_a_session() {
        let ports = default_ports();
        let app = actix_test::init_service(test_app(&ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(&SignupRequest {
                    username: "reader".into(),
                    password: "a long password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(
            response
                .response()
                .cookies()
                .any(|cookie| cookie.name() == "session"),
            "signup should establish a session"
        );
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["username"], "reader");
    }

    #[actix_web::test]
    async fn signup_rejects_duplicate_usernames() {
        let ports = default_ports();
        let app = actix_test::init_service(test_app(&ports)).await;
        let payload = SignupRequest {
            username: "reader".into(),
            password: "a long password".into(),
        };

        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(&payload)
                .to_request(),
        )
        .await;
        assert_eq!(second.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(second).await;
        assert_eq!(body["details"]["field"], "username");
    }

    #[actix_web::test]
    async fn signup_rejects_short_passwords() {
        let ports = default_ports();
        let app = actix_test::init_service(test_app(&ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(&SignupRequest {
                    username: "reader".into(),
                    password: "short".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["details"]["field"], "password");
    }

    #[actix_web::test]
    async fn login_round_trip_succeeds_with_the_signup_password() {
        let ports = default_ports();
        let app = actix_test::init_service(test_app(&ports)).await;

        let signup_response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/signup")
                .set_json(&SignupRequest {
                    username: "reader".into(),
                    password: "a long password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(signup_response.status(), StatusCode::CREATED);

        let login_response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(&LoginRequest {
                    username: "reader".into(),
                    password: "a long password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(login_response.status(), StatusCode::OK);

        let wrong = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .set_json(&LoginRequest {
                    username: "reader".into(),
                    password: "a wrong password".into(),
                })
                .to_request(),
        )
        .await;
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn login_page_echoes_the_next_parameter() {
        let ports = default_ports();
        let app = actix_test::init_service(test_app(&ports)).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/auth/login?next=%2Fapi%2Fv1%2Fnotes")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["next"], "/api/v1/notes");
    }
}
