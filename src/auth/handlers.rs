use actix_web::{HttpRequest, HttpResponse, Responder, cookie::Cookie, web};
use tracing::{debug, info, instrument};

use crate::{
    auth::session::{SESSION_COOKIE, SessionStore, SessionUser},
    errors::ApiError,
    models::{AuthCheckResponse, LoginReqDto, LoginResponse},
    store::KbStore,
};

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .finish()
}

/// Login with employee ID and password
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginReqDto,
    responses(
        (status = 200, description = "Logged in, session cookie set", body = LoginResponse),
        (status = 400, description = "Missing employee ID or password"),
        (status = 401, description = "Invalid employee ID or password")
    ),
    tag = "Auth"
)]
#[instrument(
    name = "auth_login",
    skip(body, store, sessions),
    fields(employee_id = %body.employee_id)
)]
pub async fn login(
    body: web::Json<LoginReqDto>,
    store: web::Data<KbStore>,
    sessions: web::Data<SessionStore>,
) -> Result<HttpResponse, ApiError> {
    info!("Login request received");

    let employee_id = body.employee_id.trim();
    if employee_id.is_empty() {
        return Err(ApiError::Validation("Employee ID is required".to_string()));
    }
    if body.password.is_empty() {
        return Err(ApiError::Validation("Password is required".to_string()));
    }

    debug!("Looking up user");

    // Plaintext comparison is a known, documented weakness of this portal;
    // do not switch to hashed comparison without a design decision.
    let user = match store.find_user_by_employee_id(employee_id) {
        Some(user) if user.password == body.password => user,
        _ => {
            info!("Invalid credentials");
            return Err(ApiError::InvalidCredentials);
        }
    };

    let token = sessions
        .create(SessionUser {
            user_id: user.id,
            employee_id: user.employee_id.clone(),
        })
        .await;

    info!("Login successful");

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(LoginResponse {
            employee_id: user.employee_id,
        }))
}

/// Destroys the caller's session, if any. Logging out without a session
/// (or with an expired one) still succeeds.
pub async fn logout(req: HttpRequest, sessions: web::Data<SessionStore>) -> impl Responder {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.destroy(cookie.value()).await;
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::Ok()
        .cookie(removal)
        .json(serde_json::json!({ "message": "Logged out successfully" }))
}

/// Always 200; the body says whether the caller holds a live session.
pub async fn auth_check(req: HttpRequest, sessions: web::Data<SessionStore>) -> impl Responder {
    let user = match req.cookie(SESSION_COOKIE) {
        Some(cookie) => sessions.get(cookie.value()).await,
        None => None,
    };

    match user {
        Some(user) => HttpResponse::Ok().json(AuthCheckResponse {
            is_authenticated: true,
            employee_id: Some(user.employee_id),
        }),
        None => HttpResponse::Ok().json(AuthCheckResponse {
            is_authenticated: false,
            employee_id: None,
        }),
    }
}
