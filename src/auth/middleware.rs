use actix_web::middleware::Next;
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    web::Data,
};
use serde_json::json;

use crate::auth::session::{SESSION_COOKIE, SessionStore};

/// Resolves the session cookie against the session store and stashes the
/// bound identity in request extensions. Requests without a live session
/// are rejected with a generic 401.
pub async fn auth_middleware(
    mut req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let sessions = req
        .app_data::<Data<SessionStore>>()
        .cloned()
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Session store missing"))?;

    let token = req.cookie(SESSION_COOKIE).map(|c| c.value().to_string());

    let user = match token {
        Some(token) => sessions.get(&token).await,
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.call(req).await
        }
        None => {
            let resp = HttpResponse::Unauthorized().json(json!({"message": "Unauthorized"}));
            Ok(req.into_response(resp.map_into_boxed_body()))
        }
    }
}
