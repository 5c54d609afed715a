use actix_web::{FromRequest, HttpMessage, HttpRequest, dev::Payload};
use futures::future::{Ready, ready};

use crate::auth::session::SessionUser;
use crate::errors::ApiError;

/// Authenticated caller, extracted from the identity the auth middleware
/// placed in request extensions.
pub struct AuthUser {
    pub user_id: u64,
    pub employee_id: String,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<SessionUser>() {
            Some(session) => ready(Ok(AuthUser {
                user_id: session.user_id,
                employee_id: session.employee_id.clone(),
            })),
            None => ready(Err(ApiError::Unauthorized.into())),
        }
    }
}
