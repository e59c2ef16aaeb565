use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::core::{AppError, Principal, Result, Role};

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_ROLE_HEADER: &str = "X-User-Role";
pub const BUSINESS_ID_HEADER: &str = "X-Business-Id";

/// Principal extractor.
///
/// Token verification happens upstream. The identity layer either inserts a
/// [`Principal`] into the request extensions or forwards the resolved
/// identity in the trusted `X-User-*` headers.
impl FromRequest for Principal {
    type Error = AppError;
    type Future = Ready<Result<Self>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(principal) = req.extensions().get::<Principal>() {
            return ready(Ok(principal.clone()));
        }
        ready(principal_from_headers(req))
    }
}

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn principal_from_headers(req: &HttpRequest) -> Result<Principal> {
    let user_id = header(req, USER_ID_HEADER)
        .ok_or_else(|| AppError::unauthorized(format!("Missing {} header", USER_ID_HEADER)))?;

    // Accounts without a profile default to the least privileged role
    let role = match header(req, USER_ROLE_HEADER) {
        Some(role) => role.parse::<Role>()?,
        None => Role::Manager,
    };

    let business_id = header(req, BUSINESS_ID_HEADER)
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                AppError::unauthorized(format!("Invalid {} header", BUSINESS_ID_HEADER))
            })
        })
        .transpose()?;

    Ok(Principal::new(user_id, role, business_id))
}
