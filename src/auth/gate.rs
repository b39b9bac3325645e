use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use uuid::Uuid;

use crate::auth::token::{TokenCodec, TokenError};
use crate::error::AppError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pulls the raw token out of an `Authorization: Bearer <token>` header.
///
/// Header-name lookup is case-insensitive; the `Bearer ` prefix is matched literally.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing credentials: no Authorization header".into()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("missing credentials: non-ASCII Authorization header".into()))?;

    value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| AppError::Unauthorized("missing credentials: not a Bearer header".into()))
}

/// Resolves the request's subject id, or rejects it.
///
/// Every failure becomes `AppError::Unauthorized`, including a missing secret, so the client
/// cannot tell an expired token from a server misconfiguration. The real cause is logged.
pub fn authenticate(headers: &HeaderMap, codec: &TokenCodec) -> Result<Uuid, AppError> {
    let token = bearer_token(headers).map_err(|err| {
        log::debug!("{}", err);
        err
    })?;

    match codec.verify(token) {
        Ok(claims) => Ok(claims.id),
        Err(TokenError::MissingSecret) => {
            log::error!("Rejecting bearer token: TOKEN_SECRET is not configured");
            Err(AppError::Unauthorized("token secret not configured".into()))
        }
        Err(TokenError::InvalidToken(reason)) => {
            log::debug!("Rejecting bearer token: {}", reason);
            Err(AppError::Unauthorized(reason))
        }
    }
}
