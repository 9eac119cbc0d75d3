/*!
 * Bearer token authentication.
 *
 * Wrap a scope with `RequireJWT` to demand `Authorization: Bearer <access token>`.
 * On success the authenticated [`User`](crate::models::users::entities::User) is put
 * into the request extensions, where handlers read it through
 * [`RequireJWT::extract_user_claims`] or [`RequireJWT::extract_user_id`].
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students))
 * ```
 *
 * Users are cached per token for `cache.default_ttl` seconds, so a status change
 * takes effect for existing tokens once the entry expires or is removed on logout.
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities;
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::{AUTHORIZATION, HeaderMap},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

/// Why a request was refused; the text ends up in the 401 body
#[derive(Debug, PartialEq, Eq)]
enum AuthFailure {
    MissingToken,
    InvalidToken,
    NotConfigured(&'static str),
    StorageUnavailable,
    UnknownUser,
    Inactive,
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthFailure::MissingToken => f.write_str("Missing or invalid Authorization header"),
            AuthFailure::InvalidToken => f.write_str("Invalid or expired access token"),
            AuthFailure::NotConfigured(what) => write!(f, "{what} is not configured"),
            AuthFailure::StorageUnavailable => f.write_str("Failed to load the account"),
            AuthFailure::UnknownUser => f.write_str("Account no longer exists"),
            AuthFailure::Inactive => f.write_str("Account is not active"),
        }
    }
}

/// Cache key of the user behind an access token
pub(crate) fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn app_data<T: ?Sized + 'static>(
    req: &ServiceRequest,
    what: &'static str,
) -> Result<Arc<T>, AuthFailure> {
    req.app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or(AuthFailure::NotConfigured(what))
}

async fn authenticate(req: &ServiceRequest) -> Result<entities::User, AuthFailure> {
    let token = bearer_token(req.headers()).ok_or(AuthFailure::MissingToken)?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        debug!("Access token rejected: {}", err);
        AuthFailure::InvalidToken
    })?;

    let cache = app_data::<dyn ObjectCache>(req, "Cache")?;
    let cache_key = user_cache_key(token);
    if let CacheResult::Found(json) = cache.get_raw(&cache_key).await {
        match serde_json::from_str::<entities::User>(&json) {
            Ok(user) => return Ok(user),
            Err(_) => cache.remove(&cache_key).await,
        }
    }

    let storage = app_data::<dyn Storage>(req, "Storage")?;
    let user_id = claims.user_id().ok_or(AuthFailure::InvalidToken)?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Loading user {} for authentication failed: {}", user_id, e);
            AuthFailure::StorageUnavailable
        })?
        .ok_or(AuthFailure::UnknownUser)?;

    if !user.is_active() {
        return Err(AuthFailure::Inactive);
    }

    if let Ok(json) = serde_json::to_string(&user) {
        cache
            .insert_raw(cache_key, json, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // CORS preflight
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(err) => {
                    info!(path = req.path(), "Request refused: {}", err);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            &format!("Unauthorized: {err}"),
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// The authenticated user; only set behind this middleware
    pub fn extract_user_claims(req: &actix_web::HttpRequest) -> Option<entities::User> {
        req.extensions().get::<entities::User>().cloned()
    }

    pub fn extract_user_id(req: &actix_web::HttpRequest) -> Option<i64> {
        req.extensions().get::<entities::User>().map(|user| user.id)
    }

    /// Raw bearer token of the request, if any
    pub fn extract_token(req: &actix_web::HttpRequest) -> Option<String> {
        bearer_token(req.headers()).map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::header::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("Bearer   ")), None);
        assert_eq!(bearer_token(&headers("Basic dXNlcg==")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn failure_messages() {
        assert_eq!(
            AuthFailure::NotConfigured("Cache").to_string(),
            "Cache is not configured"
        );
        assert_eq!(AuthFailure::Inactive.to_string(), "Account is not active");
    }
}
