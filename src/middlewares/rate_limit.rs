/*!
 * Fixed-window request limiting for the public authentication endpoints.
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 *
 * Requests are counted per client IP (or per user once authenticated) and per
 * key prefix. Exceeding the limit answers 429 with `Retry-After`.
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
    http::header::CONTENT_TYPE,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// Longest window any preset uses; entries older than this are useless
const MAX_WINDOW_SECS: u64 = 300;

/// `prefix:identifier` -> counter of the current window
static WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_live(Duration::from_secs(MAX_WINDOW_SECS))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone, Copy, Debug)]
struct Window {
    opened: Instant,
    hits: u32,
}

/// Counts one request against `current`.
///
/// Returns the window to store, or the seconds left until it reopens when the
/// request has to be refused.
fn admit(
    current: Option<Window>,
    now: Instant,
    max_requests: u32,
    window: Duration,
) -> Result<Window, u64> {
    match current {
        Some(w) if now.duration_since(w.opened) < window => {
            if w.hits >= max_requests {
                let left = window.saturating_sub(now.duration_since(w.opened));
                Err(left.as_secs().max(1))
            } else {
                Ok(Window { hits: w.hits + 1, ..w })
            }
        }
        _ => Ok(Window { opened: now, hits: 1 }),
    }
}

fn bucket_key(prefix: &str, user_id: Option<i64>, client_ip: impl FnOnce() -> String) -> String {
    let who = match user_id {
        Some(id) => format!("user:{id}"),
        None => format!("ip:{}", client_ip()),
    };
    if prefix.is_empty() { who } else { format!("{prefix}:{who}") }
}

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    key_prefix: &'static str,
}

impl RateLimit {
    pub const fn new(key_prefix: &'static str, max_requests: u32, window_secs: u64) -> Self {
        let window_secs = if window_secs > MAX_WINDOW_SECS { MAX_WINDOW_SECS } else { window_secs };
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            key_prefix,
        }
    }

    /// 5 per minute per IP
    pub const fn login() -> Self {
        Self::new("login", 5, 60)
    }

    /// 10 per minute per IP
    pub const fn refresh_token() -> Self {
        Self::new("refresh", 10, 60)
    }

    /// 3 per minute per IP, shared by the forgot and reset endpoints
    pub const fn password_reset() -> Self {
        Self::new("password_reset", 3, 60)
    }
}

/// Client address, preferring the connection info over forwarding headers
fn extract_client_ip(req: &ServiceRequest) -> String {
    let connection_ip = req
        .connection_info()
        .realip_remote_addr()
        .map(|s| s.to_string());

    if let Some(ref ip) = connection_ip
        && is_valid_ip(ip)
    {
        return ip.clone();
    }

    if let Some(forwarded) = req.headers().get("X-Forwarded-For")
        && let Ok(value) = forwarded.to_str()
        && let Some(ip) = value.split(',').next()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP")
        && let Ok(ip) = real_ip.to_str()
    {
        let ip = ip.trim();
        if is_valid_ip(ip) {
            return ip.to_string();
        }
    }

    connection_ip.unwrap_or_else(|| "unknown".to_string())
}

fn is_valid_ip(ip: &str) -> bool {
    ip.parse::<std::net::IpAddr>().is_ok()
}

fn extract_user_id(req: &ServiceRequest) -> Option<i64> {
    use crate::models::users::entities::User;
    req.extensions().get::<User>().map(|user| user.id)
}

fn create_rate_limit_response(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
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
        let limit = self.limit.clone();

        Box::pin(async move {
            let key = bucket_key(limit.key_prefix, extract_user_id(&req), || {
                extract_client_ip(&req)
            });

            let current = WINDOWS.get(&key).await;
            match admit(current, Instant::now(), limit.max_requests, limit.window) {
                Ok(window) => WINDOWS.insert(key, window).await,
                Err(retry_after) => {
                    warn!(key = %key, max = limit.max_requests, "Rate limit exceeded");
                    return Ok(req.into_response(
                        create_rate_limit_response(retry_after).map_into_right_body(),
                    ));
                }
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let login = RateLimit::login();
        assert_eq!((login.key_prefix, login.max_requests), ("login", 5));
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(RateLimit::password_reset().max_requests, 3);
        assert_eq!(RateLimit::refresh_token().max_requests, 10);
        assert_eq!(RateLimit::new("x", 1, 3600).window, Duration::from_secs(MAX_WINDOW_SECS));
    }

    #[test]
    fn window_fills_then_refuses_then_reopens() {
        let window = Duration::from_secs(60);
        let t0 = Instant::now();

        let mut current = None;
        for expected in 1..=3 {
            let w = admit(current, t0, 3, window).unwrap();
            assert_eq!(w.hits, expected);
            current = Some(w);
        }

        let retry = admit(current, t0 + Duration::from_secs(20), 3, window).unwrap_err();
        assert_eq!(retry, 40);

        let reopened = admit(current, t0 + Duration::from_secs(61), 3, window).unwrap();
        assert_eq!(reopened.hits, 1);
    }

    #[test]
    fn keys_prefer_the_authenticated_user() {
        assert_eq!(bucket_key("login", Some(7), || unreachable!()), "login:user:7");
        assert_eq!(bucket_key("login", None, || "10.0.0.1".into()), "login:ip:10.0.0.1");
        assert_eq!(bucket_key("", None, || "::1".into()), "ip:::1");
    }

    #[test]
    fn forwarded_garbage_is_not_an_ip() {
        assert!(is_valid_ip("10.0.0.1"));
        assert!(is_valid_ip("::1"));
        assert!(!is_valid_ip("10.0.0.1, evil"));
    }
}
