//! Access and refresh tokens.
//!
//! Both are HS256 JWTs signed with `jwt.secret`; they differ only in the `typ`
//! claim and lifetime. The refresh token travels in an HttpOnly cookie.

use actix_web::cookie::{Cookie, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::users::entities::UserRole;

const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub role: UserRole,
    #[serde(rename = "typ")]
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

#[derive(Debug)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the refresh token, also used for its cookie
    pub refresh_lifetime: Duration,
}

pub struct JwtUtils;

impl JwtUtils {
    fn secret() -> &'static str {
        &AppConfig::get().jwt.secret
    }

    pub fn sign(
        user_id: i64,
        role: UserRole,
        kind: TokenKind,
        lifetime: Duration,
        secret: &str,
    ) -> Result<String, Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            role,
            kind,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Validates signature and expiry, then rejects tokens of the other kind
    pub fn verify(token: &str, expected: TokenKind, secret: &str) -> Result<Claims, Error> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?
        .claims;

        if claims.kind != expected {
            return Err(Error::from(ErrorKind::InvalidToken));
        }
        Ok(claims)
    }

    pub fn generate_access_token(user_id: i64, role: UserRole) -> Result<String, Error> {
        let minutes = AppConfig::get().jwt.access_token_expiry;
        Self::sign(
            user_id,
            role,
            TokenKind::Access,
            Duration::minutes(minutes),
            Self::secret(),
        )
    }

    /// `refresh_lifetime` overrides the configured refresh token lifetime (remember me)
    pub fn generate_token_pair(
        user_id: i64,
        role: UserRole,
        refresh_lifetime: Option<Duration>,
    ) -> Result<TokenPair, Error> {
        let refresh_lifetime = refresh_lifetime
            .unwrap_or_else(|| Duration::days(AppConfig::get().jwt.refresh_token_expiry));

        Ok(TokenPair {
            access_token: Self::generate_access_token(user_id, role)?,
            refresh_token: Self::sign(
                user_id,
                role,
                TokenKind::Refresh,
                refresh_lifetime,
                Self::secret(),
            )?,
            refresh_lifetime,
        })
    }

    pub fn verify_access_token(token: &str) -> Result<Claims, Error> {
        Self::verify(token, TokenKind::Access, Self::secret())
    }

    pub fn verify_refresh_token(token: &str) -> Result<Claims, Error> {
        Self::verify(token, TokenKind::Refresh, Self::secret())
    }

    fn refresh_cookie(value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build(REFRESH_COOKIE, value)
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(
                max_age.num_seconds(),
            ))
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(AppConfig::get().is_production())
            .finish()
    }

    /// `Secure` in production
    pub fn create_refresh_token_cookie(refresh_token: &str, lifetime: Duration) -> Cookie<'static> {
        Self::refresh_cookie(refresh_token.to_string(), lifetime)
    }

    /// Expired cookie that clears the refresh token
    pub fn create_empty_refresh_token_cookie() -> Cookie<'static> {
        Self::refresh_cookie(String::new(), Duration::zero())
    }

    pub fn extract_refresh_token_from_cookie(req: &actix_web::HttpRequest) -> Option<String> {
        req.cookie(REFRESH_COOKIE)
            .map(|cookie| cookie.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-with-enough-length";

    #[test]
    fn tokens_carry_user_role_and_kind() {
        let token = JwtUtils::sign(
            42,
            UserRole::Encoder,
            TokenKind::Access,
            Duration::minutes(5),
            SECRET,
        )
        .unwrap();
        let claims = JwtUtils::verify(&token, TokenKind::Access, SECRET).unwrap();
        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, UserRole::Encoder);
        assert_eq!(claims.kind, TokenKind::Access);
    }

    #[test]
    fn refresh_tokens_are_not_access_tokens() {
        let token = JwtUtils::sign(
            1,
            UserRole::Admin,
            TokenKind::Refresh,
            Duration::days(1),
            SECRET,
        )
        .unwrap();
        assert!(JwtUtils::verify(&token, TokenKind::Access, SECRET).is_err());
        assert!(JwtUtils::verify(&token, TokenKind::Refresh, SECRET).is_ok());
    }

    #[test]
    fn expired_and_foreign_tokens_are_rejected() {
        let expired = JwtUtils::sign(
            1,
            UserRole::Staff,
            TokenKind::Access,
            Duration::minutes(-10),
            SECRET,
        )
        .unwrap();
        assert!(JwtUtils::verify(&expired, TokenKind::Access, SECRET).is_err());

        let foreign = JwtUtils::sign(
            1,
            UserRole::Staff,
            TokenKind::Access,
            Duration::minutes(5),
            "another-secret-entirely",
        )
        .unwrap();
        assert!(JwtUtils::verify(&foreign, TokenKind::Access, SECRET).is_err());
    }
}
