//! Pending password-reset codes kept in the object cache.

use serde::{Deserialize, Serialize};

use crate::cache::{CacheResult, ObjectCache};
use crate::config::OtpConfig;
use crate::utils::random_code::generate_numeric_code;

#[derive(Debug, Serialize, Deserialize)]
struct PendingOtp {
    code: String,
    attempts: u32,
    expires_at: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    Invalid,
    /// Nothing pending: never issued, used up or past its TTL
    Expired,
}

fn otp_key(email: &str) -> String {
    format!("otp:{}", email.trim().to_lowercase())
}

/// Issues a fresh code for `email`, replacing any pending one
pub async fn issue(cache: &dyn ObjectCache, email: &str, config: &OtpConfig, now: i64) -> String {
    let code = generate_numeric_code(config.length);
    let pending = PendingOtp {
        code: code.clone(),
        attempts: 0,
        expires_at: now + config.ttl_secs,
    };
    store(cache, email, &pending, config.ttl_secs).await;
    code
}

async fn store(cache: &dyn ObjectCache, email: &str, pending: &PendingOtp, ttl_secs: i64) {
    match serde_json::to_string(pending) {
        Ok(value) => {
            cache
                .insert_raw(otp_key(email), value, ttl_secs.max(1) as u64)
                .await
        }
        Err(e) => tracing::error!("Failed to serialize OTP entry: {}", e),
    }
}

/// Checks `code` against the pending entry.
///
/// A match consumes the entry. A miss counts as an attempt and the entry is dropped once
/// `max_attempts` misses have been made.
pub async fn check(
    cache: &dyn ObjectCache,
    email: &str,
    code: &str,
    config: &OtpConfig,
    now: i64,
) -> OtpCheck {
    let key = otp_key(email);
    let raw = match cache.get_raw(&key).await {
        CacheResult::Found(raw) => raw,
        CacheResult::NotFound | CacheResult::ExistsButNoValue => return OtpCheck::Expired,
    };

    let mut pending: PendingOtp = match serde_json::from_str(&raw) {
        Ok(pending) => pending,
        Err(_) => {
            cache.remove(&key).await;
            return OtpCheck::Expired;
        }
    };

    if now >= pending.expires_at {
        cache.remove(&key).await;
        return OtpCheck::Expired;
    }

    if pending.code == code.trim() {
        cache.remove(&key).await;
        return OtpCheck::Valid;
    }

    pending.attempts += 1;
    if pending.attempts >= config.max_attempts {
        cache.remove(&key).await;
    } else {
        store(cache, email, &pending, pending.expires_at - now).await;
    }
    OtpCheck::Invalid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;

    fn config() -> OtpConfig {
        OtpConfig {
            length: 6,
            ttl_secs: 300,
            max_attempts: 3,
        }
    }

    #[tokio::test]
    async fn a_code_works_once() {
        let cache = MokaCacheWrapper::with_capacity(100, 300);
        let code = issue(&cache, "Reg@School.edu", &config(), 1_000).await;
        assert_eq!(code.len(), 6);

        assert_eq!(
            check(&cache, "reg@school.edu", &code, &config(), 1_010).await,
            OtpCheck::Valid
        );
        assert_eq!(
            check(&cache, "reg@school.edu", &code, &config(), 1_020).await,
            OtpCheck::Expired
        );
    }

    #[tokio::test]
    async fn wrong_codes_burn_the_entry_after_max_attempts() {
        let cache = MokaCacheWrapper::with_capacity(100, 300);
        let code = issue(&cache, "reg@school.edu", &config(), 1_000).await;
        let wrong = if code == "000000" { "111111" } else { "000000" };

        for _ in 0..2 {
            assert_eq!(
                check(&cache, "reg@school.edu", wrong, &config(), 1_001).await,
                OtpCheck::Invalid
            );
        }
        assert_eq!(
            check(&cache, "reg@school.edu", wrong, &config(), 1_002).await,
            OtpCheck::Invalid
        );
        assert_eq!(
            check(&cache, "reg@school.edu", &code, &config(), 1_003).await,
            OtpCheck::Expired
        );
    }

    #[tokio::test]
    async fn codes_past_their_ttl_are_expired() {
        let cache = MokaCacheWrapper::with_capacity(100, 3_600);
        let code = issue(&cache, "reg@school.edu", &config(), 1_000).await;
        assert_eq!(
            check(&cache, "reg@school.edu", &code, &config(), 1_300).await,
            OtpCheck::Expired
        );
    }

    #[tokio::test]
    async fn reissuing_replaces_the_pending_code() {
        let cache = MokaCacheWrapper::with_capacity(100, 300);
        let first = issue(&cache, "reg@school.edu", &config(), 1_000).await;
        let second = issue(&cache, "reg@school.edu", &config(), 1_001).await;
        if first != second {
            assert_eq!(
                check(&cache, "reg@school.edu", &first, &config(), 1_002).await,
                OtpCheck::Invalid
            );
        }
        assert_eq!(
            check(&cache, "reg@school.edu", &second, &config(), 1_003).await,
            OtpCheck::Valid
        );
    }
}
