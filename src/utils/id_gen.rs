//! Human-facing identifiers: `STU-XXXXXXXX` for students, `PROF-XXXXXXXX` for professors.

use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use std::future::Future;

use crate::errors::{GradeSysError, Result};

pub const STUDENT_ID_PREFIX: &str = "STU-";
pub const PROFESSOR_CODE_PREFIX: &str = "PROF-";
const ID_BODY_LEN: usize = 8;
const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Attempts before giving up on a colliding generated id
pub const MAX_ID_ATTEMPTS: usize = 5;

static SCHOOL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^STU-[A-Z0-9]{8}$").expect("Invalid school id regex"));

static PROFESSOR_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PROF-[A-Z0-9]{8}$").expect("Invalid professor code regex"));

fn random_body() -> String {
    let mut rng = rand::rng();
    (0..ID_BODY_LEN)
        .map(|_| ID_CHARSET[rng.random_range(0..ID_CHARSET.len())] as char)
        .collect()
}

pub fn generate_school_id() -> String {
    format!("{STUDENT_ID_PREFIX}{}", random_body())
}

pub fn generate_professor_code() -> String {
    format!("{PROFESSOR_CODE_PREFIX}{}", random_body())
}

pub fn is_valid_school_id(id: &str) -> bool {
    SCHOOL_ID_RE.is_match(id)
}

pub fn is_valid_professor_code(code: &str) -> bool {
    PROFESSOR_CODE_RE.is_match(code)
}

/// Draws ids from `generate` until `exists` reports a free one.
///
/// Gives up with a conflict after [`MAX_ID_ATTEMPTS`] collisions.
pub async fn generate_unused<F, Fut>(generate: fn() -> String, mut exists: F) -> Result<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = generate();
        if !exists(candidate.clone()).await? {
            return Ok(candidate);
        }
        tracing::debug!("Generated id {} is taken, retrying", candidate);
    }
    Err(GradeSysError::conflict(format!(
        "Could not generate a free id after {MAX_ID_ATTEMPTS} attempts"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_match_their_patterns() {
        for _ in 0..200 {
            assert!(is_valid_school_id(&generate_school_id()));
            assert!(is_valid_professor_code(&generate_professor_code()));
        }
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(!is_valid_school_id("STU-abc12345"));
        assert!(!is_valid_school_id("STU-1234567"));
        assert!(!is_valid_school_id("2021-00123"));
        assert!(!is_valid_professor_code("PROF-1234567X9"));
        assert!(is_valid_professor_code("PROF-0000ABCD"));
    }

    #[tokio::test]
    async fn generation_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result = generate_unused(generate_school_id, |_| {
            calls += 1;
            async { Ok(true) }
        })
        .await;
        assert!(result.unwrap_err().is_conflict());
        assert_eq!(calls, MAX_ID_ATTEMPTS);
    }

    #[tokio::test]
    async fn generation_retries_past_collisions() {
        let mut calls = 0;
        let id = generate_unused(generate_professor_code, |_| {
            calls += 1;
            let taken = calls < 3;
            async move { Ok(taken) }
        })
        .await
        .unwrap();
        assert!(is_valid_professor_code(&id));
        assert_eq!(calls, 3);
    }
}
