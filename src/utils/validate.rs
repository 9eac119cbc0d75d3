use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.len() < 5 || username.len() > 16 {
        return Err("Username length must be between 5 and 16 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

static PROGRAM_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9-]{2,20}$").expect("Invalid program code regex"));

static SCHOOL_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid school year regex"));

/// Uppercases and checks a program code such as `BSIT` or `BS-CS`
pub fn normalize_program_code(code: &str) -> Result<String, &'static str> {
    let code = code.trim().to_uppercase();
    if !PROGRAM_CODE_RE.is_match(&code) {
        return Err("Program code must be 2-20 characters of letters, digits or hyphens");
    }
    Ok(code)
}

/// Parses `YYYY-YYYY` into `(start, end)`, requiring `end = start + 1`
pub fn parse_school_year(name: &str) -> Result<(i32, i32), &'static str> {
    let caps = SCHOOL_YEAR_RE
        .captures(name.trim())
        .ok_or("School year must look like 2024-2025")?;
    let start: i32 = caps[1].parse().map_err(|_| "Invalid start year")?;
    let end: i32 = caps[2].parse().map_err(|_| "Invalid end year")?;
    if end != start + 1 {
        return Err("School year must span exactly one year, e.g. 2024-2025");
    }
    Ok((start, end))
}

/// Subject codes are uppercased; inner whitespace collapses to one space
pub fn normalize_subject_code(code: &str) -> Result<String, &'static str> {
    let code = code.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
    if code.is_empty() || code.len() > 20 {
        return Err("Subject code must be 1-20 characters");
    }
    Ok(code)
}

pub fn validate_units(units: f64) -> Result<(), &'static str> {
    if !(units > 0.0 && units <= 10.0) {
        return Err("Units must be greater than 0 and at most 10");
    }
    Ok(())
}

/// Required person name part: trimmed, non-empty, at most 100 characters
pub fn validate_name_part(value: &str, field: &'static str) -> Result<String, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{field} is required"));
    }
    if value.chars().count() > 100 {
        return Err(format!("{field} must be at most 100 characters"));
    }
    Ok(value.to_string())
}

/// Blank optional text becomes `None`
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Password policy: at least 8 characters with upper case, lower case and a digit,
/// and not one of the well-known weak passwords.
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
    #[test]
    fn test_program_code() {
        assert_eq!(normalize_program_code(" bsit ").unwrap(), "BSIT");
        assert_eq!(normalize_program_code("bs-cs").unwrap(), "BS-CS");
        assert!(normalize_program_code("B").is_err());
        assert!(normalize_program_code("BS IT").is_err());
    }

    #[test]
    fn test_school_year() {
        assert_eq!(parse_school_year("2024-2025"), Ok((2024, 2025)));
        assert!(parse_school_year("2024-2026").is_err());
        assert!(parse_school_year("2025-2024").is_err());
        assert!(parse_school_year("24-25").is_err());
    }

    #[test]
    fn test_subject_code_and_units() {
        assert_eq!(normalize_subject_code(" it  101 ").unwrap(), "IT 101");
        assert!(normalize_subject_code("   ").is_err());
        assert!(validate_units(3.0).is_ok());
        assert!(validate_units(0.0).is_err());
        assert!(validate_units(10.5).is_err());
    }

    #[test]
    fn test_name_parts() {
        assert_eq!(validate_name_part("  Ana ", "first_name").unwrap(), "Ana");
        assert!(validate_name_part("", "last_name").is_err());
        assert_eq!(non_blank(Some("  ".into())), None);
        assert_eq!(non_blank(Some(" Jr. ".into())), Some("Jr.".into()));
    }

    #[test]
    fn test_username_and_email() {
        assert!(validate_username("registrar").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_email("encoder@school.edu").is_ok());
        assert!(validate_email("encoder@school").is_err());
    }
}
