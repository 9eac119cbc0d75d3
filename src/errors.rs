//! Unified error handling.
//!
//! Error variants are generated by a macro that attaches a stable code and a
//! human readable type name to each of them.

use std::fmt;

/// Generates the error enum.
///
/// For every `Variant("code", "type name")` this produces:
/// - the enum variant carrying a message
/// - `code()` returning the stable error code
/// - `error_type()` returning the type name
/// - `message()` returning the detail message
/// - a snake_case constructor, e.g. `GradeSysError::not_found("...")`
macro_rules! define_gradesys_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum GradeSysError {
            $($variant(String),)*
        }

        impl GradeSysError {
            pub fn code(&self) -> &'static str {
                match self {
                    $(GradeSysError::$variant(_) => $code,)*
                }
            }

            pub fn error_type(&self) -> &'static str {
                match self {
                    $(GradeSysError::$variant(_) => $type_name,)*
                }
            }

            pub fn message(&self) -> &str {
                match self {
                    $(GradeSysError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl GradeSysError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        GradeSysError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_gradesys_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    Conflict("E010", "Conflict Error"),
    DateParse("E011", "Date Parse Error"),
    Authentication("E012", "Authentication Error"),
    Authorization("E013", "Authorization Error"),
    ImportParse("E014", "Import Parse Error"),
    Mail("E015", "Mail Delivery Error"),
    Backup("E016", "Backup Error"),
}

impl GradeSysError {
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// Unique or foreign key violation reported by the storage layer.
    pub fn is_conflict(&self) -> bool {
        matches!(self, GradeSysError::Conflict(_))
    }
}

impl fmt::Display for GradeSysError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for GradeSysError {}

impl From<sea_orm::DbErr> for GradeSysError {
    fn from(err: sea_orm::DbErr) -> Self {
        GradeSysError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for GradeSysError {
    fn from(err: std::io::Error) -> Self {
        GradeSysError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for GradeSysError {
    fn from(err: serde_json::Error) -> Self {
        GradeSysError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for GradeSysError {
    fn from(err: chrono::ParseError) -> Self {
        GradeSysError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GradeSysError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GradeSysError::cache_connection("test").code(), "E001");
        assert_eq!(GradeSysError::database_config("test").code(), "E003");
        assert_eq!(GradeSysError::validation("test").code(), "E007");
        assert_eq!(GradeSysError::conflict("test").code(), "E010");
        assert_eq!(GradeSysError::import_parse("test").code(), "E014");
        assert_eq!(GradeSysError::backup("test").code(), "E016");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            GradeSysError::not_found("test").error_type(),
            "Resource Not Found"
        );
        assert_eq!(GradeSysError::mail("test").error_type(), "Mail Delivery Error");
    }

    #[test]
    fn test_conflict_detection() {
        assert!(GradeSysError::conflict("duplicate school id").is_conflict());
        assert!(!GradeSysError::validation("bad value").is_conflict());
    }

    #[test]
    fn test_format_simple() {
        let err = GradeSysError::validation("Invalid grade value");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid grade value"));
    }
}
