use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Account role
///
/// - `Admin`: everything, including users and system maintenance
/// - `Encoder`: encodes grades, manages students, subjects and professors
/// - `Staff`: read-only access plus printing and exports
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserRole {
    Admin,
    Encoder,
    Staff,
}

impl UserRole {
    pub const ADMIN: &'static str = "admin";
    pub const ENCODER: &'static str = "encoder";
    pub const STAFF: &'static str = "staff";

    pub fn admin_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin]
    }
    pub fn encoder_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Encoder]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Admin, &Self::Encoder, &Self::Staff]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid user role: '{s}'. Supported roles: admin, encoder, staff"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
            UserRole::Encoder => write!(f, "{}", UserRole::ENCODER),
            UserRole::Staff => write!(f, "{}", UserRole::STAFF),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::ADMIN => Ok(UserRole::Admin),
            UserRole::ENCODER => Ok(UserRole::Encoder),
            UserRole::STAFF => Ok(UserRole::Staff),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "user.ts")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl<'de> Deserialize<'de> for UserStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid user status: '{s}'. Supported: active, inactive, suspended"
            ))
        })
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Active => write!(f, "active"),
            UserStatus::Inactive => write!(f, "inactive"),
            UserStatus::Suspended => write!(f, "suspended"),
        }
    }
}

impl std::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(format!("Invalid user status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "user.ts")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    /// Display name, falling back to the username when no name is on file
    pub fn full_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if parts.is_empty() {
            self.username.clone()
        } else {
            parts.join(" ")
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> crate::errors::Result<crate::utils::jwt::TokenPair> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, self.role, refresh_token_expiry)
        .map_err(|e| {
            crate::errors::GradeSysError::authentication(format!("token generation failed: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 7,
            username: "registrar".to_string(),
            email: "registrar@school.edu".to_string(),
            password_hash: String::new(),
            role: UserRole::Encoder,
            status: UserStatus::Active,
            first_name: None,
            last_name: None,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn role_round_trips_through_strings() {
        for role in UserRole::all_roles() {
            let parsed: UserRole = role.to_string().parse().unwrap();
            assert_eq!(&parsed, *role);
        }
        assert!("professor".parse::<UserRole>().is_err());
    }

    #[test]
    fn role_deserialization_rejects_unknown_values() {
        let role: UserRole = serde_json::from_str(r#""staff""#).unwrap();
        assert_eq!(role, UserRole::Staff);
        assert!(serde_json::from_str::<UserRole>(r#""root""#).is_err());
    }

    #[test]
    fn full_name_falls_back_to_username() {
        let mut user = sample_user();
        assert_eq!(user.full_name(), "registrar");
        user.first_name = Some("Maria".to_string());
        user.last_name = Some("Santos".to_string());
        assert_eq!(user.full_name(), "Maria Santos");
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let mut user = sample_user();
        user.password_hash = "$argon2id$secret".to_string();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
    }
}
