use serde::{Deserialize, Serialize};

/// Local storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "token";
/// Local storage key holding the serialized [`StoredUser`].
pub const USER_STORAGE_KEY: &str = "user";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
    pub user: StoredUser,
}

/// The user JSON kept in local storage next to the token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(rename = "_id", alias = "id", alias = "userId", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl StoredUser {
    /// User id for mutations, `None` when it is blank.
    pub fn user_id(&self) -> Option<&str> {
        let id = self.id.trim();
        (!id.is_empty()).then_some(id)
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    Admin,
    /// Regional Service Head.
    Rsh,
    /// National Service Head.
    Nsh,
    #[default]
    User,
    Other(String),
}

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" | "superadmin" | "super admin" => Self::Admin,
            "rsh" | "regional service head" => Self::Rsh,
            "nsh" | "national service head" => Self::Nsh,
            "" | "user" => Self::User,
            _ => Self::Other(value),
        }
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Admin => "Admin".to_string(),
            UserRole::Rsh => "RSH".to_string(),
            UserRole::Nsh => "NSH".to_string(),
            UserRole::User => "User".to_string(),
            UserRole::Other(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_user_from_local_storage_json() {
        let json = r#"{"_id":"64f0c2","name":"Asha","email":"asha@example.com","role":"RSH"}"#;
        let user: StoredUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.user_id(), Some("64f0c2"));
        assert_eq!(user.role, UserRole::Rsh);
    }

    #[test]
    fn test_blank_user_id() {
        let user = StoredUser {
            id: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(user.user_id(), None);
    }

    #[test]
    fn test_unknown_role_kept() {
        let role = UserRole::from("Service Engineer".to_string());
        assert_eq!(role, UserRole::Other("Service Engineer".to_string()));
        assert_eq!(String::from(role), "Service Engineer");
    }
}
