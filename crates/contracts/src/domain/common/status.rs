use serde::{Deserialize, Serialize};
use std::fmt;

/// Active/Inactive flag on master data records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityStatus {
    #[default]
    Active,
    Inactive,
    Other(String),
}

impl EntityStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Other(s) => s,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<String> for EntityStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" | "true" | "1" => Self::Active,
            "inactive" | "false" | "0" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<EntityStatus> for String {
    fn from(status: EntityStatus) -> Self {
        status.label().to_string()
    }
}

impl fmt::Display for EntityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reference to a user: either a bare id or a populated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        email: String,
    },
}

impl UserRef {
    pub fn display(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Populated { name, email, id } => {
                if !name.is_empty() {
                    name
                } else if !email.is_empty() {
                    email
                } else {
                    id
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditStamps {
    #[serde(alias = "createdat")]
    pub created_at: Option<String>,
    #[serde(alias = "modifiedAt", alias = "modifiedat")]
    pub updated_at: Option<String>,
    pub modified_by: Option<UserRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_status_parsing() {
        assert_eq!(EntityStatus::from("ACTIVE".to_string()), EntityStatus::Active);
        assert_eq!(EntityStatus::from("Inactive".to_string()), EntityStatus::Inactive);
        assert_eq!(
            EntityStatus::from("Blocked".to_string()).label(),
            "Blocked"
        );
    }

    #[test]
    fn test_user_ref_variants() {
        let id: UserRef = serde_json::from_str(r#""64aa""#).unwrap();
        assert_eq!(id.display(), "64aa");

        let populated: UserRef =
            serde_json::from_str(r#"{"_id":"64aa","name":"R. Mehta"}"#).unwrap();
        assert_eq!(populated.display(), "R. Mehta");
    }
}
