use serde::{Deserialize, Serialize};

/// Resolved from the `profiles` table after sign-in. Anything other than an
/// explicit `admin` row resolves to `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl Role {
    pub fn from_str_or_default(value: &str) -> Self {
        match value {
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub role: Option<String>,
}
