use crate::server::models::profile::Role;

/// Process-wide authentication state, re-derived on every login and logout.
/// Mirrors the page-load lifetime of the identity label and role flag in the
/// rendered header.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl SessionState {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Identity label shown in the header, with an admin marker suffix.
    pub fn display_label(&self) -> String {
        if self.is_admin() {
            format!("{} (admin)", self.email)
        } else {
            self.email.clone()
        }
    }
}
