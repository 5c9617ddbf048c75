//! User types
//!
//! `UserInfo` is what the "current user" endpoint returns. It is cached in
//! the session for display and never used for authorization decisions.

use serde::{Deserialize, Serialize};

use crate::errors::{PortalError, Result};

/// Profile of the signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default, alias = "fullname")]
    pub full_name: Option<String>,
    /// Role claim as issued by the server (`ADMIN`, `ROLE_STAFF`, `LECTURER`...)
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl UserInfo {
    /// Display name, falling back to the username
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().filter(|name| !name.trim().is_empty()).unwrap_or(&self.username)
    }

    /// Case-insensitive role check that tolerates the `ROLE_` prefix
    pub fn has_role(&self, role: &str) -> bool {
        self.role.as_deref().is_some_and(|claim| {
            let claim = claim.strip_prefix("ROLE_").unwrap_or(claim);
            let wanted = role.strip_prefix("ROLE_").unwrap_or(role);
            claim.eq_ignore_ascii_case(wanted)
        })
    }
}

/// Self-registration or admin user creation payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl RegisterRequest {
    /// Client-side checks the registration form performs before submitting
    ///
    /// # Errors
    /// Returns `PortalError::InvalidInput` naming the first failing field.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().len() < 3 {
            return Err(PortalError::InvalidInput(
                "username must be at least 3 characters".into(),
            ));
        }
        if self.password.len() < 6 {
            return Err(PortalError::InvalidInput(
                "password must be at least 6 characters".into(),
            ));
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !well_formed {
            return Err(PortalError::InvalidInput("email must be valid".into()));
        }
        Ok(())
    }
}

/// Registration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
}

/// A file attached to a multipart request
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Profile edit submitted as multipart form data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub fullname: Option<String>,
    pub gender: Option<String>,
    /// Year of birth as `dd/MM/yyyy`, the format the backend parses
    pub yob: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub avatar: Option<UploadFile>,
}

impl ProfileUpdate {
    /// Text fields that are set, in submission order
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("fullname", &self.fullname),
            ("gender", &self.gender),
            ("yob", &self.yob),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name, v)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Option<&str>) -> UserInfo {
        UserInfo {
            id: 1,
            username: "alice".into(),
            full_name: Some("Alice Nguyen".into()),
            role: role.map(String::from),
            avatar: None,
            email: None,
            phone: None,
            gender: None,
            address: None,
        }
    }

    #[test]
    fn accepts_backend_fullname_spelling() {
        let info: UserInfo = serde_json::from_str(
            r#"{"id": 3, "username": "bob", "fullname": "Bob", "role": "ADMIN"}"#,
        )
        .unwrap();
        assert_eq!(info.full_name.as_deref(), Some("Bob"));
        assert_eq!(info.display_name(), "Bob");
    }

    #[test]
    fn role_check_ignores_prefix_and_case() {
        assert!(user(Some("ROLE_STAFF")).has_role("staff"));
        assert!(user(Some("admin")).has_role("ROLE_ADMIN"));
        assert!(!user(Some("LECTURER")).has_role("ADMIN"));
        assert!(!user(None).has_role("ADMIN"));
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let mut info = user(None);
        info.full_name = Some("  ".into());
        assert_eq!(info.display_name(), "alice");
    }

    #[test]
    fn register_validation_reports_first_problem() {
        let mut request = RegisterRequest {
            username: "al".into(),
            password: "secret1".into(),
            email: "alice@example.com".into(),
            fullname: None,
            phone: None,
        };
        assert!(matches!(request.validate(), Err(PortalError::InvalidInput(m)) if m.contains("username")));

        request.username = "alice".into();
        request.email = "not-an-email".into();
        assert!(matches!(request.validate(), Err(PortalError::InvalidInput(m)) if m.contains("email")));

        request.email = "alice@example.com".into();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn profile_update_lists_only_set_fields() {
        let update = ProfileUpdate {
            fullname: Some("Alice".into()),
            phone: Some("0912345678".into()),
            ..Default::default()
        };
        assert_eq!(
            update.text_fields(),
            vec![("fullname", "Alice".to_string()), ("phone", "0912345678".to_string())]
        );
    }
}
