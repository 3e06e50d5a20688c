//! Registration request DTOs

use serde::Deserialize;

use crate::models::RegistrationRequest;

/// User registration request.
///
/// Absent fields decode as empty strings so they are reported as validation
/// issues instead of decoding failures.
#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<RegisterRequest> for RegistrationRequest {
    fn from(request: RegisterRequest) -> Self {
        Self {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let request: RegisterRequest = serde_json::from_str(r#"{"username":"abc"}"#).unwrap();
        assert_eq!(request.username, "abc");
        assert!(request.email.is_empty());
        assert!(request.password.is_empty());
    }

    #[test]
    fn test_debug_omits_password() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"username":"abc","email":"a@b.com","password":"hunter2hunter2"}"#)
                .unwrap();
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}
