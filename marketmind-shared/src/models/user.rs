use serde::{Deserialize, Serialize};

/// Profile of an authenticated user as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    /// Backend identifier, when the backend provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Login name.
    pub username: String,

    /// Display name.
    pub name: String,

    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserProfile {
    /// Builds a profile without id or avatar.
    #[must_use]
    pub fn new(username: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: None,
            username: username.into(),
            name: name.into(),
            avatar: None,
        }
    }
}

/// The current user paired with their auth token.
///
/// Holding both in one value keeps "token present iff user present" true by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Signed-in user.
    pub user: UserProfile,
    /// Opaque bearer token issued at login.
    pub token: String,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Signed-in user.
    pub user: UserProfile,
    /// Issued token.
    pub token: String,
}

/// Body of `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Desired login name.
    pub username: String,
    /// Plain-text password.
    pub password: String,
    /// Display name.
    pub name: String,
}

/// Successful registration response.
///
/// Some backends sign the new user in immediately (`user` and `token`), others
/// only acknowledge the registration with a `message`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterResponse {
    /// Acknowledgement text.
    #[serde(default)]
    pub message: Option<String>,
    /// Created user.
    #[serde(default)]
    pub user: Option<UserProfile>,
    /// Token when the backend signs the user in on registration.
    #[serde(default)]
    pub token: Option<String>,
}

impl RegisterResponse {
    /// Returns the session carried by the response, if it has both halves.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) => Some(Session {
                user: user.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_backend_body() {
        let json = r#"{"username":"admin","name":"Admin User","avatar":"https://api.dicebear.com/7.x/avataaars/svg?seed=Admin"}"#;
        let user: UserProfile = serde_json::from_str(json).expect("profile");
        assert_eq!(user.username, "admin");
        assert_eq!(user.name, "Admin User");
        assert!(user.id.is_none());
        assert!(user.avatar.is_some());
    }

    #[test]
    fn test_profile_serialization_skips_missing_fields() {
        let json = serde_json::to_string(&UserProfile::new("jane", "Jane")).expect("serialize");
        assert_eq!(json, r#"{"username":"jane","name":"Jane"}"#);
    }

    #[test]
    fn test_auth_response() {
        let json = r#"{"token":"abc123","user":{"id":"7","username":"jane","name":"Jane"}}"#;
        let response: AuthResponse = serde_json::from_str(json).expect("auth response");
        assert_eq!(response.token, "abc123");
        assert_eq!(response.user.id.as_deref(), Some("7"));
    }

    #[test]
    fn test_register_response_without_token_has_no_session() {
        let json = r#"{"message":"Registration successful","user":{"username":"jane","name":"Jane"}}"#;
        let response: RegisterResponse = serde_json::from_str(json).expect("register response");
        assert_eq!(response.message.as_deref(), Some("Registration successful"));
        assert!(response.session().is_none());
    }

    #[test]
    fn test_register_response_with_token_has_session() {
        let json = r#"{"user":{"username":"jane","name":"Jane"},"token":"t"}"#;
        let response: RegisterResponse = serde_json::from_str(json).expect("register response");
        let session = response.session().expect("session");
        assert_eq!(session.user.username, "jane");
        assert_eq!(session.token, "t");
    }
}
