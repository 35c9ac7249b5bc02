//! Login and registration pages.

use super::{PageController, SubmitError};
use crate::api::MarketMindApi;
use crate::session::SessionStore;
use shared::models::{ApiError, LoginRequest, RegisterRequest, Session, UserProfile};
use std::sync::Arc;

/// Shown when the confirmation does not match the password.
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Shown after a registration the backend did not sign in.
pub const DEFAULT_REGISTER_MESSAGE: &str = "Registration successful";

/// Highest score [`password_strength`] returns.
pub const MAX_PASSWORD_STRENGTH: u8 = 5;

/// Scores a password from 0 to 5, one point each for: more than 5
/// characters, more than 8 characters, an uppercase letter, a digit, and a
/// character that is not an ASCII letter or digit.
#[must_use]
pub fn password_strength(password: &str) -> u8 {
    let length = password.chars().count();
    let checks = [
        length > 5,
        length > 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.into_iter().map(u8::from).sum()
}

/// Login page. A successful login replaces the shared session.
pub struct LoginController {
    api: Arc<dyn MarketMindApi>,
    session: Arc<SessionStore>,
    page: PageController<UserProfile>,
}

impl LoginController {
    #[must_use]
    pub fn new(api: Arc<dyn MarketMindApi>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            page: PageController::new(),
        }
    }

    /// Signs in and stores the returned user and token.
    ///
    /// # Errors
    /// [`SubmitError::Required`] for a blank username or password, otherwise
    /// see [`PageController::submit`]. The session is untouched on failure.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserProfile, SubmitError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(SubmitError::Required("username"));
        }
        if password.is_empty() {
            return Err(SubmitError::Required("password"));
        }

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.page
            .submit(async {
                let auth = self.api.login(&request).await?;
                self.session.login(auth.user.clone(), auth.token);
                Ok::<_, ApiError>(auth.user)
            })
            .await
    }

    #[must_use]
    pub const fn page(&self) -> &PageController<UserProfile> {
        &self.page
    }
}

/// What a successful registration led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The backend issued a token; the user is now signed in.
    SignedIn(Session),
    /// The account exists but the user still has to sign in.
    Registered { message: String },
}

/// Filled-in registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration page.
pub struct RegisterController {
    api: Arc<dyn MarketMindApi>,
    session: Arc<SessionStore>,
    page: PageController<RegisterOutcome>,
}

impl RegisterController {
    #[must_use]
    pub fn new(api: Arc<dyn MarketMindApi>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            page: PageController::new(),
        }
    }

    /// Registers the account described by `form`.
    ///
    /// # Errors
    /// A validation error when the passwords differ, [`SubmitError::Required`]
    /// for a blank name, username or password, otherwise see
    /// [`PageController::submit`].
    pub async fn register(&self, form: &RegisterForm) -> Result<RegisterOutcome, SubmitError> {
        for (field, value) in [
            ("name", form.name.trim()),
            ("username", form.username.trim()),
            ("password", form.password.as_str()),
        ] {
            if value.is_empty() {
                return Err(SubmitError::Required(field));
            }
        }
        if form.password != form.confirm_password {
            return self.page.reject(ApiError::validation(PASSWORD_MISMATCH));
        }

        let request = RegisterRequest {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
            name: form.name.trim().to_string(),
        };
        self.page
            .submit(async {
                let response = self.api.register(&request).await?;
                Ok::<_, ApiError>(match response.session() {
                    Some(session) => {
                        self.session
                            .login(session.user.clone(), session.token.clone());
                        RegisterOutcome::SignedIn(session)
                    }
                    None => RegisterOutcome::Registered {
                        message: response
                            .message
                            .unwrap_or_else(|| DEFAULT_REGISTER_MESSAGE.to_string()),
                    },
                })
            })
            .await
    }

    #[must_use]
    pub const fn page(&self) -> &PageController<RegisterOutcome> {
        &self.page
    }
}
