use serde::Serialize;
use std::fmt;

/// Flat JSON object as decoded from the login response, in document key order.
pub type ParsedJsonObject = serde_json::Map<String, serde_json::Value>;

/// Username and password for a single login attempt.
///
/// Lives only for the duration of one `login` call. `Debug` never prints the
/// password.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoginOutcome {
    Success { rendered_data: String },
    Failure { error_message: String },
}

impl LoginOutcome {
    pub fn success(rendered_data: impl Into<String>) -> Self {
        Self::Success {
            rendered_data: rendered_data.into(),
        }
    }

    pub fn failure(error_message: impl Into<String>) -> Self {
        Self::Failure {
            error_message: error_message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Failure { .. } => "failure",
        }
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { rendered_data } => {
                write!(f, "Login successful! User data: {}", rendered_data)
            }
            Self::Failure { error_message } => write!(f, "{}", error_message),
        }
    }
}
