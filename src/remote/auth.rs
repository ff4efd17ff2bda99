use thiserror::Error;

/// Opaque user identifier assigned by the identity collaborator
pub type UserId = String;

/// Snapshot pushed by the identity collaborator's auth subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    SignedIn(UserId),
    SignedOut,
}

/// Sign-in failures, keyed by the provider's error code and carrying the
/// fixed user-facing message for each.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email address.")]
    InvalidEmail,
    #[error("This email is already registered. Please login instead.")]
    EmailAlreadyInUse,
    #[error("No account found with this email.")]
    UserNotFound,
    #[error("Incorrect password.")]
    WrongPassword,
    #[error("Password should be at least 6 characters.")]
    WeakPassword,
    #[error("Network error. Please check your connection.")]
    Network,
    #[error("An error occurred. Please try again.")]
    Other,
}

impl AuthError {
    /// Map a provider error code to the matching variant
    pub fn from_code(code: &str) -> Self {
        match code {
            "invalid-email" => Self::InvalidEmail,
            "email-already-in-use" => Self::EmailAlreadyInUse,
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "weak-password" => Self::WeakPassword,
            "network-request-failed" => Self::Network,
            _ => Self::Other,
        }
    }
}

/// Identity collaborator for the synced variant. The auth-state subscription
/// is modeled as `AuthState` events fed into the session loop.
pub trait IdentityClient {
    fn sign_up(&mut self, email: &str, password: &str) -> Result<UserId, AuthError>;
    fn sign_in(&mut self, email: &str, password: &str) -> Result<UserId, AuthError>;
    fn sign_out(&mut self) -> Result<(), AuthError>;
}
