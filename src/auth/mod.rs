//! Identity collaborator seam and the credential checks done before calling it.
use crate::error::AuthError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

mod memory;
mod validation;

pub use memory::MemoryIdentity;
pub use validation::*;

/// A signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// The external identity provider.
///
/// Errors are plain messages; they are shown to the user as-is.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<User>, String>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<User, String>;
    async fn sign_up(&self, email: &str, password: &str) -> Result<User, String>;
    async fn sign_out(&self) -> Result<(), String>;
}

/// Front door for sign in, sign up and sign out.
pub struct AuthService<P> {
    provider: P,
}

impl<P: IdentityProvider> AuthService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the user of an existing session. Provider failures count as
    /// "no session".
    pub async fn check_session(&self) -> Option<User> {
        match self.provider.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "session check failed");
                None
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        validate_sign_in(email, password)?;
        let user = self
            .provider
            .sign_in(email, password)
            .await
            .map_err(AuthError::Provider)?;
        info!(user = %user.id, "signed in");
        Ok(user)
    }

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, AuthError> {
        validate_sign_up(email, password, confirm_password)?;
        let user = self
            .provider
            .sign_up(email, password)
            .await
            .map_err(AuthError::Provider)?;
        info!(user = %user.id, "signed up");
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await.map_err(|e| {
            warn!(error = %e, "sign out failed");
            AuthError::Provider(e)
        })
    }
}
