use super::{IdentityProvider, User};
use ahash::AHashMap;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Default)]
struct IdentityState {
    accounts: AHashMap<String, (String, User)>,
    session: Option<User>,
    next_id: u64,
}

/// In-process identity provider keeping accounts in memory.
///
/// Meant for tests and offline use of the CLI; passwords are compared as given.
#[derive(Default)]
pub struct MemoryIdentity {
    state: Mutex<IdentityState>,
}

impl MemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut IdentityState) -> T) -> Result<T, String> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| "identity state is poisoned".to_string())?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl IdentityProvider for MemoryIdentity {
    async fn current_user(&self) -> Result<Option<User>, String> {
        self.with_state(|state| state.session.clone())
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<User, String> {
        self.with_state(|state| match state.accounts.get(email) {
            Some((stored, user)) if stored == password => {
                state.session = Some(user.clone());
                Ok(user.clone())
            }
            _ => Err("Invalid login credentials".to_string()),
        })?
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<User, String> {
        self.with_state(|state| {
            if state.accounts.contains_key(email) {
                return Err("User already registered".to_string());
            }
            state.next_id += 1;
            let user = User {
                id: format!("user-{}", state.next_id),
                email: email.to_string(),
            };
            state
                .accounts
                .insert(email.to_string(), (password.to_string(), user.clone()));
            state.session = Some(user.clone());
            Ok(user)
        })?
    }

    async fn sign_out(&self) -> Result<(), String> {
        self.with_state(|state| state.session = None)
    }
}
