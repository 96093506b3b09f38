//! Credential gate: login check plus the persisted session flag.
//!
//! This is demo-grade access control. Credentials are compared in plaintext
//! and there is no lockout or rate limiting.

use tracing::{error, info, warn};

use crate::config::{Credentials, PASSWORD_VAR, USERNAME_VAR};
use crate::session::{AUTHENTICATED, SESSION_KEY, SessionStore, StoreError};

pub struct CredentialGate<S> {
    expected: Credentials,
    store: S,
}

impl<S: SessionStore> CredentialGate<S> {
    pub fn new(expected: Credentials, store: S) -> Self {
        Self { expected, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reports whether the supplied pair matches the configured one.
    ///
    /// Does not touch the session flag; call [`remember`](Self::remember) on success.
    /// An unconfigured gate rejects everything.
    pub async fn login(&self, username: &str, password: &str) -> bool {
        if !self.expected.is_configured() {
            error!(
                "Login credentials are not configured; set {} and {}",
                USERNAME_VAR, PASSWORD_VAR
            );
            return false;
        }

        if username == self.expected.username && password == self.expected.password {
            info!("Login accepted for {}", username);
            true
        } else {
            warn!("Login rejected for {}", username);
            false
        }
    }

    /// True iff the session flag holds exactly `"true"`
    pub fn is_authenticated(&self) -> bool {
        self.store.get(SESSION_KEY).as_deref() == Some(AUTHENTICATED)
    }

    /// Marks the session authenticated
    pub fn remember(&self) -> Result<(), StoreError> {
        self.store.set(SESSION_KEY, AUTHENTICATED)
    }

    /// Clears the session flag. Idempotent.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(SESSION_KEY)
    }
}
