//! Session state and transitions.
//!
//! Credentials, not a server-issued token, are the unit of session truth:
//! every request re-proves identity, so a revoked or changed password is
//! detected on the very next call.

use tracing::debug;

use crate::api::ApiClient;
use crate::credentials::CredentialStore;
use crate::error::{Error, Result};
use crate::models::{Credentials, User};

/// Authentication state. Task operations are permitted only while
/// `Authenticated`.
#[derive(Debug, Clone)]
pub enum Session {
    Anonymous,
    /// Transient: a login attempt is in flight.
    Authenticating,
    Authenticated { user: User, credentials: Credentials },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }
}

/// Owns the current session, drives login/logout transitions, and keeps the
/// credential store consistent with what the service last accepted.
///
/// The store's durable record is mutated only here, never by the task list
/// controller.
pub struct SessionManager {
    client: ApiClient,
    store: CredentialStore,
    session: Session,
}

impl SessionManager {
    pub fn new(client: ApiClient, store: CredentialStore) -> Self {
        Self {
            client,
            store,
            session: Session::Anonymous,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&User> {
        match &self.session {
            Session::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// Active credentials, failing fast when there is no session.
    ///
    /// # Errors
    /// `Error::InvalidSession` unless authenticated.
    pub fn credentials(&self) -> Result<&Credentials> {
        match &self.session {
            Session::Authenticated { credentials, .. } => Ok(credentials),
            _ => Err(Error::InvalidSession),
        }
    }

    /// Validates the pair against the service and, only on success, persists
    /// it and transitions to `Authenticated`.
    ///
    /// # Errors
    /// Propagates the validation failure; rejected credentials are never
    /// persisted and the session returns to `Anonymous`.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let credentials = Credentials::new(username, password);
        self.session = Session::Authenticating;

        let user = match self.client.fetch_current_user(&credentials).await {
            Ok(user) => user,
            Err(err) => {
                self.session = Session::Anonymous;
                return Err(err);
            }
        };

        if let Err(err) = self.store.save(&credentials) {
            self.session = Session::Anonymous;
            return Err(err);
        }

        debug!(username = %user.username, "logged in");
        self.session = Session::Authenticated {
            user: user.clone(),
            credentials,
        };
        Ok(user)
    }

    /// Clears the in-memory session and the persisted record. Idempotent.
    ///
    /// Returns whether a persisted record was cleared.
    ///
    /// # Errors
    /// Returns an error if the record cannot be removed.
    pub fn logout(&mut self) -> Result<bool> {
        self.session = Session::Anonymous;
        self.store.clear()
    }

    /// Restores a persisted session at process start.
    ///
    /// A stored record is re-validated against the service, never trusted
    /// blindly. Rejected credentials leave the session anonymous and clear
    /// the record so a stale pair is not retried on the next start;
    /// transport errors keep the record and propagate.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read or the service cannot be
    /// reached.
    pub async fn bootstrap(&mut self) -> Result<&Session> {
        if let Some(stored) = self.store.load()? {
            match self.login(&stored.username, &stored.password).await {
                Ok(_) => {}
                Err(Error::Authentication) => {
                    debug!("stored credentials rejected, clearing record");
                    self.store.clear()?;
                }
                Err(err) => return Err(err),
            }
        }
        Ok(&self.session)
    }
}
