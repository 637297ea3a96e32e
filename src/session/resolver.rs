//! Resolve the user behind a signed session cookie.
//!
//! # Data Flow
//! ```text
//! cookie ──verify──▶ session ID ──sessions._id──▶ session document
//!                                                     │ session.passport.user
//!                                                     ▼
//!                              user document ◀──users.orcid── user ID
//! ```

use serde_json::Value;

use crate::config::StoreConfig;
use crate::session::cookie;
use crate::session::store::DocumentStore;
use crate::session::types::{SessionError, SessionResult};

/// Key field of the sessions collection.
pub const SESSION_KEY_FIELD: &str = "_id";

/// Looks up users for signed cookies against a document store.
pub struct SessionResolver<S> {
    store: S,
    secret: String,
    sessions_collection: String,
    users_collection: String,
    user_key_field: String,
}

impl<S: DocumentStore> SessionResolver<S> {
    pub fn new(store: S, secret: impl Into<String>, config: &StoreConfig) -> Self {
        Self {
            store,
            secret: secret.into(),
            sessions_collection: config.sessions_collection.clone(),
            users_collection: config.users_collection.clone(),
            user_key_field: config.user_key_field.clone(),
        }
    }

    /// The user document for `cookie`.
    ///
    /// Returns `Ok(None)` when the signature does not verify; the store is not
    /// consulted in that case. Missing session or user records are errors.
    pub async fn resolve(&self, cookie: &str) -> SessionResult<Option<Value>> {
        if !cookie::verify(cookie, &self.secret) {
            tracing::debug!("Cookie signature rejected");
            return Ok(None);
        }
        let Some(session_id) = cookie::session_id(cookie) else {
            return Ok(None);
        };

        let session = self
            .store
            .find_one(&self.sessions_collection, SESSION_KEY_FIELD, session_id)
            .await?
            .ok_or(SessionError::SessionNotFound)?;

        let user_id = user_id_from_session(&session).ok_or(SessionError::NoUserInSession)?;
        tracing::debug!(user = %user_id, "Session resolved to user");

        let user = self
            .store
            .find_one(&self.users_collection, &self.user_key_field, &user_id)
            .await?;

        match user {
            Some(user) => Ok(Some(user)),
            None => Err(SessionError::UserNotFound { user_id }),
        }
    }
}

/// Resolve against the default sessions/users collection layout.
pub async fn resolve_user<S: DocumentStore>(
    cookie: &str,
    secret: &str,
    store: S,
) -> SessionResult<Option<Value>> {
    SessionResolver::new(store, secret, &StoreConfig::default())
        .resolve(cookie)
        .await
}

/// User identifier at `session.passport.user`.
///
/// Some session stores keep `session` as serialized JSON text; that form is
/// parsed before the lookup.
pub fn user_id_from_session(document: &Value) -> Option<String> {
    let session = document.get("session")?;
    let parsed;
    let session = match session {
        Value::String(raw) => {
            parsed = serde_json::from_str::<Value>(raw).ok()?;
            &parsed
        }
        other => other,
    };

    session
        .pointer("/passport/user")
        .and_then(Value::as_str)
        .map(str::to_string)
}
