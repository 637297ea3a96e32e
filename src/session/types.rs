//! Session verifier error definitions.

use thiserror::Error;

/// Errors raised by a document store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or failed the query.
    #[error("store backend error: {0}")]
    Backend(String),

    /// Reading a store file failed.
    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A store file was not valid JSON.
    #[error("store parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A store file was valid JSON with the wrong layout.
    #[error("invalid store layout: {0}")]
    Layout(String),
}

/// Errors resolving the user behind a correctly signed cookie.
///
/// A bad signature is not an error; it resolves to no user.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No session document exists for the cookie's session ID.
    #[error("session not found")]
    SessionNotFound,

    /// The session exists but carries no `session.passport.user`.
    #[error("session has no authenticated user")]
    NoUserInSession,

    /// The session names a user that does not exist.
    #[error("user '{user_id}' not found")]
    UserNotFound { user_id: String },

    /// The store lookup itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
