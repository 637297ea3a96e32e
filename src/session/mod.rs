//! Session cookie verification subsystem.
//!
//! # Data Flow
//! ```text
//! "s:<id>.<sig>"
//!     → cookie.rs (recompute HMAC-SHA256, constant-time compare)
//!     → resolver.rs (session document → passport user → user document)
//!     → store.rs / mongo.rs (DocumentStore lookups)
//! ```
//!
//! # Design Decisions
//! - A bad signature yields no user, never an error, and touches no store
//! - Missing session or user records are typed errors
//! - Store connections are scoped to one resolution

pub mod cookie;
pub mod mongo;
pub mod resolver;
pub mod store;
pub mod types;

pub use cookie::{session_id, sign_cookie, verify};
pub use mongo::MongoStore;
pub use resolver::{resolve_user, user_id_from_session, SessionResolver};
pub use store::{DocumentStore, MemoryStore};
pub use types::{SessionError, SessionResult, StoreError};
