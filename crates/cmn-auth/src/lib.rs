//! Credential and session-token lifecycle for commune.
//!
//! JWT-based authentication with Argon2 password hashing. Each account holds
//! at most one live refresh token: logging in or refreshing rotates it,
//! logging out clears it, so a single session exists per account at any time.
//!
//! ## Core Types
//!
//! - [`Account`] — Stored user record (hash and refresh token included)
//! - [`Profile`] — Redacted view safe to serialize
//! - [`Sessions`] — The lifecycle state machine: register, login, refresh,
//!   logout, password and avatar changes
//!
//! ## Security
//!
//! - [`Crypto`] — Dual-secret JWT signing and verification
//! - [`AccessClaims`] / [`RefreshClaims`] — Token payloads
//! - [`Hasher`] — Argon2 hashing with a configurable work factor
//!
//! ## Collaborators
//!
//! - [`Accounts`] — Persistent store contract
//! - [`Images`] — External image hosting contract
mod claims;
mod crypto;
mod dto;
mod errors;
mod media;
mod password;
mod record;
mod repository;
mod session;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use errors::*;
pub use media::*;
pub use password::*;
pub use record::*;
pub use repository::*;
pub use session::*;

#[cfg(feature = "database")]
mod postgres;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;

#[cfg(test)]
mod testing;
