//! crates/learning_dashboard_core/src/ports.rs
//!
//! Defines the service contracts (traits) the stores depend on.
//! These traits form the boundary of the hexagonal architecture: the stores never
//! know whether snapshots land in files, in memory, or somewhere else, nor how
//! the register/login latency is produced.

use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Storage failure: {0}")]
    Storage(String),
    #[error("Stored data could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Storage Keys
//=========================================================================================

/// The password-free `User` of the active session.
pub const SESSION_KEY: &str = "deh-user";
/// Every registered `CredentialRecord`, in registration order.
pub const ACCOUNTS_KEY: &str = "deh-users";
/// The full course catalog with nested chapters.
pub const CATALOG_KEY: &str = "deh-courses";

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Durable string key-value storage.
///
/// Calls are synchronous and each one is applied in full or not at all.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> PortResult<Option<String>>;

    fn put(&self, key: &str, value: &str) -> PortResult<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> PortResult<()>;
}

#[async_trait]
pub trait LatencyService: Send + Sync {
    /// The single suspension point of `register` and `login`.
    async fn wait(&self) -> PortResult<()>;
}
