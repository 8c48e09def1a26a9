//! Storage trait definitions for registered client records.

use crate::errors::StorageError;
use crate::oauth::types::ClientRecord;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Prefix applied to every client key so records stay clear of unrelated
/// entries in a shared key-value namespace
pub const CLIENT_KEY_PREFIX: &str = "client:";

/// Build the namespaced storage key for a client id
pub fn client_key(client_id: &str) -> String {
    format!("{}{}", CLIENT_KEY_PREFIX, client_id)
}

/// Trait for storing and retrieving registered clients
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Retrieve a client by id. Missing keys and unreadable records both
    /// come back as `None`.
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientRecord>>;

    /// Store a client record, replacing any existing record under the same id
    async fn put_client(&self, record: &ClientRecord) -> Result<()>;

    /// Store a client record only if its id is unused; returns `false`
    /// without writing when the id is already taken
    async fn put_client_if_absent(&self, record: &ClientRecord) -> Result<bool>;
}
