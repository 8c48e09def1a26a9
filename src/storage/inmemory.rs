//! In-memory client storage implementation.

use crate::errors::StorageError;
use crate::oauth::types::ClientRecord;
use crate::storage::traits::{ClientStore, Result, client_key};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

/// In-memory implementation of [`ClientStore`]
#[derive(Default)]
pub struct MemoryClientStore {
    clients: Mutex<HashMap<String, ClientRecord>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn get_client(&self, client_id: &str) -> Result<Option<ClientRecord>> {
        let clients = self
            .clients
            .lock()
            .map_err(|e| StorageError::SerializationFailed(format!("Lock error: {}", e)))?;
        Ok(clients.get(&client_key(client_id)).cloned())
    }

    async fn put_client(&self, record: &ClientRecord) -> Result<()> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|e| StorageError::SerializationFailed(format!("Lock error: {}", e)))?;
        clients.insert(client_key(&record.client_id), record.clone());
        Ok(())
    }

    async fn put_client_if_absent(&self, record: &ClientRecord) -> Result<bool> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|e| StorageError::SerializationFailed(format!("Lock error: {}", e)))?;
        match clients.entry(client_key(&record.client_id)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(entry) => {
                entry.insert(record.clone());
                Ok(true)
            }
        }
    }
}
