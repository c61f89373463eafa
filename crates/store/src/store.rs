use async_trait::async_trait;
use common::ReservationId;

use crate::{RESERVATIONS_COLLECTION, Result, SnapshotRecord};

/// Core trait for document store implementations.
///
/// Documents are insert-only: writing a key that already exists fails with
/// `DuplicateKey` and leaves the stored document untouched.
/// All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Writes a document under `(collection, key)`.
    async fn put(&self, collection: &str, key: &str, value: serde_json::Value) -> Result<()>;

    /// Reads a document.
    ///
    /// Returns None if no document exists under the key.
    async fn get(&self, collection: &str, key: &str) -> Result<Option<serde_json::Value>>;

    /// Counts the documents in a collection.
    async fn count(&self, collection: &str) -> Result<u64>;
}

/// Typed access to the reservations collection.
#[async_trait]
pub trait ReservationStoreExt: DocumentStore {
    /// Persists a confirmed booking keyed by its reservation id.
    async fn put_reservation(&self, record: &SnapshotRecord) -> Result<()> {
        let value = serde_json::to_value(record)?;
        self.put(RESERVATIONS_COLLECTION, record.key(), value).await
    }

    /// Loads a confirmed booking.
    async fn get_reservation(&self, id: &ReservationId) -> Result<Option<SnapshotRecord>> {
        match self.get(RESERVATIONS_COLLECTION, id.as_str()).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Counts confirmed bookings.
    async fn reservation_count(&self) -> Result<u64> {
        self.count(RESERVATIONS_COLLECTION).await
    }
}

// Blanket implementation for all DocumentStore implementations
impl<T: DocumentStore + ?Sized> ReservationStoreExt for T {}
