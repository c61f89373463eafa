//! Persistent document store for confirmed bookings.
//!
//! Documents are written once under a `(collection, key)` pair. The store is
//! the final arbiter of key uniqueness: a second write to the same key fails
//! with [`StoreError::DuplicateKey`].

pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemoryDocumentStore;
pub use postgres::PostgresDocumentStore;
pub use record::{RESERVATIONS_COLLECTION, SnapshotRecord};
pub use store::{DocumentStore, ReservationStoreExt};
