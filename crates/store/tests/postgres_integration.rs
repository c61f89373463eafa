//! PostgreSQL integration tests
//!
//! These tests start a PostgreSQL container and are ignored by default.
//! Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration -- --ignored --test-threads=1
//! ```

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::ReservationId;
use serial_test::serial;
use sqlx::PgPool;
use store::{
    DocumentStore, PostgresDocumentStore, RESERVATIONS_COLLECTION, ReservationStoreExt,
    SnapshotRecord, StoreError,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_documents_table.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a store with its own pool and an empty table
async fn get_test_store() -> PostgresDocumentStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE documents")
        .execute(&pool)
        .await
        .unwrap();

    PostgresDocumentStore::new(pool)
}

fn record(id: &str) -> SnapshotRecord {
    SnapshotRecord {
        movie: "Inception".to_string(),
        date: "2025-01-10".to_string(),
        time: "18:00".to_string(),
        experience: "IMAX".to_string(),
        seats: vec!["A1".to_string()],
        total_price: 3600,
        reservation_id: ReservationId::new(id).unwrap(),
        user_principal: "a@b.com".to_string(),
        timestamp: Utc.with_ymd_and_hms(2025, 1, 9, 10, 30, 0).unwrap(),
    }
}

#[tokio::test]
#[ignore = "requires docker"]
#[serial]
async fn put_and_get_reservation() {
    let store = get_test_store().await;
    let saved = record("SC-PG-00001");

    store.put_reservation(&saved).await.unwrap();

    let loaded = store
        .get_reservation(&saved.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded, saved);
    assert_eq!(store.count(RESERVATIONS_COLLECTION).await.unwrap(), 1);
}

#[tokio::test]
#[ignore = "requires docker"]
#[serial]
async fn duplicate_reservation_id_is_rejected() {
    let store = get_test_store().await;
    store.put_reservation(&record("SC-PG-00002")).await.unwrap();

    let mut second = record("SC-PG-00002");
    second.movie = "Dune".to_string();
    let result = store.put_reservation(&second).await;
    assert!(matches!(result, Err(StoreError::DuplicateKey { .. })));

    let loaded = store
        .get_reservation(&second.reservation_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.movie, "Inception");
}

#[tokio::test]
#[ignore = "requires docker"]
#[serial]
async fn missing_document_is_none() {
    let store = get_test_store().await;
    let id = ReservationId::new("SC-PG-MISSING").unwrap();
    assert!(store.get_reservation(&id).await.unwrap().is_none());
}
