//! Integration tests for the PostgreSQL invoice store.
//!
//! # Requirements
//!
//! - Docker must be running (testcontainers launches a PostgreSQL container)
//! - Feature flag `postgres` must be enabled
//!
//! # Running
//!
//! ```sh
//! cargo test --features postgres --test postgres_tests -- --test-threads=1
//! ```
//!
//! # Test isolation
//!
//! All tests share a single PostgreSQL container (via `OnceLock`). Each test
//! creates a fresh `PgPool` and truncates the table before running.

#![cfg(feature = "postgres")]

use chrono::NaiveDate;
use invoices::prelude::*;
use invoices::storage::postgres::{connect, ensure_schema};
use sqlx::PgPool;
use std::sync::OnceLock;
use testcontainers::runners::AsyncRunner;
use testcontainers_modules::postgres::Postgres;

// ---------------------------------------------------------------------------
// Shared test environment (single container, fresh pool per test)
// ---------------------------------------------------------------------------

/// Keeps the container alive for the whole test binary
struct PgTestEnv {
    _container: testcontainers::ContainerAsync<Postgres>,
    connection_url: String,
}

/// Process-global (not tokio-aware) so it outlives each `#[tokio::test]`
/// runtime.
static TEST_ENV: OnceLock<PgTestEnv> = OnceLock::new();

async fn init_pg_env() -> &'static PgTestEnv {
    if let Some(env) = TEST_ENV.get() {
        return env;
    }

    let container = Postgres::default()
        .start()
        .await
        .expect("Failed to start PostgreSQL container, is Docker running?");

    let host = container.get_host().await.unwrap();
    let port = container.get_host_port_ipv4(5432).await.unwrap();
    let url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to PostgreSQL");
    ensure_schema(&pool).await.expect("Failed to create schema");
    pool.close().await;

    let _ = TEST_ENV.set(PgTestEnv {
        _container: container,
        connection_url: url,
    });
    TEST_ENV.get().unwrap()
}

/// A store over a fresh pool and an empty `invoices` table
async fn clean_store() -> PostgresInvoiceStore {
    let env = init_pg_env().await;
    let pool = connect(&env.connection_url, 2)
        .await
        .expect("Failed to connect to PostgreSQL");
    sqlx::query("TRUNCATE invoices")
        .execute(&pool)
        .await
        .expect("Failed to truncate invoices table");
    PostgresInvoiceStore::new(pool)
}

fn fields(customer: &str, cents: i64, status: InvoiceStatus) -> InvoiceFields {
    InvoiceFields {
        customer_id: customer.to_string(),
        amount: Cents::new(cents).unwrap(),
        status,
    }
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 4, d).unwrap()
}

// ---------------------------------------------------------------------------
// Store contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_insert_and_get() {
    let store = clean_store().await;

    let created = store
        .insert(NewInvoice {
            fields: fields("c1", 999, InvoiceStatus::Pending),
            date: day(1),
        })
        .await
        .unwrap();

    assert_eq!(created.amount.get(), 999);
    assert_eq!(created.date, day(1));

    let fetched = store.get(&created.id).await.unwrap();
    assert_eq!(fetched, Some(created));
}

#[tokio::test]
async fn test_list_orders_by_date_desc() {
    let store = clean_store().await;
    for (customer, d) in [("a", 2), ("b", 9), ("c", 5)] {
        store
            .insert(NewInvoice {
                fields: fields(customer, 100, InvoiceStatus::Paid),
                date: day(d),
            })
            .await
            .unwrap();
    }

    let customers: Vec<String> = store
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|invoice| invoice.customer_id)
        .collect();
    assert_eq!(customers, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn test_update_keeps_date() {
    let store = clean_store().await;
    let created = store
        .insert(NewInvoice {
            fields: fields("c1", 100, InvoiceStatus::Pending),
            date: day(3),
        })
        .await
        .unwrap();

    let updated = store
        .update(&created.id, fields("c2", 4250, InvoiceStatus::Paid))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.customer_id, "c2");
    assert_eq!(updated.amount.get(), 4250);
    assert_eq!(updated.status, InvoiceStatus::Paid);
    assert_eq!(updated.date, day(3));
}

#[tokio::test]
async fn test_update_unknown_returns_none() {
    let store = clean_store().await;
    let result = store
        .update(&Uuid::new_v4(), fields("c1", 1, InvoiceStatus::Paid))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_reports_rows_affected() {
    let store = clean_store().await;
    let created = store
        .insert(NewInvoice {
            fields: fields("c1", 100, InvoiceStatus::Pending),
            date: day(1),
        })
        .await
        .unwrap();

    assert!(store.delete(&created.id).await.unwrap());
    assert!(!store.delete(&created.id).await.unwrap());
    assert!(store.get(&created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_check_constraint_rejects_bad_status() {
    let store = clean_store().await;

    let result = sqlx::query(
        "INSERT INTO invoices (id, customer_id, amount, status, date) \
         VALUES ($1, 'c1', 100, 'draft', CURRENT_DATE)",
    )
    .bind(Uuid::new_v4())
    .execute(store.pool())
    .await;

    assert!(result.is_err());
}

// ---------------------------------------------------------------------------
// Actions over PostgreSQL
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_update_delete_through_actions() {
    let store = Arc::new(clean_store().await);
    let bus = Arc::new(EventBus::new(16));
    let mut rx = bus.subscribe();
    let actions = InvoiceActions::new(store.clone(), bus.clone())
        .with_clock(Arc::new(FixedClock(day(15))));

    let input = FormInput::new()
        .with("customerId", "c1")
        .with("amount", "9.99")
        .with("status", "pending");
    assert!(actions.create(&input).await.is_success());

    let created = store.list().await.unwrap().remove(0);
    assert_eq!(created.amount.get(), 999);
    assert_eq!(created.date, day(15));

    let input = input.with("status", "paid");
    assert!(actions.update(created.id, &input).await.is_success());
    assert_eq!(
        store.get(&created.id).await.unwrap().unwrap().status,
        InvoiceStatus::Paid
    );

    assert_eq!(actions.delete(created.id).await, ActionOutcome::Revalidated);
    assert!(store.get(&created.id).await.unwrap().is_none());

    let actions_seen: Vec<&str> = [
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
        rx.recv().await.unwrap(),
    ]
    .iter()
    .map(|envelope| envelope.invalidation.event.action())
    .collect();
    assert_eq!(actions_seen, vec!["created", "updated", "deleted"]);
}

#[tokio::test]
async fn test_open_store_uses_postgres_when_url_is_set() {
    let env = init_pg_env().await;
    let config = invoices::config::DatabaseConfig {
        url: Some(env.connection_url.clone()),
        max_connections: 2,
    };

    let store = open_store(&config).await.unwrap();
    assert!(store.list().await.is_ok());
}
