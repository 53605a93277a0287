//! Integration tests for a full run against a live database.

#![allow(clippy::unwrap_used)]

use serial_test::serial;

use schemascope_cli::db::ScopeMode;
use schemascope_cli::run::{ORDER_NAME, USER_NAME, run};
use schemascope_core::{Order, Table, User};
use schemascope_integration_tests::{count_rows, reset, test_pool};

// =============================================================================
// Fresh Database
// =============================================================================

#[tokio::test]
#[serial]
async fn test_fresh_database_gets_one_user_and_one_order() {
    let Some(pool) = test_pool().await else {
        return;
    };
    reset(&pool).await.unwrap();

    let report = run(&pool, ScopeMode::Explicit).await.unwrap();

    assert_eq!(count_rows(&pool, &User::qualified_name()).await.unwrap(), 1);
    assert_eq!(count_rows(&pool, &Order::qualified_name()).await.unwrap(), 1);

    assert_eq!(report.user.name, USER_NAME);
    assert_eq!(report.order.name, ORDER_NAME);
    assert_eq!(report.order.user_id, report.user.id);
    assert_eq!(report.migration.created_tables.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_joined_fetch_shows_owner_name() {
    let Some(pool) = test_pool().await else {
        return;
    };
    reset(&pool).await.unwrap();

    let report = run(&pool, ScopeMode::Explicit).await.unwrap();

    assert_eq!(report.orders_with_user.len(), 1);
    let joined = report.orders_with_user.first().unwrap();
    assert_eq!(joined.order.name, "Order 1");
    assert_eq!(joined.user.as_ref().unwrap().name, "John");
}

// =============================================================================
// Reruns
// =============================================================================

#[tokio::test]
#[serial]
async fn test_rerun_adds_exactly_one_row_each() {
    let Some(pool) = test_pool().await else {
        return;
    };
    reset(&pool).await.unwrap();

    let first = run(&pool, ScopeMode::Explicit).await.unwrap();
    let second = run(&pool, ScopeMode::Explicit).await.unwrap();

    assert_eq!(count_rows(&pool, &User::qualified_name()).await.unwrap(), 2);
    assert_eq!(count_rows(&pool, &Order::qualified_name()).await.unwrap(), 2);

    assert_ne!(first.user.id, second.user.id);
    assert_eq!(second.order.user_id, second.user.id);
    assert!(second.migration.is_empty());

    // Every read set contains the rows this run just wrote
    assert!(second.users.contains(&second.user));
    assert!(second.orders.contains(&second.order));
    for joined in &second.orders_with_user {
        assert_eq!(joined.user.as_ref().unwrap().id, joined.order.user_id);
    }
}

// =============================================================================
// Scope Modes
// =============================================================================

#[tokio::test]
#[serial]
async fn test_both_scope_modes_hit_the_same_tables() {
    let Some(pool) = test_pool().await else {
        return;
    };
    reset(&pool).await.unwrap();

    run(&pool, ScopeMode::Explicit).await.unwrap();
    let declared = run(&pool, ScopeMode::Declared).await.unwrap();

    assert_eq!(declared.users.len(), 2);
    assert_eq!(declared.orders.len(), 2);
    assert_eq!(count_rows(&pool, &User::qualified_name()).await.unwrap(), 2);
    assert_eq!(count_rows(&pool, &Order::qualified_name()).await.unwrap(), 2);
}
