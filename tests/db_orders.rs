mod common;

use std::sync::{Arc, OnceLock};

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use foodcourt::db::{
    CheckoutOperations, DbConnection, OrderOperations, RepositoryError,
};
use foodcourt::models::common::OrderStatus;
use foodcourt::pricing::CartLine;
use foodcourt::test_utils::{insert_user, insert_worker, MockGateway};

async fn place_order(
    pool: &Pool<ConnectionManager<PgConnection>>,
    user_id: i32,
    item_id: i32,
) -> (i32, String) {
    // Share one gateway so session ids stay unique when a test places
    // several orders (orders.session_id has a unique constraint).
    static GATEWAY: OnceLock<Arc<MockGateway>> = OnceLock::new();
    let gateway = GATEWAY.get_or_init(|| Arc::new(MockGateway::new())).clone();
    let ops = CheckoutOperations::new(
        pool.clone(),
        gateway,
        "http://localhost:3000".to_string(),
    );
    let outcome = ops
        .create_checkout(
            user_id,
            &[CartLine {
                item_id,
                quantity: Some(1),
            }],
            "pickup",
            None,
        )
        .await
        .expect("checkout");
    (outcome.order_id, outcome.session_id)
}

#[actix_rt::test]
async fn mark_paid_by_session_is_idempotent() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let (order_id, session_id) =
        place_order(&pool, fixtures.user_id, fixtures.menu_item_ids[0]).await;

    assert!(order_ops
        .mark_paid_by_session(&session_id)
        .expect("first webhook"));
    let details = order_ops.get_order_details(order_id).expect("details");
    assert_eq!(details.status, OrderStatus::Paid);

    // Redelivered event is harmless
    assert!(order_ops
        .mark_paid_by_session(&session_id)
        .expect("second webhook"));
    let details = order_ops.get_order_details(order_id).expect("details");
    assert_eq!(details.status, OrderStatus::Paid);
}

#[actix_rt::test]
async fn unmatched_session_is_a_no_op() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool);

    let matched = order_ops
        .mark_paid_by_session("cs_unknown")
        .expect("no-op webhook");
    assert!(!matched);
}

#[actix_rt::test]
async fn set_status_applies_settable_values() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let (order_id, _) = place_order(&pool, fixtures.user_id, fixtures.menu_item_ids[0]).await;

    let details = order_ops
        .set_status(order_id, "preparing")
        .expect("set preparing");
    assert_eq!(details.status, OrderStatus::Preparing);

    let details = order_ops
        .set_status(order_id, "cancelled")
        .expect("set cancelled");
    assert_eq!(details.status, OrderStatus::Cancelled);
}

#[actix_rt::test]
async fn set_status_rejects_internal_and_unknown_values() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let (order_id, _) = place_order(&pool, fixtures.user_id, fixtures.menu_item_ids[0]).await;

    for value in ["paid", "draft", "failed", "archived", ""] {
        let result = order_ops.set_status(order_id, value);
        assert!(
            matches!(result.unwrap_err(), RepositoryError::ValidationError(_)),
            "'{value}' must be rejected"
        );
    }

    let details = order_ops.get_order_details(order_id).expect("details");
    assert_eq!(details.status, OrderStatus::Pending, "order untouched");
}

#[actix_rt::test]
async fn set_status_unknown_order_is_not_found() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool);

    let result = order_ops.set_status(99999, "preparing");
    assert!(matches!(result.unwrap_err(), RepositoryError::NotFound(_)));
}

#[actix_rt::test]
async fn assign_and_clear_worker() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let (order_id, _) = place_order(&pool, fixtures.user_id, fixtures.menu_item_ids[0]).await;

    let details = order_ops
        .assign_worker(order_id, Some(fixtures.worker_id))
        .expect("assign");
    assert_eq!(details.assigned_worker_id, Some(fixtures.worker_id));

    let details = order_ops.assign_worker(order_id, None).expect("clear");
    assert_eq!(details.assigned_worker_id, None);
}

#[actix_rt::test]
async fn assign_worker_validates_the_worker() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());
    let (order_id, _) = place_order(&pool, fixtures.user_id, fixtures.menu_item_ids[0]).await;

    let result = order_ops.assign_worker(order_id, Some(99999));
    assert!(matches!(result.unwrap_err(), RepositoryError::NotFound(_)));

    let inactive_id = {
        let mut conn = DbConnection::new(&pool).expect("db connection");
        insert_worker(conn.connection(), "Off Duty", "chef", false).expect("insert worker")
    };
    let result = order_ops.assign_worker(order_id, Some(inactive_id));
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));

    let result = order_ops.assign_worker(99999, Some(fixtures.worker_id));
    assert!(matches!(result.unwrap_err(), RepositoryError::NotFound(_)));
}

#[actix_rt::test]
async fn listings_are_scoped_and_populated() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let order_ops = OrderOperations::new(pool.clone());

    let other_user_id = {
        let mut conn = DbConnection::new(&pool).expect("db connection");
        insert_user(conn.connection(), "User Two", "user2@example.com").expect("insert user")
    };
    place_order(&pool, fixtures.user_id, fixtures.menu_item_ids[0]).await;
    place_order(&pool, other_user_id, fixtures.menu_item_ids[1]).await;

    let all = order_ops.get_all_orders().expect("all orders");
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].user.email, "user2@example.com", "newest first");
    assert!(!all[0].items.is_empty(), "items populated");

    let mine = order_ops
        .get_orders_by_userid(fixtures.user_id)
        .expect("user orders");
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].user.name, "User One");
    assert_eq!(mine[0].items[0].name, "Classic Burger");
}
