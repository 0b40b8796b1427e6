mod common;

use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use foodcourt::db::{CheckoutOperations, DbConnection, OrderOperations, RepositoryError};
use foodcourt::enums::common::DeliveryDetails;
use foodcourt::models::common::OrderStatus;
use foodcourt::pricing::CartLine;
use foodcourt::test_utils::MockGateway;
use rust_decimal_macros::dec;

const CLIENT_URL: &str = "http://localhost:3000";

fn checkout_ops(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> (CheckoutOperations, Arc<MockGateway>) {
    let gateway = Arc::new(MockGateway::new());
    let ops = CheckoutOperations::new(pool.clone(), gateway.clone(), CLIENT_URL.to_string());
    (ops, gateway)
}

fn count_orders(pool: &Pool<ConnectionManager<PgConnection>>) -> i64 {
    use foodcourt::db::schema::orders::dsl::*;
    let mut conn = DbConnection::new(pool).expect("db connection");
    orders
        .count()
        .get_result(conn.connection())
        .expect("count orders")
}

#[actix_rt::test]
async fn pickup_checkout_creates_pending_order_with_session() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, gateway) = checkout_ops(&pool);

    let outcome = ops
        .create_checkout(
            fixtures.user_id,
            &[
                CartLine {
                    item_id: fixtures.menu_item_ids[0],
                    quantity: Some(2),
                },
                CartLine {
                    item_id: fixtures.menu_item_ids[1],
                    quantity: None,
                },
            ],
            "pickup",
            None,
        )
        .await
        .expect("checkout should succeed");

    assert_eq!(outcome.session_id, "cs_test_1");
    assert!(outcome.redirect_url.contains("cs_test_1"));

    let order_ops = OrderOperations::new(pool.clone());
    let details = order_ops
        .get_order_details(outcome.order_id)
        .expect("order details");
    assert_eq!(details.status, OrderStatus::Pending);
    // 2 x 8.99 + 1 x 3.50, repriced from the catalog
    assert_eq!(details.total_amount, dec!(21.48));
    assert_eq!(details.items.len(), 2);
    assert!(details.delivery_details.is_none());

    let requests = gateway.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].line_items.len(), 2);
    assert_eq!(requests[0].line_items[0].unit_amount, 899);
    assert!(requests[0]
        .success_url
        .contains("{CHECKOUT_SESSION_ID}"));
    assert!(requests[0].cancel_url.starts_with(CLIENT_URL));
    assert!(!requests[0].idempotency_key.is_empty());
}

#[actix_rt::test]
async fn duplicate_cart_lines_merge_into_one_order_line() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, gateway) = checkout_ops(&pool);

    let outcome = ops
        .create_checkout(
            fixtures.user_id,
            &[
                CartLine {
                    item_id: fixtures.menu_item_ids[0],
                    quantity: Some(1),
                },
                CartLine {
                    item_id: fixtures.menu_item_ids[0],
                    quantity: Some(2),
                },
            ],
            "pickup",
            None,
        )
        .await
        .expect("checkout should succeed");

    let order_ops = OrderOperations::new(pool.clone());
    let details = order_ops
        .get_order_details(outcome.order_id)
        .expect("order details");
    assert_eq!(details.items.len(), 1);
    assert_eq!(details.items[0].quantity, 3);
    assert_eq!(details.total_amount, dec!(26.97));

    // The gateway still sees the lines as submitted
    assert_eq!(gateway.recorded_requests()[0].line_items.len(), 2);
}

#[actix_rt::test]
async fn merged_quantities_saturate_instead_of_overflowing() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, _gateway) = checkout_ops(&pool);

    let outcome = ops
        .create_checkout(
            fixtures.user_id,
            &[
                CartLine {
                    item_id: fixtures.menu_item_ids[0],
                    quantity: Some(i32::MAX),
                },
                CartLine {
                    item_id: fixtures.menu_item_ids[0],
                    quantity: Some(5),
                },
            ],
            "pickup",
            None,
        )
        .await
        .expect("checkout should succeed");

    let order_ops = OrderOperations::new(pool.clone());
    let details = order_ops
        .get_order_details(outcome.order_id)
        .expect("order details");
    assert_eq!(details.items.len(), 1);
    assert_eq!(details.items[0].quantity, i32::MAX);
}

#[actix_rt::test]
async fn empty_cart_is_rejected() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, gateway) = checkout_ops(&pool);

    let result = ops
        .create_checkout(fixtures.user_id, &[], "pickup", None)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
    assert!(gateway.recorded_requests().is_empty());
    assert_eq!(count_orders(&pool), 0);
}

#[actix_rt::test]
async fn zero_quantity_is_rejected_before_persistence() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, gateway) = checkout_ops(&pool);

    let result = ops
        .create_checkout(
            fixtures.user_id,
            &[CartLine {
                item_id: fixtures.menu_item_ids[0],
                quantity: Some(0),
            }],
            "pickup",
            None,
        )
        .await;
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
    assert!(gateway.recorded_requests().is_empty());
    assert_eq!(count_orders(&pool), 0);
}

#[actix_rt::test]
async fn all_unknown_items_fail_without_an_order() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, gateway) = checkout_ops(&pool);

    let result = ops
        .create_checkout(
            fixtures.user_id,
            &[CartLine {
                item_id: 99999,
                quantity: Some(1),
            }],
            "pickup",
            None,
        )
        .await;
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
    assert!(gateway.recorded_requests().is_empty());
    assert_eq!(count_orders(&pool), 0);
}

#[actix_rt::test]
async fn invalid_fulfillment_is_rejected() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, _gateway) = checkout_ops(&pool);

    let result = ops
        .create_checkout(
            fixtures.user_id,
            &[CartLine {
                item_id: fixtures.menu_item_ids[0],
                quantity: Some(1),
            }],
            "dine-in",
            None,
        )
        .await;
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
}

#[actix_rt::test]
async fn delivery_requires_phone_and_address() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, _gateway) = checkout_ops(&pool);
    let cart = [CartLine {
        item_id: fixtures.menu_item_ids[0],
        quantity: Some(1),
    }];

    let result = ops
        .create_checkout(fixtures.user_id, &cart, "delivery", None)
        .await;
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));

    let blank_phone = DeliveryDetails {
        phone: "   ".to_string(),
        address: "12 High St".to_string(),
        notes: None,
        allergies: None,
    };
    let result = ops
        .create_checkout(fixtures.user_id, &cart, "delivery", Some(&blank_phone))
        .await;
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
    assert_eq!(count_orders(&pool), 0);
}

#[actix_rt::test]
async fn delivery_details_are_trimmed_and_stored() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, _gateway) = checkout_ops(&pool);

    let details = DeliveryDetails {
        phone: " 555-0101 ".to_string(),
        address: " 12 High St ".to_string(),
        notes: Some("Ring twice".to_string()),
        allergies: Some("peanuts".to_string()),
    };
    let outcome = ops
        .create_checkout(
            fixtures.user_id,
            &[CartLine {
                item_id: fixtures.menu_item_ids[1],
                quantity: Some(1),
            }],
            "delivery",
            Some(&details),
        )
        .await
        .expect("delivery checkout");

    let order_ops = OrderOperations::new(pool.clone());
    let loaded = order_ops
        .get_order_details(outcome.order_id)
        .expect("order details");
    let delivery = loaded.delivery_details.expect("delivery details stored");
    assert_eq!(delivery.phone, "555-0101");
    assert_eq!(delivery.address, "12 High St");
    assert_eq!(delivery.notes.as_deref(), Some("Ring twice"));
    assert_eq!(delivery.allergies.as_deref(), Some("peanuts"));
}

#[actix_rt::test]
async fn gateway_failure_marks_order_failed_and_hides_it() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let (ops, gateway) = checkout_ops(&pool);
    gateway.fail_next();

    let result = ops
        .create_checkout(
            fixtures.user_id,
            &[CartLine {
                item_id: fixtures.menu_item_ids[0],
                quantity: Some(1),
            }],
            "pickup",
            None,
        )
        .await;
    assert!(matches!(result.unwrap_err(), RepositoryError::Gateway(_)));

    // The draft row was kept and marked failed, with no session attached
    use foodcourt::db::schema::orders::dsl::*;
    let mut conn = DbConnection::new(&pool).expect("db connection");
    let (failed_status, failed_session): (OrderStatus, Option<String>) = orders
        .select((status, session_id))
        .first(conn.connection())
        .expect("order row");
    assert_eq!(failed_status, OrderStatus::Failed);
    assert_eq!(failed_session, None);

    let order_ops = OrderOperations::new(pool.clone());
    assert!(
        order_ops.get_all_orders().expect("listing").is_empty(),
        "failed checkouts never surface in listings"
    );
}
