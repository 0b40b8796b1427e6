mod common;

use foodcourt::db::{MenuOperations, RepositoryError};
use foodcourt::models::admin::{NewMenuItem, UpdateMenuItem};
use rust_decimal_macros::dec;

#[actix_rt::test]
async fn add_menu_item_success() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let new_item = NewMenuItem {
        name: "Paneer Tikka".to_string(),
        description: Some("Grilled paneer".to_string()),
        price: dec!(7.25),
        category: Some("Mains".to_string()),
        image_url: None,
        is_available: Some(true),
    };

    let result = menu_ops.add_menu_item(new_item);
    assert!(result.is_ok(), "add_menu_item should succeed: {:?}", result);
    let item = result.unwrap();
    assert_eq!(item.name, "Paneer Tikka");
    assert_eq!(item.price, dec!(7.25));
    assert!(item.is_available);
}

#[actix_rt::test]
async fn add_menu_item_rejects_negative_price() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let new_item = NewMenuItem {
        name: "Refund Special".to_string(),
        description: None,
        price: dec!(-1.00),
        category: None,
        image_url: None,
        is_available: None,
    };

    let result = menu_ops.add_menu_item(new_item);
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
}

#[actix_rt::test]
async fn zero_price_is_allowed() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let new_item = NewMenuItem {
        name: "Tap Water".to_string(),
        description: None,
        price: dec!(0.00),
        category: Some("Drinks".to_string()),
        image_url: None,
        is_available: Some(true),
    };

    let result = menu_ops.add_menu_item(new_item);
    assert!(result.is_ok(), "free items are valid: {:?}", result);
}

#[actix_rt::test]
async fn update_menu_item_partial() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let update = UpdateMenuItem {
        name: Some("Double Burger".to_string()),
        description: None,
        price: None,
        category: None,
        image_url: None,
        is_available: None,
    };

    let updated = menu_ops
        .update_menu_item(fixtures.menu_item_ids[0], update)
        .expect("update should succeed");
    assert_eq!(updated.name, "Double Burger");
    // Untouched fields keep their seeded values
    assert_eq!(updated.price, dec!(8.99));
}

#[actix_rt::test]
async fn update_menu_item_rejects_negative_price() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let update = UpdateMenuItem {
        name: None,
        description: None,
        price: Some(dec!(-0.01)),
        category: None,
        image_url: None,
        is_available: None,
    };

    let result = menu_ops.update_menu_item(fixtures.menu_item_ids[0], update);
    assert!(matches!(
        result.unwrap_err(),
        RepositoryError::ValidationError(_)
    ));
}

#[actix_rt::test]
async fn update_menu_item_not_found() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let update = UpdateMenuItem {
        name: Some("Ghost".to_string()),
        description: None,
        price: None,
        category: None,
        image_url: None,
        is_available: None,
    };

    let result = menu_ops.update_menu_item(99999, update);
    assert!(matches!(result.unwrap_err(), RepositoryError::NotFound(_)));
}

#[actix_rt::test]
async fn remove_menu_item_and_not_found() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let removed = menu_ops
        .remove_menu_item(fixtures.menu_item_ids[1])
        .expect("remove should succeed");
    assert_eq!(removed.name, "Fries");

    let result = menu_ops.remove_menu_item(fixtures.menu_item_ids[1]);
    assert!(matches!(result.unwrap_err(), RepositoryError::NotFound(_)));
}

#[actix_rt::test]
async fn listing_is_newest_first() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let items = menu_ops.get_available_menu_items().expect("fetch menu");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].item_id, fixtures.menu_item_ids[1]);
    assert_eq!(items[1].item_id, fixtures.menu_item_ids[0]);
}

#[actix_rt::test]
async fn delisted_items_are_hidden_from_the_menu() {
    let (pool, fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let update = UpdateMenuItem {
        name: None,
        description: None,
        price: None,
        category: None,
        image_url: None,
        is_available: Some(false),
    };
    menu_ops
        .update_menu_item(fixtures.menu_item_ids[0], update)
        .expect("delist item");

    let items = menu_ops.get_available_menu_items().expect("fetch menu");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_id, fixtures.menu_item_ids[1]);

    // Still fetchable by id for staff tooling
    let item = menu_ops
        .get_menu_item(fixtures.menu_item_ids[0])
        .expect("fetch delisted item");
    assert!(!item.is_available);
}

#[actix_rt::test]
async fn get_menu_item_not_found() {
    let (pool, _fixtures) = common::setup_pool_with_fixtures();
    let menu_ops = MenuOperations::new(pool);

    let result = menu_ops.get_menu_item(99999);
    assert!(matches!(result.unwrap_err(), RepositoryError::NotFound(_)));
}
