use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError};
use crate::models::admin::{NewMenuItem, NewWorker};
use crate::payments::gateway::{
    CheckoutSession, CreateSessionRequest, GatewayError, PaymentGateway,
};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, Once};

// Fixture strategy:
// - Build users/menu items/workers via helpers below.
// - Checkout flows take a MockGateway so no network leaves the test.
const TEST_JWT_SECRET: &str = "test-jwt-secret";
const TEST_DEV_BYPASS_TOKEN: &str = "test-bypass-token";
const TEST_PAYMENT_SECRET_KEY: &str = "sk_test_fixture";
const TEST_PAYMENT_WEBHOOK_SECRET: &str = "whsec_test_fixture";
const TEST_CLIENT_URL: &str = "http://localhost:3000";
static TEST_THREADS_GUARD: Once = Once::new();

fn ensure_single_threaded_tests() {
    TEST_THREADS_GUARD.call_once(|| {
        let threads = test_threads_from_args().or_else(|| std::env::var("RUST_TEST_THREADS").ok());
        if threads.as_deref() != Some("1") {
            panic!(
                "Tests must run with --test-threads=1 or RUST_TEST_THREADS=1 because init_test_env mutates environment variables."
            );
        }
    });
}

fn test_threads_from_args() -> Option<String> {
    let mut args = std::env::args();
    while let Some(arg) = args.next() {
        if arg == "--test-threads" {
            return args.next();
        }
        if let Some(value) = arg.strip_prefix("--test-threads=") {
            return Some(value.to_string());
        }
    }
    None
}

fn set_env_if_unset(key: &str, value: &str) {
    if std::env::var_os(key).is_none() {
        std::env::set_var(key, value);
    }
}

pub fn init_test_env() {
    ensure_single_threaded_tests();
    set_env_if_unset("JWT_SECRET", TEST_JWT_SECRET);
    set_env_if_unset("DEV_BYPASS_TOKEN", TEST_DEV_BYPASS_TOKEN);
    set_env_if_unset("PAYMENT_SECRET_KEY", TEST_PAYMENT_SECRET_KEY);
    set_env_if_unset("PAYMENT_WEBHOOK_SECRET", TEST_PAYMENT_WEBHOOK_SECRET);
    set_env_if_unset("CLIENT_URL", TEST_CLIENT_URL);
}

pub fn build_test_pool(database_url: &str) -> Pool<ConnectionManager<PgConnection>> {
    let pool = establish_connection_pool(database_url);
    run_db_migrations(pool.clone()).expect("Unable to run migrations");
    pool
}

pub fn reset_db(pool: &Pool<ConnectionManager<PgConnection>>) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(pool)?;
    diesel::sql_query(
        "TRUNCATE TABLE order_items, orders, worker_schedules, workers, menu_items, users \
         RESTART IDENTITY CASCADE",
    )
    .execute(conn.connection())
    .map_err(RepositoryError::DatabaseError)?;
    Ok(())
}

pub struct TestFixtures {
    pub user_id: i32,
    pub menu_item_ids: Vec<i32>,
    pub worker_id: i32,
}

pub fn seed_basic_fixtures(
    pool: &Pool<ConnectionManager<PgConnection>>,
) -> Result<TestFixtures, RepositoryError> {
    let mut conn = DbConnection::new(pool)?;

    let user_id = insert_user(conn.connection(), "User One", "user1@example.com")?;
    let burger_id = seed_menu_item(
        conn.connection(),
        "Classic Burger",
        Decimal::new(899, 2),
        Some("Mains"),
        true,
    )?;
    let fries_id = seed_menu_item(
        conn.connection(),
        "Fries",
        Decimal::new(350, 2),
        Some("Sides"),
        true,
    )?;
    let worker_id = insert_worker(conn.connection(), "Sam Cook", "chef", true)?;

    Ok(TestFixtures {
        user_id,
        menu_item_ids: vec![burger_id, fries_id],
        worker_id,
    })
}

pub fn insert_user(
    conn: &mut PgConnection,
    name_val: &str,
    email_val: &str,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::users::dsl::*;

    diesel::insert_into(users)
        .values((name.eq(name_val), email.eq(email_val)))
        .returning(user_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn seed_menu_item(
    conn: &mut PgConnection,
    name_val: &str,
    price_val: Decimal,
    category_val: Option<&str>,
    is_available_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::menu_items::dsl::*;

    let new_item = NewMenuItem {
        name: name_val.to_string(),
        description: None,
        price: price_val,
        category: category_val.map(|val| val.to_string()),
        image_url: None,
        is_available: Some(is_available_val),
    };

    diesel::insert_into(menu_items)
        .values(&new_item)
        .returning(item_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

pub fn insert_worker(
    conn: &mut PgConnection,
    name_val: &str,
    role_val: &str,
    active_val: bool,
) -> Result<i32, RepositoryError> {
    use crate::db::schema::workers::dsl::*;

    let new_worker = NewWorker {
        name: name_val.to_string(),
        role: role_val.to_string(),
        phone: None,
        active: Some(active_val),
    };

    diesel::insert_into(workers)
        .values(&new_worker)
        .returning(worker_id)
        .get_result(conn)
        .map_err(RepositoryError::DatabaseError)
}

/// Gateway double that records every create request. Flip `fail_next`
/// to make the following call return a rejection.
pub struct MockGateway {
    requests: Mutex<Vec<CreateSessionRequest>>,
    fail_next: AtomicBool,
    counter: AtomicU32,
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_next: AtomicBool::new(false),
            counter: AtomicU32::new(0),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    pub fn recorded_requests(&self) -> Vec<CreateSessionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn create_checkout_session(
        &self,
        request: &CreateSessionRequest,
    ) -> Result<CheckoutSession, GatewayError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(GatewayError::Rejected {
                status: 402,
                message: "card setup refused".to_string(),
            });
        }
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(CheckoutSession {
            id: format!("cs_test_{n}"),
            url: format!("https://pay.example.test/session/cs_test_{n}"),
        })
    }
}
