#[macro_use]
extern crate log;

pub mod api;
pub mod auth;
pub mod db;
pub mod enums;
pub mod models;
pub mod payments;
pub mod pricing;
pub mod test_utils;

use std::sync::Arc;

use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;

use crate::db::{
    run_db_migrations, CheckoutOperations, MenuOperations, OrderOperations, WorkerOperations,
};
use crate::payments::gateway::{HostedCheckoutGateway, PaymentGateway};
use crate::payments::PaymentsConfig;

#[derive(Clone)]
pub struct AppState {
    pub menu_ops: MenuOperations,
    pub order_ops: OrderOperations,
    pub worker_ops: WorkerOperations,
    pub checkout_ops: CheckoutOperations,
    pub payments: PaymentsConfig,
}

impl AppState {
    /// Builds application state over an existing pool, with the payment
    /// gateway injected. Tests pass a mock gateway here.
    pub fn new(
        pool: Pool<ConnectionManager<PgConnection>>,
        gateway: Arc<dyn PaymentGateway>,
        payments: PaymentsConfig,
    ) -> Self {
        run_db_migrations(pool.clone()).expect("Unable to run migrations");

        let menu_ops = MenuOperations::new(pool.clone());
        let order_ops = OrderOperations::new(pool.clone());
        let worker_ops = WorkerOperations::new(pool.clone());
        let checkout_ops =
            CheckoutOperations::new(pool, gateway, payments.client_url.clone());

        AppState {
            menu_ops,
            order_ops,
            worker_ops,
            checkout_ops,
            payments,
        }
    }

    pub fn from_env(url: &str) -> Self {
        let pool = db::establish_connection_pool(url);
        let payments = PaymentsConfig::from_env()
            .expect("PAYMENT_SECRET_KEY and PAYMENT_WEBHOOK_SECRET must be set");
        let gateway = Arc::new(HostedCheckoutGateway::new(&payments));
        Self::new(pool, gateway, payments)
    }
}
