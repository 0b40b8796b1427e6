use crate::db::{DbConnection, RepositoryError};
use crate::enums::common::DeliveryDetails;
use crate::models::common::{FulfillmentType, NewOrder, OrderItemRow, OrderStatus};
use crate::payments::gateway::{CreateSessionRequest, PaymentGateway};
use crate::pricing::{price_cart, CartLine, CatalogEntry, PricedCart};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use log::{debug, error, info};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug)]
pub struct CheckoutOutcome {
    pub order_id: i32,
    pub session_id: String,
    pub redirect_url: String,
}

/// Checkout orchestrator: trusted repricing, draft order creation,
/// gateway session creation, draft -> pending promotion.
pub struct CheckoutOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
    gateway: Arc<dyn PaymentGateway>,
    client_url: String,
}

impl CheckoutOperations {
    pub fn new(
        pool: Pool<ConnectionManager<PgConnection>>,
        gateway: Arc<dyn PaymentGateway>,
        client_url: String,
    ) -> Self {
        Self {
            pool,
            gateway,
            client_url,
        }
    }

    /// Creates a checkout: validates the cart, reprices it against the
    /// catalog, persists a draft order, opens a gateway session and
    /// promotes the order to pending with the session id attached.
    ///
    /// The order row exists before the gateway call, so a crash between
    /// the two leaves a draft (or failed) row rather than an order
    /// pointing at a dead session.
    pub async fn create_checkout(
        &self,
        user_id: i32,
        cart_lines: &[CartLine],
        fulfillment: &str,
        delivery_details: Option<&DeliveryDetails>,
    ) -> Result<CheckoutOutcome, RepositoryError> {
        if cart_lines.is_empty() {
            return Err(RepositoryError::ValidationError(
                "Cart is empty".to_string(),
            ));
        }
        let fulfillment = FulfillmentType::parse(fulfillment).ok_or_else(|| {
            RepositoryError::ValidationError("Invalid order type".to_string())
        })?;
        let delivery = validate_delivery_details(fulfillment, delivery_details)?;
        if cart_lines.iter().any(|l| matches!(l.quantity, Some(q) if q < 1)) {
            return Err(RepositoryError::ValidationError(
                "Item quantity must be at least 1".to_string(),
            ));
        }

        let priced = self.reprice(cart_lines)?;
        if priced.gateway_line_items.is_empty() {
            return Err(RepositoryError::ValidationError(
                "No valid items in cart".to_string(),
            ));
        }

        let order_id = self.insert_draft_order(user_id, &priced, fulfillment, delivery)?;

        let session_request = CreateSessionRequest {
            line_items: priced.gateway_line_items,
            success_url: format!(
                "{}/payment-success?session_id={{CHECKOUT_SESSION_ID}}",
                self.client_url
            ),
            cancel_url: format!("{}/payment-cancelled", self.client_url),
            idempotency_key: Uuid::new_v4().to_string(),
        };
        let session = match self.gateway.create_checkout_session(&session_request).await {
            Ok(session) => session,
            Err(e) => {
                error!(
                    "create_checkout: gateway session failed for draft order {}: {}",
                    order_id, e
                );
                self.mark_order_failed(order_id);
                return Err(RepositoryError::Gateway(e));
            }
        };

        self.promote_draft(order_id, &session.id)?;
        info!(
            "create_checkout: order {} pending with session {} for user {}",
            order_id, session.id, user_id
        );

        Ok(CheckoutOutcome {
            order_id,
            session_id: session.id,
            redirect_url: session.url,
        })
    }

    /// Resolves the cart against the catalog in one batch and reprices
    /// it. Unknown ids are dropped by the pricer, not reported.
    fn reprice(&self, cart_lines: &[CartLine]) -> Result<PricedCart, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("create_checkout: failed to acquire DB connection: {}", e);
            e
        })?;

        let ids: Vec<i32> = cart_lines.iter().map(|l| l.item_id).collect();
        let catalog: Vec<(i32, String, Decimal)>;
        {
            use crate::db::schema::menu_items::dsl::*;
            catalog = menu_items
                .filter(item_id.eq_any(&ids))
                .select((item_id, name, price))
                .load::<(i32, String, Decimal)>(conn.connection())
                .map_err(|e| {
                    error!(
                        "create_checkout: error loading menu items for ids {:?}: {}",
                        ids, e
                    );
                    RepositoryError::DatabaseError(e)
                })?;
        }
        let catalog: Vec<CatalogEntry> = catalog
            .into_iter()
            .map(|(id, item_name, item_price)| CatalogEntry {
                item_id: id,
                name: item_name,
                price: item_price,
            })
            .collect();

        Ok(price_cart(&catalog, cart_lines))
    }

    fn insert_draft_order(
        &self,
        order_user_id: i32,
        priced: &PricedCart,
        order_fulfillment: FulfillmentType,
        delivery: Option<DeliveryDetails>,
    ) -> Result<i32, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("insert_draft_order: failed to acquire DB connection: {}", e);
            e
        })?;

        // Duplicate cart lines for the same item collapse into one row;
        // the merged quantity saturates instead of overflowing.
        let mut quantities: HashMap<i32, i32> = HashMap::new();
        for line in &priced.resolved_lines {
            let merged = quantities.entry(line.item_id).or_insert(0);
            *merged = merged.saturating_add(line.quantity);
        }

        conn.connection().transaction(|conn| {
            let new_order = NewOrder {
                user_id: order_user_id,
                total_amount: priced.order_total,
                fulfillment: order_fulfillment,
                status: OrderStatus::Draft,
                phone: delivery.as_ref().map(|d| d.phone.clone()),
                address: delivery.as_ref().map(|d| d.address.clone()),
                notes: delivery.as_ref().and_then(|d| d.notes.clone()),
                allergies: delivery.as_ref().and_then(|d| d.allergies.clone()),
            };

            let new_order_id: i32;
            {
                use crate::db::schema::orders::dsl::*;
                new_order_id = diesel::insert_into(orders)
                    .values(&new_order)
                    .returning(order_id)
                    .get_result::<i32>(conn)
                    .map_err(RepositoryError::DatabaseError)?;
            }

            {
                let rows: Vec<OrderItemRow> = quantities
                    .iter()
                    .map(|(&line_item_id, &line_quantity)| OrderItemRow {
                        order_id: new_order_id,
                        item_id: line_item_id,
                        quantity: line_quantity,
                    })
                    .collect();
                use crate::db::schema::order_items::dsl::*;
                diesel::insert_into(order_items)
                    .values(&rows)
                    .execute(conn)
                    .map_err(RepositoryError::DatabaseError)?;
            }

            debug!(
                "insert_draft_order: draft order {} for user {} totalling {}",
                new_order_id, order_user_id, priced.order_total
            );
            Ok(new_order_id)
        })
    }

    /// Atomically attaches the session id and flips draft -> pending.
    fn promote_draft(&self, draft_order_id: i32, gateway_session_id: &str) -> Result<(), RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;
        use crate::db::schema::orders::dsl::*;
        let updated = diesel::update(
            orders
                .filter(order_id.eq(draft_order_id))
                .filter(status.eq(OrderStatus::Draft)),
        )
        .set((status.eq(OrderStatus::Pending), session_id.eq(gateway_session_id)))
        .execute(conn.connection())
        .map_err(RepositoryError::DatabaseError)?;

        if updated == 0 {
            return Err(RepositoryError::NotFound(format!(
                "orders: draft {draft_order_id} vanished before promotion"
            )));
        }
        Ok(())
    }

    /// Best-effort: the caller is already surfacing a gateway error, so a
    /// failure here is only logged.
    fn mark_order_failed(&self, failed_order_id: i32) {
        let result = DbConnection::new(&self.pool).and_then(|mut conn| {
            use crate::db::schema::orders::dsl::*;
            diesel::update(orders.filter(order_id.eq(failed_order_id)))
                .set(status.eq(OrderStatus::Failed))
                .execute(conn.connection())
                .map_err(RepositoryError::DatabaseError)
        });
        if let Err(e) = result {
            error!(
                "mark_order_failed: could not mark order {} failed: {}",
                failed_order_id, e
            );
        }
    }
}

fn validate_delivery_details(
    fulfillment: FulfillmentType,
    details: Option<&DeliveryDetails>,
) -> Result<Option<DeliveryDetails>, RepositoryError> {
    match fulfillment {
        FulfillmentType::Pickup => Ok(None),
        FulfillmentType::Delivery => {
            let details = details.ok_or_else(|| {
                RepositoryError::ValidationError(
                    "Phone number and address are required for delivery".to_string(),
                )
            })?;
            let phone = details.phone.trim();
            let address = details.address.trim();
            if phone.is_empty() || address.is_empty() {
                return Err(RepositoryError::ValidationError(
                    "Phone number and address are required for delivery".to_string(),
                ));
            }
            Ok(Some(DeliveryDetails {
                phone: phone.to_string(),
                address: address.to_string(),
                notes: details.notes.clone(),
                allergies: details.allergies.clone(),
            }))
        }
    }
}

impl Clone for CheckoutOperations {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            gateway: self.gateway.clone(),
            client_url: self.client_url.clone(),
        }
    }
}
