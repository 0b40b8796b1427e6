use crate::db::{DbConnection, RepositoryError};
use crate::enums::common::{DeliveryDetails, OrderDetails, OrderLineDetail, OrderUser};
use crate::models::common::{FulfillmentType, Order, OrderStatus};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::PgConnection;
use log::{debug, error, info};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Order status/assignment manager plus the populated read paths.
#[derive(Clone)]
pub struct OrderOperations {
    pool: Pool<ConnectionManager<PgConnection>>,
}

impl OrderOperations {
    pub fn new(pool: Pool<ConnectionManager<PgConnection>>) -> Self {
        Self { pool }
    }

    /// Webhook-driven transition: flips the order holding this gateway
    /// session to paid in one atomic update. Returns whether a row
    /// matched; an unmatched session id is the caller's no-op, not an
    /// error. Repeated delivery of the same event is idempotent.
    pub fn mark_paid_by_session(&self, gateway_session_id: &str) -> Result<bool, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "mark_paid_by_session: failed to acquire DB connection: {}",
                e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let updated = diesel::update(orders.filter(session_id.eq(gateway_session_id)))
            .set(status.eq(OrderStatus::Paid))
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "mark_paid_by_session: error updating order for session '{}': {}",
                    gateway_session_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;

        if updated > 0 {
            info!(
                "mark_paid_by_session: order for session '{}' marked paid",
                gateway_session_id
            );
        } else {
            debug!(
                "mark_paid_by_session: no order for session '{}', ignoring",
                gateway_session_id
            );
        }
        Ok(updated > 0)
    }

    /// Staff-driven status change. Any of the five settable values may be
    /// applied from any current state; anything else is a validation
    /// error and the order is untouched.
    pub fn set_status(
        &self,
        search_order_id: i32,
        new_status: &str,
    ) -> Result<OrderDetails, RepositoryError> {
        let parsed = OrderStatus::from_admin_value(new_status).ok_or_else(|| {
            RepositoryError::ValidationError(format!("Invalid status value: {new_status}"))
        })?;

        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "set_status: failed to acquire DB connection for order_id {}: {}",
                search_order_id, e
            );
            e
        })?;

        use crate::db::schema::orders::dsl::*;
        let updated = diesel::update(orders.filter(order_id.eq(search_order_id)))
            .set(status.eq(parsed))
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "set_status: error updating order {}: {}",
                    search_order_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if updated == 0 {
            return Err(RepositoryError::NotFound(format!(
                "orders: {search_order_id}"
            )));
        }

        info!(
            "set_status: order {} set to {}",
            search_order_id,
            parsed.as_str()
        );
        self.get_order_details(search_order_id)
    }

    /// Sets or clears the worker assignment. An assigned worker must
    /// exist and be active.
    pub fn assign_worker(
        &self,
        search_order_id: i32,
        worker: Option<i32>,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "assign_worker: failed to acquire DB connection for order_id {}: {}",
                search_order_id, e
            );
            e
        })?;

        if let Some(search_worker_id) = worker {
            use crate::db::schema::workers::dsl::*;
            let worker_active = workers
                .filter(worker_id.eq(search_worker_id))
                .select(active)
                .first::<bool>(conn.connection())
                .optional()
                .map_err(RepositoryError::DatabaseError)?
                .ok_or_else(|| {
                    RepositoryError::NotFound(format!("workers: {search_worker_id}"))
                })?;
            if !worker_active {
                return Err(RepositoryError::ValidationError(format!(
                    "Worker {search_worker_id} is not active"
                )));
            }
        }

        use crate::db::schema::orders::dsl::*;
        let updated = diesel::update(orders.filter(order_id.eq(search_order_id)))
            .set(assigned_worker_id.eq(worker))
            .execute(conn.connection())
            .map_err(|e| {
                error!(
                    "assign_worker: error updating order {}: {}",
                    search_order_id, e
                );
                RepositoryError::DatabaseError(e)
            })?;
        if updated == 0 {
            return Err(RepositoryError::NotFound(format!(
                "orders: {search_order_id}"
            )));
        }

        info!(
            "assign_worker: order {} assigned to {:?}",
            search_order_id, worker
        );
        self.get_order_details(search_order_id)
    }

    pub fn get_order_details(
        &self,
        search_order_id: i32,
    ) -> Result<OrderDetails, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool)?;
        let mut details = Self::load_order_details(
            conn.connection(),
            Some(search_order_id),
            None,
        )?;
        details.pop().ok_or_else(|| {
            RepositoryError::NotFound(format!("orders: {search_order_id}"))
        })
    }

    /// All non-draft orders, newest first, with user and catalog data
    /// populated.
    pub fn get_all_orders(&self) -> Result<Vec<OrderDetails>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!("get_all_orders: failed to acquire DB connection: {}", e);
            e
        })?;
        Self::load_order_details(conn.connection(), None, None)
    }

    pub fn get_orders_by_userid(
        &self,
        search_user_id: i32,
    ) -> Result<Vec<OrderDetails>, RepositoryError> {
        let mut conn = DbConnection::new(&self.pool).map_err(|e| {
            error!(
                "get_orders_by_userid: failed to acquire DB connection for user_id {}: {}",
                search_user_id, e
            );
            e
        })?;
        Self::load_order_details(conn.connection(), None, Some(search_user_id))
    }

    fn load_order_details(
        conn: &mut PgConnection,
        filter_order_id: Option<i32>,
        filter_user_id: Option<i32>,
    ) -> Result<Vec<OrderDetails>, RepositoryError> {
        use crate::db::schema::{order_items, orders, users};

        let mut query = orders::table
            .inner_join(users::table)
            .select((orders::all_columns, (users::name, users::email)))
            .order_by(orders::created_at.desc())
            .into_boxed();
        if let Some(id) = filter_order_id {
            query = query.filter(orders::order_id.eq(id));
        } else {
            // Drafts and failed checkouts never surface in listings.
            query = query.filter(orders::status.ne(OrderStatus::Draft));
            query = query.filter(orders::status.ne(OrderStatus::Failed));
        }
        if let Some(id) = filter_user_id {
            query = query.filter(orders::user_id.eq(id));
        }

        let rows: Vec<(Order, (String, String))> = query
            .load::<(Order, (String, String))>(conn)
            .map_err(|e| {
                error!("load_order_details: error loading orders: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let order_ids: Vec<i32> = rows.iter().map(|(o, _)| o.order_id).collect();
        let line_rows: Vec<(i32, i32, String, Decimal, i32)> = order_items::table
            .inner_join(crate::db::schema::menu_items::table)
            .filter(order_items::order_id.eq_any(&order_ids))
            .select((
                order_items::order_id,
                order_items::item_id,
                crate::db::schema::menu_items::name,
                crate::db::schema::menu_items::price,
                order_items::quantity,
            ))
            .load(conn)
            .map_err(|e| {
                error!("load_order_details: error loading order items: {}", e);
                RepositoryError::DatabaseError(e)
            })?;

        let mut grouped: HashMap<i32, Vec<OrderLineDetail>> = HashMap::new();
        for (line_order_id, line_item_id, item_name, item_price, line_quantity) in line_rows {
            grouped.entry(line_order_id).or_default().push(OrderLineDetail {
                item_id: line_item_id,
                name: item_name,
                price: item_price,
                quantity: line_quantity,
            });
        }

        Ok(rows
            .into_iter()
            .map(|(order, (user_name, user_email))| {
                let items = grouped.remove(&order.order_id).unwrap_or_default();
                let delivery_details = match order.fulfillment {
                    FulfillmentType::Delivery => Some(DeliveryDetails {
                        phone: order.phone.unwrap_or_default(),
                        address: order.address.unwrap_or_default(),
                        notes: order.notes,
                        allergies: order.allergies,
                    }),
                    FulfillmentType::Pickup => None,
                };
                OrderDetails {
                    order_id: order.order_id,
                    user: OrderUser {
                        name: user_name,
                        email: user_email,
                    },
                    items,
                    total_amount: order.total_amount,
                    fulfillment: order.fulfillment,
                    status: order.status,
                    delivery_details,
                    assigned_worker_id: order.assigned_worker_id,
                    created_at: order.created_at,
                }
            })
            .collect())
    }
}
