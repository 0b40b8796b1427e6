use chrono::{DateTime, Utc};
use diesel::deserialize::{self, FromSql, FromSqlRow};
use diesel::expression::AsExpression;
use diesel::pg::{Pg, PgValue};
use diesel::serialize::{self, IsNull, Output, ToSql};
use diesel::sql_types::Text;
use diesel::{Associations, Identifiable, Insertable, Queryable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use utoipa::ToSchema;

/// Full order status set. `Draft` and `Failed` are internal to checkout
/// orchestration; the webhook sets `Paid`; staff may set the five values
/// accepted by [`OrderStatus::from_admin_value`].
#[derive(
    AsExpression, FromSqlRow, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Pending,
    Paid,
    Preparing,
    Delivered,
    Completed,
    Cancelled,
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Failed => "failed",
        }
    }

    /// Parses a staff-supplied status. Only the five externally settable
    /// values are accepted; `draft`, `failed` and `paid` are rejected.
    pub fn from_admin_value(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "preparing" => Some(OrderStatus::Preparing),
            "delivered" => Some(OrderStatus::Delivered),
            "completed" => Some(OrderStatus::Completed),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    fn from_db_value(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(OrderStatus::Draft),
            "paid" => Some(OrderStatus::Paid),
            "failed" => Some(OrderStatus::Failed),
            other => Self::from_admin_value(other),
        }
    }
}

impl ToSql<Text, Pg> for OrderStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for OrderStatus {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = std::str::from_utf8(bytes.as_bytes())?;
        Self::from_db_value(raw).ok_or_else(|| format!("Unknown order status: {raw}").into())
    }
}

#[derive(
    AsExpression, FromSqlRow, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "lowercase")]
pub enum FulfillmentType {
    Delivery,
    Pickup,
}

impl FulfillmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentType::Delivery => "delivery",
            FulfillmentType::Pickup => "pickup",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "delivery" => Some(FulfillmentType::Delivery),
            "pickup" => Some(FulfillmentType::Pickup),
            _ => None,
        }
    }
}

impl ToSql<Text, Pg> for FulfillmentType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(self.as_str().as_bytes())?;
        Ok(IsNull::No)
    }
}

impl FromSql<Text, Pg> for FulfillmentType {
    fn from_sql(bytes: PgValue<'_>) -> deserialize::Result<Self> {
        let raw = std::str::from_utf8(bytes.as_bytes())?;
        Self::parse(raw).ok_or_else(|| format!("Unknown fulfillment type: {raw}").into())
    }
}

#[derive(Queryable, Debug, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = crate::db::schema::orders)]
#[diesel(primary_key(order_id))]
pub struct Order {
    pub order_id: i32,
    pub user_id: i32,
    pub total_amount: Decimal,
    pub fulfillment: FulfillmentType,
    pub status: OrderStatus,
    pub session_id: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub allergies: Option<String>,
    pub assigned_worker_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::orders)]
pub struct NewOrder {
    pub user_id: i32,
    pub total_amount: Decimal,
    pub fulfillment: FulfillmentType,
    pub status: OrderStatus,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub allergies: Option<String>,
}

#[derive(Queryable, Insertable, Associations, Debug)]
#[diesel(table_name = crate::db::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItemRow {
    pub order_id: i32,
    pub item_id: i32,
    pub quantity: i32,
}
