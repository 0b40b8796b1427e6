use crate::models::common::{FulfillmentType, OrderStatus};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One order line populated with current catalog data.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OrderLineDetail {
    pub item_id: i32,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OrderUser {
    pub name: String,
    pub email: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct DeliveryDetails {
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub allergies: Option<String>,
}

/// An order as returned to clients: user and line-item catalog data
/// populated on read.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct OrderDetails {
    pub order_id: i32,
    pub user: OrderUser,
    pub items: Vec<OrderLineDetail>,
    pub total_amount: Decimal,
    pub fulfillment: FulfillmentType,
    pub status: OrderStatus,
    pub delivery_details: Option<DeliveryDetails>,
    pub assigned_worker_id: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct WebhookAck {
    pub received: bool,
}
