use crate::enums::common::{DeliveryDetails, OrderDetails};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Debug, Clone, ToSchema)]
pub struct CartLineRequest {
    #[serde(rename = "itemId")]
    pub item_id: i32,
    pub quantity: Option<i32>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CheckoutRequest {
    pub items: Vec<CartLineRequest>,
    #[serde(rename = "type")]
    pub fulfillment: String,
    #[serde(rename = "deliveryDetails")]
    pub delivery_details: Option<DeliveryDetails>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct CheckoutResponse {
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "orderId")]
    pub order_id: i32,
}

#[derive(Serialize, ToSchema)]
pub struct MyOrdersResponse {
    pub status: String,
    pub data: Vec<OrderDetails>,
    pub error: Option<String>,
}
