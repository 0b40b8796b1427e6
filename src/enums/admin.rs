use crate::enums::common::OrderDetails;
use crate::models::admin::{MenuItem, Worker, WorkerSchedule};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct GeneralResponse {
    pub status: String,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct AllItemsResponse {
    pub status: String,
    pub data: Vec<MenuItem>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ItemResponse {
    pub status: String,
    pub data: Option<MenuItem>,
    pub error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    pub item_id: i32,
    pub update: crate::models::admin::UpdateMenuItem,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AssignWorkerRequest {
    #[serde(rename = "workerId")]
    pub worker_id: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct OrderResponse {
    pub status: String,
    pub data: Option<OrderDetails>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct OrdersResponse {
    pub status: String,
    pub data: Vec<OrderDetails>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct WorkersResponse {
    pub status: String,
    pub data: Vec<Worker>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct WorkerResponse {
    pub status: String,
    pub data: Option<Worker>,
    pub error: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct NewScheduleRequest {
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Serialize, ToSchema)]
pub struct SchedulesResponse {
    pub status: String,
    pub data: Vec<WorkerSchedule>,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub status: String,
    pub data: Option<WorkerSchedule>,
    pub error: Option<String>,
}
