use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Queryable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::menu_items)]
#[diesel(primary_key(item_id))]
pub struct MenuItem {
    pub item_id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::menu_items)]
pub struct NewMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, AsChangeset, ToSchema)]
#[diesel(table_name = crate::db::schema::menu_items)]
pub struct UpdateMenuItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub is_available: Option<bool>,
}

#[derive(Queryable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::workers)]
#[diesel(primary_key(worker_id))]
pub struct Worker {
    pub worker_id: i32,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable, Debug, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::workers)]
pub struct NewWorker {
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub active: Option<bool>,
}

#[derive(Queryable, Debug, Clone, Identifiable, Serialize, Deserialize, ToSchema)]
#[diesel(table_name = crate::db::schema::worker_schedules)]
#[diesel(primary_key(schedule_id))]
pub struct WorkerSchedule {
    pub schedule_id: i32,
    pub worker_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::db::schema::worker_schedules)]
pub struct NewWorkerSchedule {
    pub worker_id: i32,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
}
