use crate::api::error_status;
use crate::auth::extractors::{AdminPrincipal, UserPrincipal};
use crate::db::OrderOperations;
use crate::enums::admin::{
    AssignWorkerRequest, OrderResponse, OrdersResponse, UpdateStatusRequest,
};
use crate::enums::users::MyOrdersResponse;
use actix_web::{get, patch, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/orders/my",
    responses(
        (status = 200, description = "Authenticated user's orders, newest first", body = MyOrdersResponse)
    ),
    summary = "List the caller's orders"
)]
#[get("/my")]
pub(super) async fn get_my_orders(
    order_ops: web::Data<OrderOperations>,
    principal: UserPrincipal,
) -> impl Responder {
    match order_ops.get_orders_by_userid(principal.user_id()) {
        Ok(data) => {
            debug!(
                "get_my_orders: retrieved {} orders for user_id {}",
                data.len(),
                principal.user_id()
            );
            HttpResponse::Ok().json(MyOrdersResponse {
                status: "ok".to_string(),
                data,
                error: None,
            })
        }
        Err(e) => {
            error!("ORDERS: get_my_orders(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(MyOrdersResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Orders",
    path = "/orders",
    responses(
        (status = 200, description = "All orders, newest first", body = OrdersResponse)
    ),
    summary = "List all orders (staff)"
)]
#[get("")]
pub(super) async fn get_all_orders(
    order_ops: web::Data<OrderOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    match order_ops.get_all_orders() {
        Ok(data) => HttpResponse::Ok().json(OrdersResponse {
            status: "ok".to_string(),
            data,
            error: None,
        }),
        Err(e) => {
            error!("ORDERS: get_all_orders(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(OrdersResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    patch,
    tag = "Orders",
    path = "/orders/{id}/status",
    params(
        ("id", description = "Order to update"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderResponse),
        (status = 400, description = "Invalid status value", body = OrderResponse),
        (status = 404, description = "No such order", body = OrderResponse),
    ),
    summary = "Set an order's status (staff)"
)]
#[patch("/{id}/status")]
pub(super) async fn update_order_status(
    order_ops: web::Data<OrderOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    match order_ops.set_status(order_id, &req_data.status) {
        Ok(order) => HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(order),
            error: None,
        }),
        Err(e) => {
            error!("ORDERS: update_order_status(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    patch,
    tag = "Orders",
    path = "/orders/{id}/assign",
    params(
        ("id", description = "Order to update"),
    ),
    request_body = AssignWorkerRequest,
    responses(
        (status = 200, description = "Assignment updated", body = OrderResponse),
        (status = 404, description = "No such order or worker", body = OrderResponse),
    ),
    summary = "Assign or clear an order's worker (staff)"
)]
#[patch("/{id}/assign")]
pub(super) async fn assign_order_worker(
    order_ops: web::Data<OrderOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<AssignWorkerRequest>,
) -> impl Responder {
    let order_id = path.into_inner().0;
    match order_ops.assign_worker(order_id, req_data.worker_id) {
        Ok(order) => HttpResponse::Ok().json(OrderResponse {
            status: "ok".to_string(),
            data: Some(order),
            error: None,
        }),
        Err(e) => {
            error!("ORDERS: assign_order_worker(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(OrderResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}
