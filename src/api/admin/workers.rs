use crate::api::error_status;
use crate::auth::extractors::AdminPrincipal;
use crate::db::WorkerOperations;
use crate::enums::admin::{
    GeneralResponse, NewScheduleRequest, ScheduleResponse, SchedulesResponse, WorkerResponse,
    WorkersResponse,
};
use crate::models::admin::NewWorker;
use actix_web::{delete, get, post, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Workers",
    path = "/workers",
    responses(
        (status = 200, description = "All workers, newest first", body = WorkersResponse)
    ),
    summary = "List workers (staff)"
)]
#[get("")]
pub(super) async fn get_workers(
    worker_ops: web::Data<WorkerOperations>,
    _admin: AdminPrincipal,
) -> impl Responder {
    match worker_ops.get_all_workers() {
        Ok(data) => HttpResponse::Ok().json(WorkersResponse {
            status: "ok".to_string(),
            data,
            error: None,
        }),
        Err(e) => {
            error!("WORKERS: get_workers(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(WorkersResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    post,
    tag = "Workers",
    path = "/workers",
    request_body = NewWorker,
    responses(
        (status = 200, description = "Worker created", body = WorkerResponse),
        (status = 400, description = "Name or role missing", body = WorkerResponse),
    ),
    summary = "Create a worker (staff)"
)]
#[post("")]
pub(super) async fn create_worker(
    worker_ops: web::Data<WorkerOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewWorker>,
) -> impl Responder {
    match worker_ops.create_worker(req_data.into_inner()) {
        Ok(worker) => {
            info!("New worker created: {}", worker.name);
            HttpResponse::Ok().json(WorkerResponse {
                status: "ok".to_string(),
                data: Some(worker),
                error: None,
            })
        }
        Err(e) => {
            error!("WORKERS: create_worker(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(WorkerResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Workers",
    path = "/workers/{id}",
    params(
        ("id", description = "Worker to delete"),
    ),
    responses(
        (status = 200, description = "Worker removed; assignments cleared, schedules deleted", body = GeneralResponse),
        (status = 404, description = "No such worker", body = GeneralResponse),
    ),
    summary = "Delete a worker (staff)"
)]
#[delete("/{id}")]
pub(super) async fn remove_worker(
    worker_ops: web::Data<WorkerOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match worker_ops.remove_worker(path.into_inner().0) {
        Ok(worker) => {
            info!("Worker removed: {}", worker.name);
            HttpResponse::Ok().json(GeneralResponse {
                status: "ok".to_string(),
                error: None,
            })
        }
        Err(e) => {
            error!("WORKERS: remove_worker(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Workers",
    path = "/workers/{id}/schedules",
    params(
        ("id", description = "Worker whose schedules to list"),
    ),
    responses(
        (status = 200, description = "Schedules ordered by start", body = SchedulesResponse)
    ),
    summary = "List a worker's schedules (staff)"
)]
#[get("/{id}/schedules")]
pub(super) async fn get_worker_schedules(
    worker_ops: web::Data<WorkerOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match worker_ops.get_schedules_for_worker(path.into_inner().0) {
        Ok(data) => HttpResponse::Ok().json(SchedulesResponse {
            status: "ok".to_string(),
            data,
            error: None,
        }),
        Err(e) => {
            error!("WORKERS: get_worker_schedules(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(SchedulesResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    post,
    tag = "Workers",
    path = "/workers/{id}/schedules",
    params(
        ("id", description = "Worker to schedule"),
    ),
    request_body = NewScheduleRequest,
    responses(
        (status = 200, description = "Schedule created", body = ScheduleResponse),
        (status = 400, description = "End not after start", body = ScheduleResponse),
        (status = 404, description = "No such worker", body = ScheduleResponse),
    ),
    summary = "Create a schedule for a worker (staff)"
)]
#[post("/{id}/schedules")]
pub(super) async fn create_worker_schedule(
    worker_ops: web::Data<WorkerOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
    req_data: web::Json<NewScheduleRequest>,
) -> impl Responder {
    let worker_id = path.into_inner().0;
    match worker_ops.create_schedule(worker_id, req_data.starts_at, req_data.ends_at) {
        Ok(schedule) => HttpResponse::Ok().json(ScheduleResponse {
            status: "ok".to_string(),
            data: Some(schedule),
            error: None,
        }),
        Err(e) => {
            error!("WORKERS: create_worker_schedule(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(ScheduleResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Workers",
    path = "/workers/schedules/{id}",
    params(
        ("id", description = "Schedule to delete"),
    ),
    responses(
        (status = 200, description = "Schedule removed", body = GeneralResponse),
        (status = 404, description = "No such schedule", body = GeneralResponse),
    ),
    summary = "Delete a schedule (staff)"
)]
#[delete("/schedules/{id}")]
pub(super) async fn remove_schedule(
    worker_ops: web::Data<WorkerOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match worker_ops.remove_schedule(path.into_inner().0) {
        Ok(_) => HttpResponse::Ok().json(GeneralResponse {
            status: "ok".to_string(),
            error: None,
        }),
        Err(e) => {
            error!("WORKERS: remove_schedule(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}
