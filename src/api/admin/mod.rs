mod workers;

use crate::AppState;
use actix_web::middleware::NormalizePath;
use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/workers")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.worker_ops.clone()))
            .service(workers::get_workers)
            .service(workers::create_worker)
            .service(workers::remove_schedule)
            .service(workers::get_worker_schedules)
            .service(workers::create_worker_schedule)
            .service(workers::remove_worker),
    );
}
