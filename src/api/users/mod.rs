mod checkout;

use crate::AppState;
use actix_web::middleware::NormalizePath;
use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/checkout")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.checkout_ops.clone()))
            .service(checkout::create_checkout),
    );
}
