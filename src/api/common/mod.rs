pub mod menu;
pub mod orders;

use crate::AppState;
use actix_web::middleware::NormalizePath;
use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig, state: &AppState) {
    cfg.service(
        web::scope("/menu")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.menu_ops.clone()))
            .service(menu::get_menu)
            .service(menu::get_menu_item)
            .service(menu::create_menu_item)
            .service(menu::update_menu_item)
            .service(menu::remove_menu_item),
    )
    .service(
        web::scope("/orders")
            .wrap(NormalizePath::trim())
            .app_data(web::Data::new(state.order_ops.clone()))
            .service(orders::get_my_orders)
            .service(orders::get_all_orders)
            .service(orders::update_order_status)
            .service(orders::assign_order_worker),
    );
}
