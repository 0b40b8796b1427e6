use crate::api::error_status;
use crate::auth::extractors::AdminPrincipal;
use crate::db::MenuOperations;
use crate::enums::admin::{AllItemsResponse, GeneralResponse, ItemResponse, UpdateItemRequest};
use crate::models::admin::NewMenuItem;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/menu",
    responses(
        (status = 200, description = "Available menu items, newest first", body = AllItemsResponse)
    ),
    summary = "Fetch the menu"
)]
#[get("")]
pub(super) async fn get_menu(menu_ops: web::Data<MenuOperations>) -> impl Responder {
    match menu_ops.get_available_menu_items() {
        Ok(x) => HttpResponse::Ok().json(AllItemsResponse {
            status: "ok".to_string(),
            data: x,
            error: None,
        }),
        Err(e) => {
            error!("MENU: get_menu(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(AllItemsResponse {
                status: "error".to_string(),
                data: Vec::new(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    get,
    tag = "Menu",
    path = "/menu/items/{id}",
    params(
        ("id", description = "Unique id of the item to fetch"),
    ),
    responses(
        (status = 200, description = "Specified menu item fetched", body = ItemResponse)
    ),
    summary = "Fetch specified item from menu"
)]
#[get("/items/{id}")]
pub(super) async fn get_menu_item(
    menu_ops: web::Data<MenuOperations>,
    path: web::Path<(i32,)>,
) -> impl Responder {
    match menu_ops.get_menu_item(path.into_inner().0) {
        Ok(x) => HttpResponse::Ok().json(ItemResponse {
            status: "ok".to_string(),
            data: Some(x),
            error: None,
        }),
        Err(e) => {
            error!("MENU: get_menu_item(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(ItemResponse {
                status: "error".to_string(),
                data: None,
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    post,
    tag = "Menu",
    path = "/menu/create",
    request_body = NewMenuItem,
    responses(
        (status = 200, description = "Menu item created", body = GeneralResponse)
    ),
    summary = "Create a new menu item"
)]
#[post("/create")]
pub(super) async fn create_menu_item(
    menu_ops: web::Data<MenuOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<NewMenuItem>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    let item_name = req_data.name.clone();
    match menu_ops.add_menu_item(req_data) {
        Ok(_) => {
            info!("New menu item created: {}", item_name);
            HttpResponse::Ok().json(GeneralResponse {
                status: "ok".to_string(),
                error: None,
            })
        }
        Err(e) => {
            error!("MENU: create_menu_item(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    put,
    tag = "Menu",
    path = "/menu/update",
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Menu item updated", body = GeneralResponse)
    ),
    summary = "Update an item in menu"
)]
#[put("/update")]
pub(super) async fn update_menu_item(
    menu_ops: web::Data<MenuOperations>,
    _admin: AdminPrincipal,
    req_data: web::Json<UpdateItemRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    match menu_ops.update_menu_item(req_data.item_id, req_data.update.clone()) {
        Ok(x) => {
            info!("Menu item updated: {}", x.name);
            HttpResponse::Ok().json(GeneralResponse {
                status: "ok".to_string(),
                error: None,
            })
        }
        Err(e) => {
            error!("MENU: update_menu_item(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}

#[utoipa::path(
    delete,
    tag = "Menu",
    path = "/menu/delete/{id}",
    params(
        ("id", description = "Unique id of the item to delete"),
    ),
    responses(
        (status = 200, description = "Menu item deleted", body = GeneralResponse)
    ),
    summary = "Delete an item from menu"
)]
#[delete("/delete/{id}")]
pub(super) async fn remove_menu_item(
    menu_ops: web::Data<MenuOperations>,
    _admin: AdminPrincipal,
    path: web::Path<(i32,)>,
) -> impl Responder {
    let req_data = path.into_inner().0;
    match menu_ops.remove_menu_item(req_data) {
        Ok(x) => {
            info!("Menu item removed: {}", x.name);
            HttpResponse::Ok().json(GeneralResponse {
                status: "ok".to_string(),
                error: None,
            })
        }
        Err(e) => {
            error!("MENU: remove_menu_item(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}
