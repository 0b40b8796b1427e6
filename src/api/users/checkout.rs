use crate::api::error_status;
use crate::auth::extractors::UserPrincipal;
use crate::db::CheckoutOperations;
use crate::enums::admin::GeneralResponse;
use crate::enums::users::{CheckoutRequest, CheckoutResponse};
use crate::pricing::CartLine;
use actix_web::{post, web, HttpResponse, Responder};

#[utoipa::path(
    post,
    tag = "Checkout",
    path = "/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Checkout session created", body = CheckoutResponse),
        (status = 400, description = "Invalid cart or delivery details", body = GeneralResponse),
        (status = 502, description = "Payment gateway unavailable", body = GeneralResponse),
    ),
    summary = "Start a checkout for the authenticated user's cart"
)]
#[post("")]
pub(super) async fn create_checkout(
    checkout_ops: web::Data<CheckoutOperations>,
    principal: UserPrincipal,
    req_data: web::Json<CheckoutRequest>,
) -> impl Responder {
    let req_data = req_data.into_inner();
    let cart_lines: Vec<CartLine> = req_data
        .items
        .iter()
        .map(|l| CartLine {
            item_id: l.item_id,
            quantity: l.quantity,
        })
        .collect();

    match checkout_ops
        .create_checkout(
            principal.user_id(),
            &cart_lines,
            &req_data.fulfillment,
            req_data.delivery_details.as_ref(),
        )
        .await
    {
        Ok(outcome) => {
            info!(
                "create_checkout: order {} for user {}",
                outcome.order_id,
                principal.user_id()
            );
            HttpResponse::Ok().json(CheckoutResponse {
                redirect_url: outcome.redirect_url,
                session_id: outcome.session_id,
                order_id: outcome.order_id,
            })
        }
        Err(e) => {
            error!("CHECKOUT: create_checkout(): {}", e.to_string());
            HttpResponse::build(error_status(&e)).json(GeneralResponse {
                status: "error".to_string(),
                error: Some(e.to_string()),
            })
        }
    }
}
