use crate::db::OrderOperations;
use crate::enums::common::WebhookAck;
use crate::payments::webhook::{verify_signature, WebhookEvent, COMPLETED_EVENT_TYPE};
use crate::payments::PaymentsConfig;
use crate::AppState;
use actix_web::{post, web, HttpRequest, HttpResponse, Responder};

const SIGNATURE_HEADER: &str = "Webhook-Signature";

#[utoipa::path(
    post,
    tag = "Payments",
    path = "/payment-webhook",
    request_body(content = String, content_type = "application/json"),
    responses(
        (status = 200, description = "Event acknowledged", body = WebhookAck),
        (status = 400, description = "Unsigned or malformed event"),
    ),
    summary = "Payment-gateway completion webhook"
)]
#[post("/payment-webhook")]
pub(super) async fn payment_webhook(
    order_ops: web::Data<OrderOperations>,
    config: web::Data<PaymentsConfig>,
    req: HttpRequest,
    body: web::Bytes,
) -> impl Responder {
    // The status transition is gated on a verified signature; the
    // gateway is the only expected caller.
    let signature = req
        .headers()
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    let Some(signature) = signature else {
        warn!("payment_webhook: missing signature header");
        return HttpResponse::BadRequest().body("missing signature");
    };
    if !verify_signature(&config.webhook_secret, signature, &body) {
        warn!("payment_webhook: signature verification failed");
        return HttpResponse::BadRequest().body("invalid signature");
    }

    let event: WebhookEvent = match serde_json::from_slice(&body) {
        Ok(event) => event,
        Err(e) => {
            warn!("payment_webhook: malformed event payload: {}", e);
            return HttpResponse::BadRequest().body("malformed payload");
        }
    };

    if event.event_type == COMPLETED_EVENT_TYPE {
        match order_ops.mark_paid_by_session(&event.data.object.id) {
            Ok(true) => {
                debug!(
                    "payment_webhook: session '{}' marked paid",
                    event.data.object.id
                );
            }
            // Unmatched sessions are acknowledged; a non-200 here would
            // only provoke gateway retry storms.
            Ok(false) => {
                debug!(
                    "payment_webhook: no order for session '{}'",
                    event.data.object.id
                );
            }
            Err(e) => {
                error!("payment_webhook: mark_paid_by_session(): {}", e);
                return HttpResponse::InternalServerError().finish();
            }
        }
    }

    HttpResponse::Ok().json(WebhookAck { received: true })
}

pub(super) fn config(cfg: &mut actix_web::web::ServiceConfig, state: &AppState) {
    cfg.app_data(web::Data::new(state.order_ops.clone()))
        .app_data(web::Data::new(state.payments.clone()))
        .service(payment_webhook);
}
