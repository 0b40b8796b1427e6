use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Acceptable clock skew between the signature timestamp and now.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

pub const COMPLETED_EVENT_TYPE: &str = "checkout.session.completed";

/// Payment-completion event as delivered by the gateway.
#[derive(Deserialize, Debug)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookEventData,
}

#[derive(Deserialize, Debug)]
pub struct WebhookEventData {
    pub object: WebhookSessionObject,
}

#[derive(Deserialize, Debug)]
pub struct WebhookSessionObject {
    pub id: String,
}

/// Computes the `v1` signature over `"{timestamp}.{payload}"`.
pub fn sign_payload(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a `t=<unix>,v1=<hex>` signature header against the raw body.
///
/// Unsigned or stale events are rejected; the order-status transition is
/// gated on this check.
pub fn verify_signature(secret: &str, header: &str, payload: &[u8]) -> bool {
    let mut timestamp: Option<i64> = None;
    let mut signature: Option<&str> = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse().ok(),
            Some(("v1", value)) => signature = Some(value),
            _ => {}
        }
    }
    let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
        return false;
    };

    if (Utc::now().timestamp() - timestamp).abs() > SIGNATURE_TOLERANCE_SECS {
        return false;
    }

    let Ok(provided) = hex::decode(signature) else {
        return false;
    };
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.verify_slice(&provided).is_ok()
}

/// Builds a signature header for outgoing test events.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> String {
    format!("t={},v1={}", timestamp, sign_payload(secret, timestamp, payload))
}
