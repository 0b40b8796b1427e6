use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::payments::gateway::GatewayLineItem;

/// A catalog row resolved for repricing. Client-submitted prices are never
/// consulted; this is the only price source the checkout path sees.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub item_id: i32,
    pub name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Copy)]
pub struct CartLine {
    pub item_id: i32,
    pub quantity: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLine {
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Debug)]
pub struct PricedCart {
    pub order_total: Decimal,
    pub gateway_line_items: Vec<GatewayLineItem>,
    pub resolved_lines: Vec<ResolvedLine>,
}

/// Reprices a cart against resolved catalog rows.
///
/// Lines whose item id is not in the catalog are dropped without error;
/// the caller must treat an all-unknown cart (empty `gateway_line_items`)
/// as an empty cart. A missing quantity defaults to 1. Quantities below 1
/// are expected to be rejected before pricing.
pub fn price_cart(catalog: &[CatalogEntry], lines: &[CartLine]) -> PricedCart {
    let mut order_total = Decimal::ZERO;
    let mut gateway_line_items = Vec::new();
    let mut resolved_lines = Vec::new();

    for line in lines {
        let Some(entry) = catalog.iter().find(|e| e.item_id == line.item_id) else {
            continue;
        };
        let quantity = line.quantity.unwrap_or(1);

        order_total += entry.price * Decimal::from(quantity);
        gateway_line_items.push(GatewayLineItem {
            name: entry.name.clone(),
            unit_amount: to_minor_units(entry.price),
            quantity,
        });
        resolved_lines.push(ResolvedLine {
            item_id: entry.item_id,
            quantity,
        });
    }

    PricedCart {
        order_total,
        gateway_line_items,
        resolved_lines,
    }
}

/// Converts a decimal currency amount to integer minor units (cents),
/// rounding half away from zero so fractional-cent prices do not
/// systematically under- or overcharge.
pub fn to_minor_units(price: Decimal) -> i64 {
    (price * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(i64::MAX)
}
