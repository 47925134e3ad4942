//! Command records the request-handling layer submits to the lifecycle
//! manager. Field-level shape validation happens before these are built;
//! business rules (stock, state machine, references) are enforced inside
//! the unit of work.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockwise_core::{CustomerId, ProductId};

use crate::order::{OrderStatus, PaymentMethod};

/// One requested order line.
///
/// Carries the price/discount agreed with the caller; the tax flag is *not*
/// part of the request — it is snapshotted from the product when the line is
/// materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub discount: Decimal,
}

/// Command: create a new order, reserving stock for every line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub date: DateTime<Utc>,
    pub discount: Decimal,
    pub payment_method: PaymentMethod,
    pub lines: Vec<LineItemRequest>,
}

/// Command: update a pending order.
///
/// `None` fields are left untouched. Supplying `lines` replaces the whole
/// line set (release-then-reserve, all-or-nothing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrder {
    pub customer_id: Option<CustomerId>,
    pub date: Option<DateTime<Utc>>,
    pub discount: Option<Decimal>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<OrderStatus>,
    pub lines: Option<Vec<LineItemRequest>>,
}
