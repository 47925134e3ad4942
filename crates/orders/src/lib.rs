//! Orders domain module.
//!
//! This crate contains business rules for customer orders (line items, the
//! state machine, monetary totals), implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod command;
pub mod order;
pub mod pricing;

pub use command::{CreateOrder, LineItemRequest, UpdateOrder};
pub use order::{LineItem, Order, OrderStatus, PaymentMethod};
pub use pricing::{compute_totals, OrderTotals, TAX_RATE};
