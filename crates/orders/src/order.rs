use core::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockwise_core::{CustomerId, DomainError, DomainResult, Entity, OrderId, ProductId};

use crate::pricing::{self, OrderTotals, TAX_RATE};

/// Order status lifecycle.
///
/// `Pending` is the only mutable state; `Completed` and `Cancelled` are
/// terminal. The sole transitions are `Pending -> Completed` and
/// `Pending -> Cancelled` (the cancel operation may additionally stamp a
/// completed order cancelled, with no stock effect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::invalid_argument(format!(
                "unrecognized order status '{other}'; allowed: pending, completed, cancelled"
            ))),
        }
    }
}

/// Accepted payment methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Credit,
    Transfer,
    Card,
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "credit" => Ok(PaymentMethod::Credit),
            "transfer" => Ok(PaymentMethod::Transfer),
            "card" => Ok(PaymentMethod::Card),
            other => Err(DomainError::invalid_argument(format!(
                "unrecognized payment method '{other}'; allowed: cash, credit, transfer, card"
            ))),
        }
    }
}

/// One product quantity entry within an order.
///
/// Unit price, discount, and tax applicability are **snapshots** taken when
/// the line was created; later catalog changes never alter them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    product_id: ProductId,
    quantity: i64,
    unit_price: Decimal,
    discount: Decimal,
    taxable: bool,
}

impl LineItem {
    pub fn new(
        product_id: ProductId,
        quantity: i64,
        unit_price: Decimal,
        discount: Decimal,
        taxable: bool,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::invalid_argument(
                "line item quantity must be positive",
            ));
        }
        Ok(Self {
            product_id,
            quantity,
            unit_price,
            discount,
            taxable,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn is_taxable(&self) -> bool {
        self.taxable
    }

    /// `quantity × unit_price − discount`.
    pub fn subtotal(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price - self.discount
    }

    /// Tax owed on this line (zero for non-taxable lines).
    pub fn tax(&self) -> Decimal {
        if self.taxable {
            self.subtotal() * TAX_RATE
        } else {
            Decimal::ZERO
        }
    }
}

/// Order aggregate: one customer order with its line items and derived
/// monetary totals.
///
/// Line items keep insertion order for display; totals are recomputed from
/// the current line set on every change, so `total == subtotal + tax −
/// discount` holds after every successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    customer_id: CustomerId,
    date: DateTime<Utc>,
    discount: Decimal,
    payment_method: PaymentMethod,
    status: OrderStatus,
    totals: OrderTotals,
    lines: Vec<LineItem>,
}

impl Order {
    /// Create a new order in `Pending` state with totals computed from the
    /// given lines.
    pub fn new(
        id: OrderId,
        customer_id: CustomerId,
        date: DateTime<Utc>,
        discount: Decimal,
        payment_method: PaymentMethod,
        lines: Vec<LineItem>,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::invalid_argument(
                "order requires at least one line item",
            ));
        }
        let totals = pricing::compute_totals(&lines, discount);
        Ok(Self {
            id,
            customer_id,
            date,
            discount,
            payment_method,
            status: OrderStatus::Pending,
            totals,
            lines,
        })
    }

    pub fn id_typed(&self) -> OrderId {
        self.id
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn discount(&self) -> Decimal {
        self.discount
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn totals(&self) -> OrderTotals {
        self.totals
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_modifiable(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    fn ensure_modifiable(&self) -> DomainResult<()> {
        if self.is_modifiable() {
            Ok(())
        } else {
            Err(DomainError::invalid_state(format!(
                "only pending orders can be modified (current: {})",
                self.status
            )))
        }
    }

    pub fn set_customer(&mut self, customer_id: CustomerId) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.customer_id = customer_id;
        Ok(())
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.date = date;
        Ok(())
    }

    /// Set the order-level discount. The total depends on it, so totals are
    /// recomputed from the current lines.
    pub fn set_discount(&mut self, discount: Decimal) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.discount = discount;
        self.recompute_totals();
        Ok(())
    }

    pub fn set_payment_method(&mut self, payment_method: PaymentMethod) -> DomainResult<()> {
        self.ensure_modifiable()?;
        self.payment_method = payment_method;
        Ok(())
    }

    /// Replace the full line set and recompute totals.
    ///
    /// Stock bookkeeping (releasing the old reservations, reserving the new
    /// ones) is the lifecycle manager's job; this only swaps the records.
    pub fn set_lines(&mut self, lines: Vec<LineItem>) -> DomainResult<()> {
        self.ensure_modifiable()?;
        if lines.is_empty() {
            return Err(DomainError::invalid_argument(
                "order requires at least one line item",
            ));
        }
        self.lines = lines;
        self.recompute_totals();
        Ok(())
    }

    /// Apply a state transition, treating `Completed` and `Cancelled` as
    /// strictly terminal.
    pub fn transition_to(&mut self, status: OrderStatus) -> DomainResult<()> {
        if self.status.is_terminal() && status != self.status {
            return Err(DomainError::invalid_state(format!(
                "cannot transition a {} order to {}",
                self.status, status
            )));
        }
        self.status = status;
        Ok(())
    }

    /// Stamp the order cancelled regardless of its current state.
    ///
    /// The cancel operation alone may move a completed order to cancelled;
    /// its stock is assumed already consumed, so no reservation is touched.
    pub fn mark_cancelled(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    fn recompute_totals(&mut self) {
        self.totals = pricing::compute_totals(&self.lines, self.discount);
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
