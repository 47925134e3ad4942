//! Pricing calculator: pure totals computation from line items.
//!
//! Deterministic and side-effect free; callers re-invoke it whenever an
//! order's line items or order-level discount change.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockwise_core::ValueObject;

use crate::order::LineItem;

/// Flat sales-tax rate applied to taxable lines (15%).
pub const TAX_RATE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Computed monetary totals of one order.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

impl ValueObject for OrderTotals {}

/// Compute subtotal, tax, and grand total for a set of line items plus an
/// order-level discount.
///
/// `subtotal = Σ(quantity × unit_price − line_discount)`, tax is 15% of each
/// taxable line's subtotal, and `total = subtotal + tax − order_discount`.
pub fn compute_totals(lines: &[LineItem], order_discount: Decimal) -> OrderTotals {
    let mut subtotal = Decimal::ZERO;
    let mut tax = Decimal::ZERO;

    for line in lines {
        subtotal += line.subtotal();
        tax += line.tax();
    }

    OrderTotals {
        subtotal,
        tax,
        total: subtotal + tax - order_discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stockwise_core::ProductId;

    fn line(quantity: i64, unit_price: Decimal, discount: Decimal, taxable: bool) -> LineItem {
        LineItem::new(ProductId::new(), quantity, unit_price, discount, taxable).unwrap()
    }

    #[test]
    fn totals_for_empty_lines_are_zero() {
        let totals = compute_totals(&[], Decimal::ZERO);
        assert_eq!(totals, OrderTotals::default());
    }

    #[test]
    fn subtotal_sums_quantity_times_price_minus_line_discount() {
        let lines = vec![
            line(3, Decimal::new(1000, 2), Decimal::ZERO, false), // 30.00
            line(2, Decimal::new(550, 2), Decimal::new(100, 2), false), // 11.00 - 1.00
        ];
        let totals = compute_totals(&lines, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::new(4000, 2));
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::new(4000, 2));
    }

    #[test]
    fn tax_applies_only_to_taxable_lines() {
        let lines = vec![
            line(1, Decimal::new(10000, 2), Decimal::ZERO, true), // 100.00, tax 15.00
            line(1, Decimal::new(5000, 2), Decimal::ZERO, false), // 50.00, no tax
        ];
        let totals = compute_totals(&lines, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::new(15000, 2));
        assert_eq!(totals.tax, Decimal::new(1500, 2));
        assert_eq!(totals.total, Decimal::new(16500, 2));
    }

    #[test]
    fn order_discount_reduces_only_the_total() {
        let lines = vec![line(2, Decimal::new(2000, 2), Decimal::ZERO, true)]; // 40.00 + 6.00
        let totals = compute_totals(&lines, Decimal::new(500, 2));
        assert_eq!(totals.subtotal, Decimal::new(4000, 2));
        assert_eq!(totals.tax, Decimal::new(600, 2));
        assert_eq!(totals.total, Decimal::new(4100, 2));
    }

    #[test]
    fn line_discount_shrinks_the_taxed_base() {
        // (1 × 100.00 − 20.00) = 80.00 taxable, tax 12.00
        let lines = vec![line(1, Decimal::new(10000, 2), Decimal::new(2000, 2), true)];
        let totals = compute_totals(&lines, Decimal::ZERO);
        assert_eq!(totals.subtotal, Decimal::new(8000, 2));
        assert_eq!(totals.tax, Decimal::new(1200, 2));
    }

    proptest! {
        /// Property: for any line set and discount,
        /// `total == subtotal + tax − discount` and the computation is
        /// deterministic.
        #[test]
        fn totals_identity_holds(
            lines in prop::collection::vec(
                (1i64..100, 0i64..100_000, 0i64..1_000, any::<bool>()),
                0..10
            ),
            order_discount in 0i64..10_000
        ) {
            let lines: Vec<LineItem> = lines
                .into_iter()
                .map(|(qty, price_cents, discount_cents, taxable)| {
                    line(
                        qty,
                        Decimal::new(price_cents, 2),
                        Decimal::new(discount_cents, 2),
                        taxable,
                    )
                })
                .collect();
            let order_discount = Decimal::new(order_discount, 2);

            let totals = compute_totals(&lines, order_discount);
            prop_assert_eq!(totals.total, totals.subtotal + totals.tax - order_discount);
            prop_assert_eq!(totals, compute_totals(&lines, order_discount));
        }
    }
}
