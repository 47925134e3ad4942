use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockwise_core::{DomainError, DomainResult, Entity, ProductId};

/// Product record, owner of the available-quantity ledger for one SKU.
///
/// Stock is mutated **only** through [`Product::reserve`] and
/// [`Product::release`] inside an order-lifecycle unit of work; order edits
/// never touch it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    code: Option<String>,
    name: String,
    unit_price: Decimal,
    stock: i64,
    taxable: bool,
    excise: bool,
}

impl Product {
    pub fn new(
        id: ProductId,
        code: Option<String>,
        name: impl Into<String>,
        unit_price: Decimal,
        stock: i64,
        taxable: bool,
        excise: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::invalid_argument("product name cannot be empty"));
        }
        if stock < 0 {
            return Err(DomainError::invalid_argument("stock cannot be negative"));
        }
        Ok(Self {
            id,
            code,
            name,
            unit_price,
            stock,
            taxable,
            excise,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn is_taxable(&self) -> bool {
        self.taxable
    }

    pub fn has_excise(&self) -> bool {
        self.excise
    }

    /// Reserve `quantity` units against available stock.
    ///
    /// Fails with [`DomainError::InsufficientStock`] when fewer units are
    /// available than requested; the record is left untouched on failure.
    pub fn reserve(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::invalid_argument("quantity must be positive"));
        }
        if self.stock < quantity {
            return Err(DomainError::InsufficientStock {
                product_id: self.id,
                name: self.name.clone(),
                available: self.stock,
                requested: quantity,
            });
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Return `quantity` previously reserved units to available stock.
    ///
    /// Over-release is not detectable here (the ledger holds no per-order
    /// breakdown); callers release exactly what an order's line items hold.
    pub fn release(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::invalid_argument("quantity must be positive"));
        }
        self.stock += quantity;
        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_product(stock: i64) -> Product {
        Product::new(
            ProductId::new(),
            Some("SKU-1".to_string()),
            "Café molido 500g",
            Decimal::new(1250, 2),
            stock,
            true,
            false,
        )
        .unwrap()
    }

    #[test]
    fn reserve_decrements_stock() {
        let mut product = test_product(10);
        product.reserve(3).unwrap();
        assert_eq!(product.stock(), 7);
    }

    #[test]
    fn reserve_more_than_available_fails_and_keeps_stock() {
        let mut product = test_product(2);
        let err = product.reserve(3).unwrap_err();
        match err {
            DomainError::InsufficientStock {
                available,
                requested,
                ..
            } => {
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(product.stock(), 2);
    }

    #[test]
    fn reserve_exact_stock_leaves_zero() {
        let mut product = test_product(5);
        product.reserve(5).unwrap();
        assert_eq!(product.stock(), 0);
        assert!(matches!(
            product.reserve(1),
            Err(DomainError::InsufficientStock { .. })
        ));
    }

    #[test]
    fn release_restores_stock() {
        let mut product = test_product(10);
        product.reserve(4).unwrap();
        product.release(4).unwrap();
        assert_eq!(product.stock(), 10);
    }

    #[test]
    fn zero_or_negative_quantities_are_rejected() {
        let mut product = test_product(10);
        assert!(matches!(
            product.reserve(0),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(matches!(
            product.release(-1),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    proptest! {
        /// Property: no sequence of reserve/release calls drives stock negative.
        #[test]
        fn stock_never_negative(
            initial in 0i64..1_000,
            ops in prop::collection::vec((any::<bool>(), 1i64..100), 0..50)
        ) {
            let mut product = test_product(initial);
            for (is_reserve, qty) in ops {
                if is_reserve {
                    let _ = product.reserve(qty);
                } else {
                    product.release(qty).unwrap();
                }
                prop_assert!(product.stock() >= 0);
            }
        }
    }
}
