use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use thiserror::Error;

use stockwise_core::{CustomerId, DomainError, OrderId, ProductId};
use stockwise_customers::Customer;
use stockwise_orders::Order;
use stockwise_products::Product;

/// Storage-level fault. Never produced by business rules; carried through to
/// the caller unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::store(err.to_string())
    }
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    customers: HashMap<CustomerId, Customer>,
    products: HashMap<ProductId, Product>,
    orders: HashMap<OrderId, Order>,
}

/// In-memory transactional record store.
///
/// A [`UnitOfWork`] holds the write lock for its whole lifetime, so units of
/// work are fully serialized: a concurrent operation sees either the full
/// pre-commit state or the full post-commit state, never an intermediate one.
/// That same serialization is what keeps two creates racing for a product's
/// last unit from both observing sufficient stock.
#[derive(Debug, Default)]
pub struct Store {
    state: RwLock<StoreState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit of work. All staged writes land on a working copy of the
    /// state; nothing is visible to readers until [`UnitOfWork::commit`].
    pub fn begin(&self) -> Result<UnitOfWork<'_>, StoreError> {
        let guard = self.state.write().map_err(|_| StoreError::Poisoned)?;
        let working = guard.clone();
        Ok(UnitOfWork { guard, working })
    }

    /// Seed or replace a customer record (catalog CRUD surface).
    pub fn insert_customer(&self, customer: Customer) -> Result<(), StoreError> {
        let mut guard = self.state.write().map_err(|_| StoreError::Poisoned)?;
        guard.customers.insert(customer.id_typed(), customer);
        Ok(())
    }

    /// Seed or replace a product record (catalog CRUD surface).
    pub fn insert_product(&self, product: Product) -> Result<(), StoreError> {
        let mut guard = self.state.write().map_err(|_| StoreError::Poisoned)?;
        guard.products.insert(product.id_typed(), product);
        Ok(())
    }

    pub fn customer(&self, id: CustomerId) -> Result<Option<Customer>, StoreError> {
        let guard = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.customers.get(&id).cloned())
    }

    pub fn product(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let guard = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.products.get(&id).cloned())
    }

    pub fn order(&self, id: OrderId) -> Result<Option<Order>, StoreError> {
        let guard = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.orders.get(&id).cloned())
    }

    /// All orders placed by one customer, newest id last.
    pub fn orders_for_customer(&self, id: CustomerId) -> Result<Vec<Order>, StoreError> {
        let guard = self.state.read().map_err(|_| StoreError::Poisoned)?;
        let mut orders: Vec<Order> = guard
            .orders
            .values()
            .filter(|o| o.customer_id() == id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| *o.id_typed().as_uuid());
        Ok(orders)
    }
}

/// One atomic unit of work against the [`Store`].
///
/// Dropping without committing discards every staged write (rollback).
pub struct UnitOfWork<'a> {
    guard: RwLockWriteGuard<'a, StoreState>,
    working: StoreState,
}

impl UnitOfWork<'_> {
    pub fn customer_exists(&self, id: CustomerId) -> bool {
        self.working.customers.contains_key(&id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.working.products.get(&id)
    }

    pub fn product_mut(&mut self, id: ProductId) -> Option<&mut Product> {
        self.working.products.get_mut(&id)
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.working.orders.get(&id)
    }

    pub fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.working.orders.get_mut(&id)
    }

    /// Stage an order write (insert or full replace).
    pub fn put_order(&mut self, order: Order) {
        self.working.orders.insert(order.id_typed(), order);
    }

    pub fn remove_order(&mut self, id: OrderId) -> Option<Order> {
        self.working.orders.remove(&id)
    }

    /// Publish the working copy. Infallible: the lock is already held.
    pub fn commit(self) {
        let Self { mut guard, working } = self;
        *guard = working;
    }
}
