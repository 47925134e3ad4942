//! Order lifecycle manager.
//!
//! Every operation opens one [`UnitOfWork`], stages all of its inventory and
//! order writes against the working copy, and commits only at the end. Any
//! early `?`-return drops the unit of work, so a failed operation leaves no
//! partial stock adjustment or order mutation behind.

use std::collections::BTreeSet;
use std::sync::Arc;

use stockwise_core::{DomainError, DomainResult, OrderId};
use stockwise_orders::{CreateOrder, LineItem, LineItemRequest, Order, OrderStatus, UpdateOrder};

use crate::store::{Store, UnitOfWork};

/// Orchestrates creation, modification, cancellation, and completion of
/// orders, coordinating inventory reservations and order writes inside a
/// single atomic unit of work.
#[derive(Debug, Clone)]
pub struct OrderService {
    store: Arc<Store>,
}

impl OrderService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    /// Create an order in `Pending` state, reserving stock for every line.
    ///
    /// Fails with `ReferenceNotFound` when the customer or any product is
    /// missing (listing every missing product id), and `InsufficientStock`
    /// when any single line overdraws its product; in every failure case no
    /// partial reservation survives.
    pub fn create_order(&self, cmd: CreateOrder) -> DomainResult<OrderId> {
        let mut uow = self.store.begin()?;

        if !uow.customer_exists(cmd.customer_id) {
            return Err(DomainError::reference_not_found(format!(
                "customer {}",
                cmd.customer_id
            )));
        }
        if cmd.lines.is_empty() {
            return Err(DomainError::invalid_argument(
                "order requires at least one line item",
            ));
        }
        ensure_products_exist(&uow, &cmd.lines)?;

        let lines = reserve_lines(&mut uow, &cmd.lines)?;
        let order = Order::new(
            OrderId::new(),
            cmd.customer_id,
            cmd.date,
            cmd.discount,
            cmd.payment_method,
            lines,
        )?;
        let order_id = order.id_typed();
        uow.put_order(order);
        uow.commit();

        tracing::info!(%order_id, customer_id = %cmd.customer_id, "order created");
        Ok(order_id)
    }

    /// Update a pending order.
    ///
    /// Scalar fields apply individually; replacement lines trigger a
    /// release-then-reserve of stock that either fully succeeds or leaves
    /// the original reservation set unchanged.
    pub fn update_order(&self, order_id: OrderId, cmd: UpdateOrder) -> DomainResult<()> {
        let mut uow = self.store.begin()?;

        let mut order = uow
            .order(order_id)
            .cloned()
            .ok_or_else(DomainError::not_found)?;
        if !order.is_modifiable() {
            return Err(DomainError::invalid_state(format!(
                "only pending orders can be updated (current: {})",
                order.status()
            )));
        }

        if let Some(customer_id) = cmd.customer_id {
            if !uow.customer_exists(customer_id) {
                return Err(DomainError::reference_not_found(format!(
                    "customer {customer_id}"
                )));
            }
            order.set_customer(customer_id)?;
        }
        if let Some(date) = cmd.date {
            order.set_date(date)?;
        }
        if let Some(discount) = cmd.discount {
            order.set_discount(discount)?;
        }
        if let Some(payment_method) = cmd.payment_method {
            order.set_payment_method(payment_method)?;
        }

        if let Some(requests) = &cmd.lines {
            // Give the current holdings back first, then evaluate the new
            // lines against the updated availability. A failure below drops
            // the unit of work, restoring the original reservation set.
            release_lines(&mut uow, &order)?;
            ensure_products_exist(&uow, requests)?;
            let lines = reserve_lines(&mut uow, requests)?;
            order.set_lines(lines)?;
        }

        // Status last: an order completed in the same command must not block
        // the edits that accompanied it.
        if let Some(status) = cmd.status {
            order.transition_to(status)?;
        }

        uow.put_order(order);
        uow.commit();

        tracing::info!(%order_id, "order updated");
        Ok(())
    }

    /// Delete a pending order, releasing all stock it holds.
    pub fn delete_order(&self, order_id: OrderId) -> DomainResult<()> {
        let mut uow = self.store.begin()?;

        let order = uow
            .order(order_id)
            .cloned()
            .ok_or_else(DomainError::not_found)?;
        if !order.is_modifiable() {
            return Err(DomainError::invalid_state(format!(
                "only pending orders can be deleted (current: {})",
                order.status()
            )));
        }

        release_lines(&mut uow, &order)?;
        uow.remove_order(order_id);
        uow.commit();

        tracing::info!(%order_id, "order deleted");
        Ok(())
    }

    /// Apply a bare state transition. Terminal states admit no exit; no
    /// stock is touched.
    pub fn change_status(&self, order_id: OrderId, status: OrderStatus) -> DomainResult<()> {
        let mut uow = self.store.begin()?;

        let order = uow.order_mut(order_id).ok_or_else(DomainError::not_found)?;
        order.transition_to(status)?;
        uow.commit();

        tracing::info!(%order_id, status = %status, "order status changed");
        Ok(())
    }

    pub fn complete_order(&self, order_id: OrderId) -> DomainResult<()> {
        self.change_status(order_id, OrderStatus::Completed)
    }

    /// Cancel an order. A pending order's reservations are released; a
    /// completed order is stamped cancelled with its stock assumed consumed.
    /// Re-cancelling is a no-op.
    pub fn cancel_order(&self, order_id: OrderId) -> DomainResult<()> {
        let mut uow = self.store.begin()?;

        let mut order = uow
            .order(order_id)
            .cloned()
            .ok_or_else(DomainError::not_found)?;
        if order.status() == OrderStatus::Pending {
            release_lines(&mut uow, &order)?;
        }
        order.mark_cancelled();
        uow.put_order(order);
        uow.commit();

        tracing::info!(%order_id, "order cancelled");
        Ok(())
    }
}

/// Fail with one `ReferenceNotFound` listing every requested product id that
/// does not exist.
fn ensure_products_exist(uow: &UnitOfWork<'_>, requests: &[LineItemRequest]) -> DomainResult<()> {
    let missing: BTreeSet<String> = requests
        .iter()
        .filter(|r| uow.product(r.product_id).is_none())
        .map(|r| r.product_id.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(DomainError::reference_not_found(format!(
            "products: {}",
            missing.into_iter().collect::<Vec<_>>().join(", ")
        )))
    }
}

/// Reserve stock for every request and materialize the line items, with the
/// tax flag snapshotted from each product.
fn reserve_lines(
    uow: &mut UnitOfWork<'_>,
    requests: &[LineItemRequest],
) -> DomainResult<Vec<LineItem>> {
    let mut lines = Vec::with_capacity(requests.len());
    for req in requests {
        let product = uow
            .product_mut(req.product_id)
            .ok_or_else(|| DomainError::reference_not_found(format!("product {}", req.product_id)))?;
        product.reserve(req.quantity)?;
        let taxable = product.is_taxable();
        lines.push(LineItem::new(
            req.product_id,
            req.quantity,
            req.unit_price,
            req.discount,
            taxable,
        )?);
    }
    Ok(lines)
}

/// Release every unit the order currently holds. Products are never removed
/// by this core, but a missing record is tolerated rather than poisoning the
/// release path.
fn release_lines(uow: &mut UnitOfWork<'_>, order: &Order) -> DomainResult<()> {
    for line in order.lines() {
        if let Some(product) = uow.product_mut(line.product_id()) {
            product.release(line.quantity())?;
        } else {
            tracing::warn!(
                order_id = %order.id_typed(),
                product_id = %line.product_id(),
                "releasing stock for unknown product; skipped"
            );
        }
    }
    Ok(())
}
