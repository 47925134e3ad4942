//! Transactional store + order lifecycle manager.
//!
//! The [`Store`] is an in-memory, lock-serialized record store with an
//! explicit [`UnitOfWork`]: every lifecycle operation stages its reads and
//! writes against a working copy and either commits the whole copy or
//! discards it. [`OrderService`] orchestrates customers, products, and
//! orders inside one unit of work per operation.

pub mod service;
pub mod store;


pub use service::OrderService;
pub use store::{Store, StoreError, UnitOfWork};
