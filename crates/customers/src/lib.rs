//! Customers domain module.
//!
//! This crate contains the customer records the order engine validates
//! references against, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod customer;

pub use customer::{ContactInfo, Customer};
