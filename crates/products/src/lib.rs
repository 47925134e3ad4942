//! Products domain module (catalog + inventory ledger).
//!
//! This crate contains the product records and the per-product reserve/release
//! operations the order engine mutates stock through, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::Product;
