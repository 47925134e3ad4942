//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**; two instances
/// with the same attribute values are the same value. To "modify" one, build
/// a new one. Computed order totals are the canonical example here: there is
/// no totals identity, only the figures.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
