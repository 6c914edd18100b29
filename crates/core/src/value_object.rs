//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own; two values with the same
/// attributes are interchangeable. A permission string is the canonical
/// example here: `"ParkingAccess"` granted by one role is the same capability
/// as `"parkingaccess"` granted by another.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Feature(String);
///
/// impl ValueObject for Feature {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
