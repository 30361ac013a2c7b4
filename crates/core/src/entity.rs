//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Membership checks (is this item in the catalog, does this user hold it)
/// compare `id()` values, never field values.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
