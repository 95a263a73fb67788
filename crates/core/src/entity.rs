//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Two entities are the same when their identifiers match, regardless of
    /// the rest of their state.
    fn same_entity(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}
