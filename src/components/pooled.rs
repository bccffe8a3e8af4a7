use bevy_ecs::prelude::Component;

/// Marks an entity as owned by the [`EntityPool`](crate::resources::pool::EntityPool).
///
/// `template` is the index of the template it was built from.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pooled {
    pub template: usize,
}

/// Marks a child node that only exists to be hidden by its owner's killer.
#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct ChildNode {
    pub name: String,
}
