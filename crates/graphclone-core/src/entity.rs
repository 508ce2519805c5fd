//! Entity (node) types

use serde::{Deserialize, Serialize};

/// Unique identifier for an entity within a graph
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entity in the graph (a node)
///
/// Neighbours are held by id, never by ownership: the owning [`Graph`]
/// resolves them. The link sets can only be changed through the graph's
/// linking operations, which keep both directions of every edge in sync.
///
/// [`Graph`]: crate::graph::Graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Identifier (unique within a graph)
    pub id: EntityId,

    /// Entity name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    successors: Vec<EntityId>,
    predecessors: Vec<EntityId>,
}

impl Entity {
    /// Create a standalone entity with no links
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Duplicate name and description under a new id, without links
    pub fn copy_as(&self, id: EntityId) -> Self {
        Self {
            id,
            name: self.name.clone(),
            description: self.description.clone(),
            successors: Vec::new(),
            predecessors: Vec::new(),
        }
    }

    /// Entities this entity points to, in link order
    pub fn successors(&self) -> &[EntityId] {
        &self.successors
    }

    /// Entities pointing to this entity, in link order
    pub fn predecessors(&self) -> &[EntityId] {
        &self.predecessors
    }

    pub fn has_successor(&self, id: EntityId) -> bool {
        self.successors.contains(&id)
    }

    pub fn has_predecessor(&self, id: EntityId) -> bool {
        self.predecessors.contains(&id)
    }

    pub(crate) fn insert_successor(&mut self, id: EntityId) -> bool {
        insert_unique(&mut self.successors, id)
    }

    pub(crate) fn insert_predecessor(&mut self, id: EntityId) -> bool {
        insert_unique(&mut self.predecessors, id)
    }

    pub(crate) fn remove_successor(&mut self, id: EntityId) {
        self.successors.retain(|s| *s != id);
    }

    pub(crate) fn remove_predecessor(&mut self, id: EntityId) {
        self.predecessors.retain(|p| *p != id);
    }

    pub(crate) fn clear_links(&mut self) {
        self.successors.clear();
        self.predecessors.clear();
    }
}

fn insert_unique(set: &mut Vec<EntityId>, id: EntityId) -> bool {
    if set.contains(&id) {
        false
    } else {
        set.push(id);
        true
    }
}
