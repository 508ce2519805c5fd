//! Entity graph: registry, id allocation and linking

use crate::entity::{Entity, EntityId};
use std::collections::HashMap;

/// Directed graph of entities
///
/// The graph owns every entity; entities refer to their neighbours by id.
/// Every id that appears in any successor or predecessor set is registered,
/// and `next_entity_id` is always greater than every registered id. Once
/// `u64::MAX` is registered the id space is exhausted and no further ids are
/// handed out.
#[derive(Debug, Clone)]
pub struct Graph {
    entities: HashMap<EntityId, Entity>,

    /// Registration order, used when `sort_links` is off
    order: Vec<EntityId>,

    /// `None` once the id space is exhausted
    next_entity_id: Option<EntityId>,

    /// Enumerate entities and links in ascending id order
    sort_links: bool,
}

impl Default for Graph {
    fn default() -> Self {
        Self::with_sort_links(true)
    }
}

impl Graph {
    /// Create an empty graph with deterministic (ascending id) ordering
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph, choosing between ascending-id ordering and
    /// insertion ordering for every enumeration
    pub fn with_sort_links(sort_links: bool) -> Self {
        Self {
            entities: HashMap::new(),
            order: Vec::new(),
            next_entity_id: Some(EntityId(1)),
            sort_links,
        }
    }

    pub fn sort_links(&self) -> bool {
        self.sort_links
    }

    /// Smallest id guaranteed not to collide with a registered entity, or
    /// `None` if every id up to `u64::MAX` may be taken
    pub fn next_entity_id(&self) -> Option<EntityId> {
        self.next_entity_id
    }

    /// Whether `count` more ids can be allocated
    pub fn has_capacity(&self, count: usize) -> bool {
        match self.next_entity_id {
            Some(next) => u128::from(u64::MAX - next.0) + 1 >= count as u128,
            None => count == 0,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registry
    // ─────────────────────────────────────────────────────────────────────────

    /// Register an entity under its id
    ///
    /// An entity already registered under the same id is replaced and
    /// returned. Its edges are removed from all of its neighbours, and the
    /// replacement starts without links. The id keeps its original
    /// registration position.
    pub fn register(&mut self, mut entity: Entity) -> Option<Entity> {
        entity.clear_links();
        let id = entity.id;

        let replaced = self.entities.insert(id, entity);
        match &replaced {
            Some(old) => {
                tracing::debug!("Replacing entity {} ({})", id, old.name);
                self.detach(old);
            }
            None => self.order.push(id),
        }

        if let Some(next) = self.next_entity_id {
            if id >= next {
                self.next_entity_id = id.0.checked_add(1).map(EntityId);
            }
        }

        replaced
    }

    /// Hand out the next free id, or `None` once the id space is exhausted
    pub fn allocate_id(&mut self) -> Option<EntityId> {
        let id = self.next_entity_id?;
        self.next_entity_id = id.0.checked_add(1).map(EntityId);
        Some(id)
    }

    /// Register a link-free duplicate of `original` under a fresh id
    ///
    /// Returns the new id, or `None` if `original` is not registered or no
    /// id is left to allocate.
    pub fn copy_and_register(&mut self, original: EntityId) -> Option<EntityId> {
        if !self.contains(original) {
            return None;
        }

        let id = self.allocate_id()?;
        let copy = self.entities.get(&original)?.copy_as(id);
        self.register(copy);
        Some(id)
    }

    /// Remove the edges of a replaced entity from its neighbours
    fn detach(&mut self, old: &Entity) {
        for successor in old.successors() {
            if *successor == old.id {
                continue;
            }
            if let Some(entity) = self.entities.get_mut(successor) {
                entity.remove_predecessor(old.id);
            }
        }
        for predecessor in old.predecessors() {
            if *predecessor == old.id {
                continue;
            }
            if let Some(entity) = self.entities.get_mut(predecessor) {
                entity.remove_successor(old.id);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Linking
    // ─────────────────────────────────────────────────────────────────────────

    /// Add the edge `from -> to`
    ///
    /// Ignored when either endpoint is not registered. Returns true if the
    /// edge did not exist before.
    pub fn link(&mut self, from: EntityId, to: EntityId) -> bool {
        if !self.contains(from) || !self.contains(to) {
            tracing::trace!("Ignoring link {} -> {}: endpoint not registered", from, to);
            return false;
        }

        let added = self
            .entities
            .get_mut(&from)
            .map(|entity| entity.insert_successor(to))
            .unwrap_or(false);
        if let Some(entity) = self.entities.get_mut(&to) {
            entity.insert_predecessor(from);
        }
        added
    }

    /// Add the edge `from -> to` addressed by raw id values
    pub fn link_by_id(&mut self, from: u64, to: u64) -> bool {
        self.link(EntityId(from), EntityId(to))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registered ids in enumeration order
    pub fn ids(&self) -> Vec<EntityId> {
        self.ordered(&self.order)
    }

    /// Registered entities in enumeration order
    pub fn entities(&self) -> Vec<&Entity> {
        self.ids()
            .into_iter()
            .filter_map(|id| self.entities.get(&id))
            .collect()
    }

    /// Successors of `id` in enumeration order (empty if unregistered)
    pub fn successors(&self, id: EntityId) -> Vec<EntityId> {
        self.get(id)
            .map(|entity| self.ordered(entity.successors()))
            .unwrap_or_default()
    }

    /// Predecessors of `id` in enumeration order (empty if unregistered)
    pub fn predecessors(&self, id: EntityId) -> Vec<EntityId> {
        self.get(id)
            .map(|entity| self.ordered(entity.predecessors()))
            .unwrap_or_default()
    }

    /// All edges, grouped by source in entity enumeration order
    pub fn links(&self) -> Vec<(EntityId, EntityId)> {
        self.ids()
            .into_iter()
            .flat_map(|from| {
                self.successors(from)
                    .into_iter()
                    .map(move |to| (from, to))
            })
            .collect()
    }

    pub fn link_count(&self) -> usize {
        self.entities
            .values()
            .map(|entity| entity.successors().len())
            .sum()
    }

    fn ordered(&self, ids: &[EntityId]) -> Vec<EntityId> {
        let mut ids = ids.to_vec();
        if self.sort_links {
            ids.sort_unstable();
        }
        ids
    }
}
