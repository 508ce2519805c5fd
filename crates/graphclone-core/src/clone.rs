//! Subgraph cloning
//!
//! Cloning duplicates an entity together with everything reachable from it
//! through successor edges. Each reachable entity is copied exactly once,
//! so cycles terminate and shared descendants stay shared in the copy. The
//! copied root is then attached to every predecessor of the original root.

use crate::entity::EntityId;
use crate::graph::Graph;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Outcome of a clone operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CloneSummary {
    /// Root of the original subgraph
    pub root: EntityId,

    /// Root of the copy
    pub cloned_root: EntityId,

    /// Original id to copy id, in the order copies were created
    pub mapping: Vec<(EntityId, EntityId)>,

    /// Edges created between copies
    pub edges_cloned: usize,

    /// Edges created from the original root's predecessors to the copy
    pub edges_attached: usize,
}

impl CloneSummary {
    pub fn entities_cloned(&self) -> usize {
        self.mapping.len()
    }

    /// Id of the copy made for `original`, if it was part of the subgraph
    pub fn clone_of(&self, original: EntityId) -> Option<EntityId> {
        self.mapping
            .iter()
            .find(|(from, _)| *from == original)
            .map(|(_, to)| *to)
    }
}

/// A copied entity whose successors are still being walked
struct Frame {
    copy: EntityId,
    successors: Vec<EntityId>,
    next: usize,
}

enum Step {
    Visit { parent: EntityId, original: EntityId },
    Finish,
}

impl Graph {
    /// Clone the subgraph rooted at `root`
    ///
    /// Copies are assigned ids in depth-first pre-order: an entity gets its
    /// id on first visit, before any of its successors. A parent copy links
    /// to a child copy once the child's own subgraph is done. Nothing is
    /// removed from the graph. Returns `None`, leaving the graph untouched,
    /// when `root` is not registered or when fewer ids are left than the
    /// subgraph needs.
    pub fn clone_subgraph(&mut self, root: EntityId) -> Option<CloneSummary> {
        if !self.contains(root) {
            tracing::debug!("Clone root {} not in graph, nothing to do", root);
            return None;
        }

        let needed = self.reachable_count(root);
        if !self.has_capacity(needed) {
            tracing::warn!(
                "Cannot clone {} entities from root {}: entity ids exhausted",
                needed,
                root
            );
            return None;
        }

        let cloned_root = self.copy_and_register(root)?;
        let mut visited: HashMap<EntityId, EntityId> = HashMap::new();
        let mut mapping = vec![(root, cloned_root)];
        let mut edges_cloned = 0;
        visited.insert(root, cloned_root);

        let mut stack = vec![Frame {
            copy: cloned_root,
            successors: self.successors(root),
            next: 0,
        }];

        loop {
            let step = match stack.last_mut() {
                None => break,
                Some(frame) => match frame.successors.get(frame.next).copied() {
                    Some(original) => {
                        frame.next += 1;
                        Step::Visit {
                            parent: frame.copy,
                            original,
                        }
                    }
                    None => Step::Finish,
                },
            };

            match step {
                Step::Visit { parent, original } => {
                    if let Some(&existing) = visited.get(&original) {
                        if self.link(parent, existing) {
                            edges_cloned += 1;
                        }
                        continue;
                    }

                    let Some(copy) = self.copy_and_register(original) else {
                        continue;
                    };
                    visited.insert(original, copy);
                    mapping.push((original, copy));
                    stack.push(Frame {
                        copy,
                        successors: self.successors(original),
                        next: 0,
                    });
                }
                Step::Finish => {
                    let Some(done) = stack.pop() else { break };
                    if let Some(parent) = stack.last() {
                        if self.link(parent.copy, done.copy) {
                            edges_cloned += 1;
                        }
                    }
                }
            }
        }

        let mut edges_attached = 0;
        for predecessor in self.predecessors(root) {
            if self.link(predecessor, cloned_root) {
                edges_attached += 1;
            }
        }

        tracing::debug!(
            "Cloned {} entities from root {} as {} ({} internal edges, {} attached)",
            mapping.len(),
            root,
            cloned_root,
            edges_cloned,
            edges_attached
        );

        Some(CloneSummary {
            root,
            cloned_root,
            mapping,
            edges_cloned,
            edges_attached,
        })
    }

    /// Number of entities reachable from `root`, `root` included
    fn reachable_count(&self, root: EntityId) -> usize {
        let mut seen = HashSet::from([root]);
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            if let Some(entity) = self.get(id) {
                for successor in entity.successors() {
                    if seen.insert(*successor) {
                        pending.push(*successor);
                    }
                }
            }
        }
        seen.len()
    }
}
