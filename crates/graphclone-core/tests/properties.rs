//! Property tests for the graph model and the subgraph cloner

use graphclone_core::{Entity, EntityId, Graph};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet, VecDeque};

fn build(count: u64, links: &[(u64, u64)], sort_links: bool) -> Graph {
    let mut graph = Graph::with_sort_links(sort_links);
    for id in 1..=count {
        let entity = Entity::new(EntityId(id), format!("E{}", id));
        let entity = if id % 2 == 0 {
            entity.with_description(format!("D{}", id))
        } else {
            entity
        };
        graph.register(entity);
    }
    for &(from, to) in links {
        graph.link_by_id(from, to);
    }
    graph
}

fn edge_set(graph: &Graph) -> BTreeSet<(EntityId, EntityId)> {
    graph.links().into_iter().collect()
}

fn reachable(graph: &Graph, root: EntityId) -> HashSet<EntityId> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        if seen.insert(id) {
            queue.extend(graph.successors(id));
        }
    }
    seen
}

fn assert_symmetric(graph: &Graph) {
    for entity in graph.entities() {
        for successor in entity.successors() {
            let target = graph.get(*successor).expect("successor registered");
            assert!(target.has_predecessor(entity.id));
        }
        for predecessor in entity.predecessors() {
            let source = graph.get(*predecessor).expect("predecessor registered");
            assert!(source.has_successor(entity.id));
        }
    }
}

fn graph_input() -> impl Strategy<Value = (u64, Vec<(u64, u64)>)> {
    (1u64..12).prop_flat_map(|count| {
        let links = prop::collection::vec((1..=count, 1..=count), 0..30);
        (Just(count), links)
    })
}

proptest! {
    #[test]
    fn clone_adds_exactly_the_closure((count, links) in graph_input(), root in 1u64..14, sorted in any::<bool>()) {
        let mut graph = build(count, &links, sorted);
        let root = EntityId(root);
        let edges_before = edge_set(&graph);
        let size_before = graph.len();
        let next_before = graph.next_entity_id();

        match graph.clone_subgraph(root) {
            None => {
                prop_assert!(root.0 > count);
                prop_assert_eq!(edge_set(&graph), edges_before);
                prop_assert_eq!(graph.len(), size_before);
                prop_assert_eq!(graph.next_entity_id(), next_before);
            }
            Some(summary) => {
                let mut original = build(count, &links, sorted);
                let closure = reachable(&original, root);
                let predecessors = original.predecessors(root);

                prop_assert_eq!(summary.entities_cloned(), closure.len());
                prop_assert_eq!(graph.len(), size_before + closure.len());
                prop_assert_eq!(summary.edges_attached, predecessors.len());

                let edges_after = edge_set(&graph);
                prop_assert!(edges_before.is_subset(&edges_after));

                // every internal edge of the closure is mirrored between copies
                let mut internal = 0;
                for &from in &closure {
                    for to in original.successors(from) {
                        internal += 1;
                        let copy_from = summary.clone_of(from).expect("cloned");
                        let copy_to = summary.clone_of(to).expect("cloned");
                        prop_assert!(edges_after.contains(&(copy_from, copy_to)));
                    }
                }
                prop_assert_eq!(summary.edges_cloned, internal);
                prop_assert_eq!(
                    edges_after.len(),
                    edges_before.len() + internal + predecessors.len()
                );
                for predecessor in predecessors {
                    prop_assert!(edges_after.contains(&(predecessor, summary.cloned_root)));
                }

                // copies keep attributes and never collide with originals
                for (from, to) in &summary.mapping {
                    prop_assert!(to.0 > count);
                    let a = original.get(*from).expect("original");
                    let b = graph.get(*to).expect("copy");
                    prop_assert_eq!(&a.name, &b.name);
                    prop_assert_eq!(&a.description, &b.description);
                }

                // cloning the same root on the rebuilt graph gives the same ids
                let again = original.clone_subgraph(root).expect("root exists");
                prop_assert_eq!(again.mapping, summary.mapping);

                assert_symmetric(&graph);
            }
        }
    }

    #[test]
    fn document_round_trip((count, links) in graph_input(), sorted in any::<bool>()) {
        let graph = build(count, &links, sorted);

        let document = graph.to_document();
        let rebuilt = Graph::from_document(&document, sorted);

        prop_assert_eq!(rebuilt.to_document(), document);
        prop_assert_eq!(edge_set(&rebuilt), edge_set(&graph));
        prop_assert_eq!(rebuilt.next_entity_id(), graph.next_entity_id());
    }

    #[test]
    fn json_round_trip((count, links) in graph_input()) {
        let graph = build(count, &links, true);

        let text = serde_json::to_string(&graph.to_document()).expect("serializes");
        let rebuilt = Graph::from_json_str(&text, true).expect("parses");

        prop_assert_eq!(rebuilt.to_document(), graph.to_document());
    }

    #[test]
    fn links_stay_symmetric_under_replacement(
        (count, links) in graph_input(),
        replaced in prop::collection::vec(1u64..12, 0..4),
        extra in prop::collection::vec((1u64..12, 1u64..12), 0..10),
    ) {
        let mut graph = build(count, &links, true);
        for id in replaced {
            graph.register(Entity::new(EntityId(id), "replacement"));
        }
        for (from, to) in extra {
            graph.link_by_id(from, to);
        }

        assert_symmetric(&graph);
        let max_id = graph.ids().into_iter().max().map(|id| id.0).unwrap_or(0);
        prop_assert!(graph.next_entity_id().map_or(false, |next| next.0 > max_id));
    }
}
