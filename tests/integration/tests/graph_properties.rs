//! Integration test: structural properties of the graph store and overlay.
//!
//! Tests sentry partitioning and bounded search from wotex-graph over a
//! family of generated graphs, and overlay isolation from wotex-explorer.

use std::collections::HashSet;
use std::sync::Arc;

use wotex_core::{IdentityRecord, NodeId, PendingCertification};
use wotex_explorer::{build_overlay, select_paths};
use wotex_graph::{qualify_sentries, shortest_paths, GraphView, WotGraph};
use wotex_identity::PendingDirectory;

/// Deterministic pseudo-random graphs (xorshift), `n` nodes, ~`degree` links each.
fn generated(seed: u64, n: u32, degree: u32) -> WotGraph {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut graph = WotGraph::new();
    for _ in 0..n {
        graph.add_node().unwrap();
    }
    for from in 0..n {
        for _ in 0..degree {
            let to = (next() % u64::from(n)) as u32;
            if to != from {
                graph.add_link(NodeId(from), NodeId(to)).unwrap();
            }
        }
    }
    graph
}

// =========================================================================
// Sentry partition
// =========================================================================

#[test]
fn test_partition_is_disjoint_and_complete() {
    for seed in 1..20u64 {
        let graph = generated(seed, 40, 3);
        for threshold in 0..6 {
            let partition = qualify_sentries(&graph, threshold);
            assert!(partition.sentries.is_disjoint(&partition.non_sentries));

            let all: HashSet<NodeId> = partition.members().collect();
            assert_eq!(all.len(), graph.node_count());
            assert_eq!(partition.len(), graph.node_count());

            for &id in &partition.sentries {
                assert!(graph.issued_count(id) >= threshold as usize);
                assert!(graph.received_count(id) >= threshold as usize);
            }
        }
    }
}

// =========================================================================
// Bounded shortest paths
// =========================================================================

#[test]
fn test_paths_are_bounded_and_simple() {
    for seed in 1..10u64 {
        let graph = generated(seed, 25, 2);
        for max_hops in 1..5u32 {
            for source in 0..5u32 {
                for destination in 20..25u32 {
                    let paths =
                        shortest_paths(&graph, NodeId(source), NodeId(destination), max_hops)
                            .unwrap();
                    let Some(first) = paths.first() else {
                        continue;
                    };
                    for path in &paths {
                        assert!(path.hops() <= max_hops as usize);
                        assert_eq!(path.hops(), first.hops(), "all results share the minimum length");
                        let distinct: HashSet<_> = path.nodes().iter().collect();
                        assert_eq!(distinct.len(), path.nodes().len(), "path repeats a node");
                        assert_eq!(path.source(), Some(NodeId(source)));
                        assert_eq!(path.destination(), Some(NodeId(destination)));
                        for (from, to) in path.links() {
                            assert!(graph.has_link(from, to));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_search_terminates_on_cycles() {
    // Ring 0 -> 1 -> ... -> 9 -> 0 with the destination out of reach.
    let mut graph = WotGraph::new();
    for _ in 0..11 {
        graph.add_node().unwrap();
    }
    for i in 0..10u32 {
        graph.add_link(NodeId(i), NodeId((i + 1) % 10)).unwrap();
    }
    let paths = shortest_paths(&graph, NodeId(0), NodeId(10), 50).unwrap();
    assert!(paths.is_empty());
}

// =========================================================================
// Overlay isolation
// =========================================================================

#[test]
fn test_overlay_does_not_leak_into_confirmed_graph() {
    let base = Arc::new(generated(7, 30, 3));
    let before = qualify_sentries(&*base, 2);
    let links_before = base.link_count();

    let members: Vec<IdentityRecord> = (0..30u32)
        .map(|i| {
            IdentityRecord::confirmed(
                format!("m{i}"),
                format!("PUB_m{i}"),
                format!("H_m{i}"),
                NodeId(i),
            )
        })
        .collect();
    let directory = PendingDirectory::new((0..5).map(|i| {
        IdentityRecord::pending(format!("p{i}"), format!("PUB_p{i}"), format!("H_p{i}"))
    }));
    let mut certifications = Vec::new();
    for i in 0..5 {
        certifications.push(PendingCertification {
            from: format!("PUB_m{i}"),
            to: format!("H_p{i}"),
        });
        certifications.push(PendingCertification {
            from: format!("PUB_p{i}"),
            to: format!("H_m{}", i + 10),
        });
        certifications.push(PendingCertification {
            from: format!("PUB_m{}", i + 20),
            to: format!("H_m{i}"),
        });
    }

    for _ in 0..3 {
        let overlay = build_overlay(&base, &members, &directory, &certifications).unwrap();
        let target = overlay.pending_node_of("H_p0").unwrap();
        let working: Vec<NodeId> = (0..35u32).map(NodeId).collect();
        let rows = select_paths(
            overlay.graph(),
            target,
            &working,
            wotex_core::Direction::MemberToTarget,
            4,
            overlay.pending_edges(),
            |_| false,
        )
        .unwrap();
        assert_eq!(rows.len(), working.len());
        assert!(overlay.graph().node_count() > base.node_count());
        overlay.release();
    }

    assert_eq!(qualify_sentries(&*base, 2), before);
    assert_eq!(base.node_count(), 30);
    assert_eq!(base.link_count(), links_before);
}
