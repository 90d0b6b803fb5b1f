//! Property tests for depth assignment.
//!
//! Random DAGs are generated with edges only from lower to higher node
//! numbers, so expected depths can be computed with a single pass in index
//! order and compared against both traversal orders.

use std::collections::HashSet;

use proptest::prelude::*;

use dagdepth::graph::{compute_depths, DepthGraph, DepthOptions, Link, SortingOrder, UNSET_DEPTH};

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// (node count, forward edges, skip mask)
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<bool>)> {
    (1usize..12).prop_flat_map(|n| {
        let edges = prop::collection::vec((0..n, 0..n), 0..30).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect::<Vec<_>>()
        });
        let skip = prop::collection::vec(prop::bool::weighted(0.2), n);
        (Just(n), edges, skip)
    })
}

/// Arbitrary directed graph, cycles and self-loops allowed.
fn digraph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..7).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..14)))
}

/// Depths by dynamic programming over index order; `pick` chooses between
/// the current best and a candidate.
fn expected_depths(
    n: usize,
    edges: &[(usize, usize)],
    skip: &[bool],
    pick: fn(i64, i64) -> i64,
) -> Vec<i64> {
    let mut depth = vec![UNSET_DEPTH; n];
    let has_incoming: HashSet<usize> = edges.iter().map(|&(_, b)| b).collect();

    for v in 0..n {
        if !has_incoming.contains(&v) {
            depth[v] = 0;
            continue;
        }
        for &(a, b) in edges.iter().filter(|&&(_, b)| b == v) {
            let candidate = depth[a] + if skip[a] { 0 } else { 1 };
            depth[b] = if depth[b] == UNSET_DEPTH {
                candidate
            } else {
                pick(depth[b], candidate)
            };
        }
    }
    depth
}

fn run(
    n: usize,
    edges: &[(usize, usize)],
    skip: &[bool],
    order: SortingOrder,
) -> std::collections::HashMap<usize, i64> {
    let nodes: Vec<usize> = (0..n).collect();
    let links: Vec<Link<'_, usize, usize>> = edges.iter().map(|&(a, b)| Link::new(a, b)).collect();
    let options = DepthOptions::new()
        .with_sorting_order(order)
        .with_node_filter(|node: &usize| !skip[*node]);
    compute_depths(&nodes, &links, |node| *node, options).expect("acyclic input never fails")
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn depth_first_assigns_longest_path((n, edges, skip) in dag()) {
        let depths = run(n, &edges, &skip, SortingOrder::DepthFirst);
        let expected = expected_depths(n, &edges, &skip, i64::max);

        for v in 0..n {
            if skip[v] {
                prop_assert!(!depths.contains_key(&v));
            } else {
                prop_assert_eq!(depths[&v], expected[v], "node {}", v);
            }
        }
    }

    #[test]
    fn breadth_first_assigns_shortest_path((n, edges, skip) in dag()) {
        let depths = run(n, &edges, &skip, SortingOrder::BreadthFirst);
        let expected = expected_depths(n, &edges, &skip, i64::min);

        for v in 0..n {
            if skip[v] {
                prop_assert!(!depths.contains_key(&v));
            } else {
                prop_assert_eq!(depths[&v], expected[v], "node {}", v);
            }
        }
    }

    #[test]
    fn roots_sit_at_depth_zero((n, edges, _skip) in dag()) {
        let no_skip = vec![false; n];
        let has_incoming: HashSet<usize> = edges.iter().map(|&(_, b)| b).collect();

        for order in [SortingOrder::DepthFirst, SortingOrder::BreadthFirst] {
            let depths = run(n, &edges, &no_skip, order);
            for v in (0..n).filter(|v| !has_incoming.contains(v)) {
                prop_assert_eq!(depths[&v], 0);
            }
        }
    }

    #[test]
    fn loop_handler_sees_each_cycle_once((n, edges) in digraph()) {
        let nodes: Vec<usize> = (0..n).collect();
        let links: Vec<Link<'_, usize, usize>> =
            edges.iter().map(|&(a, b)| Link::new(a, b)).collect();

        for order in [SortingOrder::DepthFirst, SortingOrder::BreadthFirst] {
            let mut graph = DepthGraph::build(&nodes, &links, |node| *node, |_| true).unwrap();
            let has_cycles = graph.has_cycles();

            let mut calls: Vec<Vec<usize>> = Vec::new();
            let found = graph
                .traverse(order, |ids| {
                    calls.push(ids.to_vec());
                    Ok(())
                })
                .unwrap();

            let distinct: HashSet<&Vec<usize>> = calls.iter().collect();
            prop_assert_eq!(distinct.len(), calls.len());
            prop_assert_eq!(&found, &calls);
            prop_assert_eq!(has_cycles, !calls.is_empty());

            for cycle in &calls {
                prop_assert!(cycle.len() >= 2);
                prop_assert_eq!(cycle.first(), cycle.last());
            }
        }
    }

    #[test]
    fn default_handler_fails_exactly_on_cycles((n, edges) in digraph()) {
        let nodes: Vec<usize> = (0..n).collect();
        let links: Vec<Link<'_, usize, usize>> =
            edges.iter().map(|&(a, b)| Link::new(a, b)).collect();
        let cyclic = DepthGraph::build(&nodes, &links, |node| *node, |_| true)
            .unwrap()
            .has_cycles();

        let result = compute_depths(&nodes, &links, |node| *node, DepthOptions::new());
        match result {
            Ok(_) => prop_assert!(!cyclic),
            Err(err) => {
                prop_assert!(cyclic);
                prop_assert!(err.is_cycle());
            }
        }
    }
}
