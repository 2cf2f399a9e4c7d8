//! Property-based tests for `topological_sort`.
//!
//! Graphs are generated acyclic by construction: an edge always points from
//! a lower node number to a higher one, while the input order handed to the
//! sorter is shuffled independently.

use proptest::prelude::*;
use syster_finders::finders::topological_sort;
use syster_finders::symbols::{EdgeMap, SymbolSet};
use syster_finders::{ProjectId, Symbol, SymbolKey};

fn sym(key: usize) -> Symbol {
    Symbol::new(SymbolKey::new(key as u32), ProjectId::new(0))
}

fn edge_map(edges: &[(usize, usize)]) -> EdgeMap {
    let mut map = EdgeMap::default();
    for &(from, to) in edges {
        map.entry(sym(to)).or_insert_with(SymbolSet::default).insert(sym(from));
    }
    map
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// (input order, acyclic edges as (predecessor, successor)).
fn arb_dag() -> impl Strategy<Value = (Vec<usize>, Vec<(usize, usize)>)> {
    (1usize..24).prop_flat_map(|n| {
        let order = Just((0..n).collect::<Vec<_>>()).prop_shuffle();
        let edges = prop::collection::vec((0..n, 0..n), 0..n * 3).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter(|(a, b)| a != b)
                .map(|(a, b)| (a.min(b), a.max(b)))
                .collect::<Vec<_>>()
        });
        (order, edges)
    })
}

proptest! {
    #[test]
    fn prop_predecessors_precede((order, edges) in arb_dag()) {
        let input: Vec<Symbol> = order.iter().copied().map(sym).collect();
        let sorted = topological_sort(&input, &edge_map(&edges)).unwrap();

        prop_assert_eq!(sorted.len(), input.len());
        let position = |s: Symbol| sorted.iter().position(|&x| x == s).unwrap();
        for &(from, to) in &edges {
            prop_assert!(position(sym(from)) < position(sym(to)), "{} must precede {}", from, to);
        }
    }

    #[test]
    fn prop_sort_is_deterministic((order, edges) in arb_dag()) {
        let input: Vec<Symbol> = order.iter().copied().map(sym).collect();
        let map = edge_map(&edges);
        let first = topological_sort(&input, &map).unwrap();
        let second = topological_sort(&input, &map).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_no_edges_is_identity(order in Just((0..16).collect::<Vec<usize>>()).prop_shuffle()) {
        let input: Vec<Symbol> = order.iter().copied().map(sym).collect();
        let sorted = topological_sort(&input, &EdgeMap::default()).unwrap();
        prop_assert_eq!(sorted, input);
    }

    #[test]
    fn prop_back_edge_is_reported((order, mut edges) in arb_dag(), extra in 2usize..6) {
        // Close a chain 0 → 1 → … → extra → 0.
        let n = order.len().max(extra + 1);
        let order: Vec<usize> = (0..n).collect();
        for node in 0..extra {
            edges.push((node, node + 1));
        }
        edges.push((extra, 0));

        let input: Vec<Symbol> = order.iter().copied().map(sym).collect();
        let err = topological_sort(&input, &edge_map(&edges)).unwrap_err();
        for node in 0..=extra {
            prop_assert!(err.unplaced.contains(&sym(node)));
        }
    }
}
