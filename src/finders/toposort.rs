//! Deterministic topological ordering of symbols.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use tracing::error;

use crate::error::CycleError;
use crate::symbols::{EdgeMap, Symbol};

/// Order `symbols` so that every symbol comes after all of its incoming
/// edges.
///
/// Among symbols whose predecessors are all placed, the one appearing first
/// in `symbols` goes next, so the result is stable for a given input.
/// Predecessors that are not in `symbols` count as already placed. Repeated
/// input symbols are emitted once, at their first position's priority.
///
/// Returns a [`CycleError`] listing the symbols that could not be placed when
/// the edges loop.
pub fn topological_sort(symbols: &[Symbol], incoming: &EdgeMap) -> Result<Vec<Symbol>, CycleError> {
    // Symbol → position of its first occurrence.
    let mut positions: IndexMap<Symbol, usize, FxBuildHasher> = IndexMap::default();
    for &symbol in symbols {
        let next = positions.len();
        positions.entry(symbol).or_insert(next);
    }
    let nodes: Vec<Symbol> = positions.keys().copied().collect();

    let mut pending = vec![0usize; nodes.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for (index, symbol) in nodes.iter().enumerate() {
        let Some(predecessors) = incoming.get(symbol) else {
            continue;
        };
        for predecessor in predecessors {
            if let Some(&from) = positions.get(predecessor) {
                pending[index] += 1;
                dependents[from].push(index);
            }
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = pending
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count == 0)
        .map(|(index, _)| Reverse(index))
        .collect();

    let mut sorted = Vec::with_capacity(nodes.len());
    while let Some(Reverse(index)) = ready.pop() {
        sorted.push(nodes[index]);
        for &dependent in &dependents[index] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if sorted.len() < nodes.len() {
        let unplaced: Vec<Symbol> = nodes
            .iter()
            .zip(&pending)
            .filter(|&(_, &count)| count > 0)
            .map(|(&symbol, _)| symbol)
            .collect();
        error!(
            placed = sorted.len(),
            unplaced = ?unplaced,
            "cycle in incoming edges"
        );
        return Err(CycleError { unplaced });
    }

    Ok(sorted)
}
