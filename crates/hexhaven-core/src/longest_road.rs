//! Longest-road calculation over a player's road set.
//!
//! Depth-first walk from both endpoints of every road in the set, tracking
//! the set of traversed *edges*. Nodes may be revisited, which is what
//! makes loops count correctly, but no road is reused within one walk.
//! Exponential on paper; in practice the branching factor is at most three
//! and road sets are game-sized.

use std::collections::HashSet;

use crate::graph::{BoardGraph, NodeId, RoadId};

/// Length in edges of the longest simple path through the given roads.
/// Road ids not present on the board are ignored; an empty set yields 0.
pub fn longest_route(board: &BoardGraph, roads: &[RoadId]) -> u32 {
    let set: HashSet<RoadId> = roads
        .iter()
        .copied()
        .filter(|&r| board.road(r).is_some())
        .collect();

    let mut best = 0;
    for &road in &set {
        let (a, b) = board
            .road(road)
            .expect("road filtered against the board")
            .endpoints();
        for start in [a, b] {
            let mut visited = HashSet::new();
            best = best.max(walk(board, &set, start, &mut visited));
        }
    }
    best
}

fn walk(
    board: &BoardGraph,
    set: &HashSet<RoadId>,
    node: NodeId,
    visited: &mut HashSet<RoadId>,
) -> u32 {
    let mut max_depth = 0;
    let incident = board
        .site(node)
        .map(|s| s.roads().to_vec())
        .unwrap_or_default();
    for road in incident {
        if !set.contains(&road) || visited.contains(&road) {
            continue;
        }
        let next = board
            .road(road)
            .and_then(|r| r.neighbour(node))
            .expect("incident road has this node as endpoint");
        visited.insert(road);
        max_depth = max_depth.max(1 + walk(board, set, next, visited));
        visited.remove(&road);
    }
    max_depth
}
