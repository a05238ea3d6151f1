use std::collections::VecDeque;

use log::debug;

use crate::config::PairStatus;
use crate::pairs::Pair;
use crate::CandidateId;

/// The graph of committed defeats.
///
/// An edge `winner -> loser` means that the defeat of `loser` by `winner` has
/// been locked in. Edges are only ever added, and only when they keep the
/// graph acyclic.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LockedGraph {
    num_candidates: usize,
    // Row-major adjacency matrix: edges[winner * n + loser]
    edges: Vec<bool>,
}

impl LockedGraph {
    pub fn new(num_candidates: usize) -> LockedGraph {
        LockedGraph {
            num_candidates,
            edges: vec![false; num_candidates * num_candidates],
        }
    }

    pub fn num_candidates(&self) -> usize {
        self.num_candidates
    }

    pub fn is_locked(&self, winner: CandidateId, loser: CandidateId) -> bool {
        self.edges[winner.0 * self.num_candidates + loser.0]
    }

    /// All the locked edges, in candidate order.
    pub fn locked_edges(&self) -> Vec<(CandidateId, CandidateId)> {
        let n = self.num_candidates;
        (0..n)
            .flat_map(|w| (0..n).map(move |l| (CandidateId(w), CandidateId(l))))
            .filter(|(w, l)| self.is_locked(*w, *l))
            .collect()
    }

    /// True if locking `winner -> loser` would close a cycle, that is if
    /// `loser` already reaches `winner` through locked edges.
    ///
    /// The search walks the locked edges backward from `winner` and visits
    /// each candidate at most once.
    pub fn would_create_cycle(&self, winner: CandidateId, loser: CandidateId) -> bool {
        if winner == loser {
            return true;
        }
        let n = self.num_candidates;
        let mut visited = vec![false; n];
        let mut stack = vec![winner];
        visited[winner.0] = true;
        while let Some(current) = stack.pop() {
            for k in 0..n {
                let beats_current = CandidateId(k);
                if !self.is_locked(beats_current, current) {
                    continue;
                }
                if beats_current == loser {
                    return true;
                }
                if !visited[k] {
                    visited[k] = true;
                    stack.push(beats_current);
                }
            }
        }
        false
    }

    /// Locks the pair unless it would create a cycle.
    pub fn try_lock(&mut self, pair: &Pair) -> PairStatus {
        if self.would_create_cycle(pair.winner, pair.loser) {
            return PairStatus::Rejected;
        }
        self.edges[pair.winner.0 * self.num_candidates + pair.loser.0] = true;
        debug_assert!(self.is_acyclic(), "locking {:?} created a cycle", pair);
        PairStatus::Locked
    }

    /// Checks that the graph has no directed cycle (Kahn's algorithm).
    pub fn is_acyclic(&self) -> bool {
        let n = self.num_candidates;
        let mut in_degree: Vec<usize> = (0..n)
            .map(|l| (0..n).filter(|&w| self.edges[w * n + l]).count())
            .collect();
        let mut queue: VecDeque<usize> = (0..n).filter(|&c| in_degree[c] == 0).collect();
        let mut removed = 0;
        while let Some(w) = queue.pop_front() {
            removed += 1;
            for l in 0..n {
                if self.edges[w * n + l] {
                    in_degree[l] -= 1;
                    if in_degree[l] == 0 {
                        queue.push_back(l);
                    }
                }
            }
        }
        removed == n
    }
}

/// Locks the pairs in the given order, skipping the ones that would create a cycle.
///
/// Returns the final graph and the status of each pair, in the same order as the input.
pub fn lock_pairs(sorted_pairs: &[Pair], num_candidates: usize) -> (LockedGraph, Vec<PairStatus>) {
    let mut graph = LockedGraph::new(num_candidates);
    let mut statuses: Vec<PairStatus> = Vec::with_capacity(sorted_pairs.len());
    for pair in sorted_pairs.iter() {
        let status = graph.try_lock(pair);
        debug!(
            "lock_pairs: {:?} -> {:?} (margin {}): {:?}",
            pair.winner, pair.loser, pair.margin, status
        );
        statuses.push(status);
    }
    (graph, statuses)
}

/// The candidates that have no locked defeat against them, in candidate order.
pub fn find_winners(graph: &LockedGraph) -> Vec<CandidateId> {
    let n = graph.num_candidates();
    (0..n)
        .map(CandidateId)
        .filter(|&cid| !(0..n).any(|w| graph.is_locked(CandidateId(w), cid)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(winner: usize, loser: usize, margin: u64) -> Pair {
        Pair {
            winner: CandidateId(winner),
            loser: CandidateId(loser),
            margin,
        }
    }

    #[test]
    fn rejects_the_weakest_edge_of_a_cycle() {
        let pairs = vec![pair(0, 1, 3), pair(1, 2, 2), pair(2, 0, 1)];
        let (graph, statuses) = lock_pairs(&pairs, 3);
        assert_eq!(
            statuses,
            vec![PairStatus::Locked, PairStatus::Locked, PairStatus::Rejected]
        );
        assert!(!graph.is_locked(CandidateId(2), CandidateId(0)));
        assert_eq!(find_winners(&graph), vec![CandidateId(0)]);
    }

    #[test]
    fn detects_long_cycles() {
        // 0 -> 1 -> 2 -> 3 -> 4, then 4 -> 0 would close the loop.
        let mut graph = LockedGraph::new(5);
        for i in 0..4 {
            assert_eq!(graph.try_lock(&pair(i, i + 1, 1)), PairStatus::Locked);
        }
        assert!(graph.would_create_cycle(CandidateId(4), CandidateId(0)));
        assert!(graph.would_create_cycle(CandidateId(3), CandidateId(1)));
        assert!(!graph.would_create_cycle(CandidateId(0), CandidateId(4)));
        assert_eq!(graph.try_lock(&pair(4, 0, 1)), PairStatus::Rejected);
    }

    #[test]
    fn diamonds_are_not_cycles() {
        // 0 -> 1, 0 -> 2, 1 -> 3, 2 -> 3: two paths to 3, no cycle.
        let pairs = vec![pair(0, 1, 4), pair(0, 2, 4), pair(1, 3, 3), pair(2, 3, 3)];
        let (graph, statuses) = lock_pairs(&pairs, 4);
        assert!(statuses.iter().all(|s| *s == PairStatus::Locked));
        assert!(graph.would_create_cycle(CandidateId(3), CandidateId(0)));
        assert_eq!(graph.locked_edges().len(), 4);
    }

    #[test]
    fn stays_acyclic_after_every_prefix() {
        // All the ordered pairs among 5 candidates, many of which form cycles.
        let mut pairs: Vec<Pair> = Vec::new();
        for i in 0..5 {
            for j in 0..5 {
                if i != j {
                    pairs.push(pair(i, j, ((i * 7 + j * 3) % 5) as u64 + 1));
                }
            }
        }
        pairs.sort_by(|a, b| b.margin.cmp(&a.margin));
        let mut graph = LockedGraph::new(5);
        for p in pairs.iter() {
            graph.try_lock(p);
            assert!(graph.is_acyclic());
        }
        assert_eq!(find_winners(&graph).len(), 1);
    }

    #[test]
    fn total_order_has_a_single_source() {
        let pairs = vec![
            pair(2, 0, 5),
            pair(2, 1, 4),
            pair(2, 3, 3),
            pair(0, 1, 2),
            pair(0, 3, 2),
            pair(1, 3, 1),
        ];
        let (graph, _) = lock_pairs(&pairs, 4);
        assert_eq!(find_winners(&graph), vec![CandidateId(2)]);
    }

    #[test]
    fn empty_graph_has_everyone_as_source() {
        let graph = LockedGraph::new(3);
        assert_eq!(
            find_winners(&graph),
            vec![CandidateId(0), CandidateId(1), CandidateId(2)]
        );
        assert!(graph.is_acyclic());
        assert!(LockedGraph::new(0).is_acyclic());
    }

    #[test]
    fn acyclicity_check_sees_cycles() {
        let mut graph = LockedGraph::new(3);
        graph.edges[1] = true; // 0 -> 1
        graph.edges[5] = true; // 1 -> 2
        assert!(graph.is_acyclic());
        graph.edges[6] = true; // 2 -> 0
        assert!(!graph.is_acyclic());
    }
}
