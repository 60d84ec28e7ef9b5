//! Multi-origin Dijkstra over the reversed graph.
//!
//! One run processes one target region R.  Every boundary node of R is a
//! simultaneous origin: each node carries a *vector* of B distances instead
//! of a scalar, and expanding a node relaxes all B slots across each incoming
//! link at once.  Because the sweep walks backward links, `dist[n][i]` ends
//! up as the cost of the shortest forward path from `n` to boundary `i`.
//!
//! # Priority
//!
//! Two queue keys are supported:
//!
//! - [`PriorityMode::MinTime`] — the classic Dijkstra key, `min_i dist[n][i]`.
//! - [`PriorityMode::Domination`] — the negated count of vector slots changed
//!   since the node's last expansion.  Nodes whose shortest-path information
//!   changed the most are expanded first, which amortizes work when a node
//!   would otherwise be re-expanded once per boundary origin.
//!
//! The heap is lazy: entries are never re-keyed in place.  A popped node
//! whose snapshot already equals its distance vector (domination 0) is
//! stale and skipped, which doubles as the termination guard.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use af_core::{LinkId, NodeId, RegionId};
use af_graph::RoadGraph;

use crate::error::{EngineError, EngineResult};
use crate::scratch::SearchScratch;

// ── Priority mode ─────────────────────────────────────────────────────────────

/// Queue key selector for the multi-origin search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum PriorityMode {
    /// Expand the node with the smallest distance-vector minimum.
    MinTime,
    /// Expand the node with the most changed slots since its last expansion.
    #[default]
    Domination,
}

// ── Queue entry ───────────────────────────────────────────────────────────────

/// Min-heap entry: smaller key first, then earlier insertion.
struct QueueEntry {
    key: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    /// Reversed so that `BinaryHeap` (a max-heap) pops the smallest
    /// `(key, seq)` first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Run the multi-origin Dijkstra for `region`, filling `scratch` with the
/// distance vectors and predecessor links of every reachable node.
///
/// A region with no boundary nodes is a no-op.  Returns the number of node
/// expansions performed.
pub fn search_region(
    graph: &RoadGraph,
    region: RegionId,
    mode: PriorityMode,
    scratch: &mut SearchScratch,
) -> EngineResult<usize> {
    for (l, &t) in graph.link_travel_time_s.iter().enumerate() {
        if !(t >= 0.0) {
            return Err(EngineError::NegativeTravelTime {
                link: LinkId(l as u32),
                value: t,
            });
        }
    }

    let boundary = graph.boundary_nodes(region);
    let b = boundary.len();
    scratch.reset(graph.node_count(), b);
    if b == 0 {
        return Ok(0);
    }

    let mut heap: BinaryHeap<QueueEntry> = BinaryHeap::new();
    let mut seq = 0u64;
    let mut push = |heap: &mut BinaryHeap<QueueEntry>, key: f64, node: NodeId| {
        heap.push(QueueEntry { key, seq, node });
        seq += 1;
    };

    // Each boundary node starts at cost 0 from itself.
    for (i, &bn) in boundary.iter().enumerate() {
        let row = scratch.row(bn);
        scratch.dist[row.start + i] = 0.0;
        scratch.in_queue[bn.index()] = true;
    }
    for &bn in boundary {
        push(&mut heap, priority(scratch, bn, mode), bn);
    }

    let mut expansions = 0;
    while let Some(entry) = heap.pop() {
        let n = entry.node;
        scratch.in_queue[n.index()] = false;

        // Stale entry, or nothing changed since the last expansion.
        if scratch.domination(n) == 0 {
            continue;
        }

        scratch.take_snapshot(n);
        expansions += 1;

        let row_n = scratch.row(n);
        for &l in graph.in_links(n) {
            let m = graph.link_from[l.index()];
            let w = graph.link_travel_time_s[l.index()];
            let row_m = scratch.row(m);

            // The snapshot row just taken equals dist[n], and m ≠ n (no
            // self-loops), so reading source values from `snap` sidesteps
            // any aliasing with the writes into dist[m].
            let mut changed = false;
            for i in 0..b {
                let cand = scratch.snap[row_n.start + i] + w;
                if cand < scratch.dist[row_m.start + i] {
                    scratch.dist[row_m.start + i] = cand;
                    scratch.pred[row_m.start + i] = l;
                    changed = true;
                }
            }
            if !changed {
                continue;
            }
            scratch.update_count[m.index()] += 1;

            if !scratch.in_queue[m.index()] {
                scratch.in_queue[m.index()] = true;
                push(&mut heap, priority(scratch, m, mode), m);
            } else if mode == PriorityMode::Domination {
                // Lazy re-key: push a fresh entry, the stale one will be
                // skipped by the domination-0 check when popped.
                push(&mut heap, priority(scratch, m, mode), m);
            }
        }
    }

    Ok(expansions)
}

/// Queue key for `n` under the given mode (smaller = expanded sooner).
fn priority(scratch: &SearchScratch, n: NodeId, mode: PriorityMode) -> f64 {
    match mode {
        PriorityMode::MinTime => scratch.min_dist(n),
        PriorityMode::Domination => -(scratch.domination(n) as f64),
    }
}
