//! Per-worker search state.
//!
//! The multi-origin Dijkstra needs four values per (node, boundary) pair.
//! Rather than hanging them off graph nodes, each worker owns one
//! `SearchScratch`: flat row-major `node_count × width` slabs, reset (not
//! reallocated) at the start of every region.  The graph itself stays
//! immutable and shared, which is what makes region-level parallelism safe.

use std::ops::Range;

use af_core::{LinkId, NodeId};

/// Scratch slabs for one multi-origin run.  `width` is B, the boundary-node
/// count of the region being processed.
pub struct SearchScratch {
    nodes: usize,
    width: usize,

    /// `dist[n × width + i]`: best known cost from node `n` to boundary `i`.
    pub dist: Vec<f64>,

    /// Copy of `dist` rows taken at each node's last expansion.
    pub snap: Vec<f64>,

    /// `pred[n × width + i]`: the link leaving `n` toward boundary `i` on the
    /// best known path, or `LinkId::INVALID`.
    pub pred: Vec<LinkId>,

    /// Relaxations received since the node's last expansion.
    pub update_count: Vec<u32>,

    /// Queue membership flags for the search.
    pub in_queue: Vec<bool>,
}

impl SearchScratch {
    /// An empty scratch; call [`reset`](Self::reset) before use.
    pub fn new() -> Self {
        Self {
            nodes: 0,
            width: 0,
            dist: Vec::new(),
            snap: Vec::new(),
            pred: Vec::new(),
            update_count: Vec::new(),
            in_queue: Vec::new(),
        }
    }

    /// Size the slabs for a `nodes × width` run and reinitialize everything:
    /// distances and snapshots to +∞, predecessors to the invalid sentinel,
    /// counters to zero.
    pub fn reset(&mut self, nodes: usize, width: usize) {
        self.nodes = nodes;
        self.width = width;
        let cells = nodes * width;

        self.dist.clear();
        self.dist.resize(cells, f64::INFINITY);
        self.snap.clear();
        self.snap.resize(cells, f64::INFINITY);
        self.pred.clear();
        self.pred.resize(cells, LinkId::INVALID);
        self.update_count.clear();
        self.update_count.resize(nodes, 0);
        self.in_queue.clear();
        self.in_queue.resize(nodes, false);
    }

    /// Boundary-vector width (B) of the current run.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Slab range of node `n`'s row.
    #[inline]
    pub fn row(&self, n: NodeId) -> Range<usize> {
        let start = n.index() * self.width;
        start..start + self.width
    }

    /// Number of slots where the distance vector differs from the snapshot —
    /// the node's domination value.  Zero means expansion would be a no-op.
    pub fn domination(&self, n: NodeId) -> usize {
        let r = self.row(n);
        self.dist[r.clone()]
            .iter()
            .zip(&self.snap[r])
            .filter(|(d, s)| d != s)
            .count()
    }

    /// Smallest entry of the node's distance vector (+∞ if untouched).
    pub fn min_dist(&self, n: NodeId) -> f64 {
        let r = self.row(n);
        self.dist[r].iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// Copy the node's distance row into its snapshot row and clear its
    /// update counter.  Called exactly once per expansion, before relaxing.
    pub fn take_snapshot(&mut self, n: NodeId) {
        let r = self.row(n);
        let (dist, snap) = (&self.dist[r.clone()], &mut self.snap[r]);
        snap.copy_from_slice(dist);
        self.update_count[n.index()] = 0;
    }
}

impl Default for SearchScratch {
    fn default() -> Self {
        Self::new()
    }
}
