//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing links.
//! Given a `NodeId n`, its outgoing links occupy the slice:
//!
//! ```text
//! link_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All link arrays (`link_from`, `link_to`, `link_length_m`, `link_speed_mps`,
//! `link_travel_time_s`) are sorted by origin node and indexed by `LinkId`.
//! Incoming links get a second index (`node_in_start` + `in_links`), a
//! permutation of `LinkId`s grouped by target node — the multi-origin search
//! traverses the graph backward, so this is its hot path.
//!
//! # Regions and boundary nodes
//!
//! Every node carries a `RegionId` (a cell of the [`Grid`][crate::Grid]
//! partition).  A node is a *boundary node* of its region iff at least one of
//! its **incoming** links originates in a different region.  Boundary nodes
//! get a dense `boundary_index` in `[0, B)` within their region, assigned in
//! ascending `NodeId` order; that index is the slot each node occupies in the
//! engine's per-boundary distance vectors.

use af_core::{GeoPoint, LinkId, NodeId, RegionId};

use crate::error::{GraphError, GraphResult};
use crate::grid::Grid;

/// Uniform fallback speed (m/s) when no speeds table is supplied: link cost
/// becomes `length / 5`.
pub const DEFAULT_SPEED_MPS: f64 = 5.0;

/// Sentinel for "not a boundary node".
const NO_BOUNDARY_INDEX: u32 = u32::MAX;

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph in SoA/CSR form, with region tags and boundary-node
/// indices.
///
/// All per-node and per-link arrays are `pub` for direct indexed access on
/// hot paths.  Do not construct directly; use [`RoadGraphBuilder`].
pub struct RoadGraph {
    // ── Node data ─────────────────────────────────────────────────────────
    /// External (CSV) id of each node.  Indexed by `NodeId`.
    pub node_ext_id: Vec<u64>,

    /// Geographic position of each node.
    pub node_pos: Vec<GeoPoint>,

    /// Region tag of each node.
    pub node_region: Vec<RegionId>,

    /// Dense per-region boundary slot, or `u32::MAX` for interior nodes.
    pub node_boundary_index: Vec<u32>,

    // ── Adjacency ─────────────────────────────────────────────────────────
    /// CSR row pointer for outgoing links.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Row pointer for incoming links into `in_links`.  Length = `node_count + 1`.
    pub node_in_start: Vec<u32>,

    /// `LinkId`s grouped by target node.
    pub in_links: Vec<LinkId>,

    // ── Link data (indexed by LinkId = position in sorted order) ──────────
    /// Origin node of each link.
    pub link_from: Vec<NodeId>,

    /// Target node of each link.
    pub link_to: Vec<NodeId>,

    /// Physical length in meters.
    pub link_length_m: Vec<f64>,

    /// Speed in meters per second.
    pub link_speed_mps: Vec<f64>,

    /// Traversal cost in seconds (`length / speed`).  The Dijkstra weight.
    pub link_travel_time_s: Vec<f64>,

    // ── Region data ───────────────────────────────────────────────────────
    region_count: usize,

    /// Boundary nodes of each region, ordered by `boundary_index`.
    region_boundary: Vec<Vec<NodeId>>,
}

impl RoadGraph {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    pub fn region_count(&self) -> usize {
        self.region_count
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Iterator over the `LinkId`s of all outgoing links from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_links(&self, node: NodeId) -> impl Iterator<Item = LinkId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| LinkId(i as u32))
    }

    /// All links whose target is `node`.
    #[inline]
    pub fn in_links(&self, node: NodeId) -> &[LinkId] {
        let start = self.node_in_start[node.index()] as usize;
        let end = self.node_in_start[node.index() + 1] as usize;
        &self.in_links[start..end]
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        (self.node_out_start[node.index() + 1] - self.node_out_start[node.index()]) as usize
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        (self.node_in_start[node.index() + 1] - self.node_in_start[node.index()]) as usize
    }

    // ── Regions & boundary nodes ──────────────────────────────────────────

    #[inline]
    pub fn region(&self, node: NodeId) -> RegionId {
        self.node_region[node.index()]
    }

    #[inline]
    pub fn is_boundary(&self, node: NodeId) -> bool {
        self.node_boundary_index[node.index()] != NO_BOUNDARY_INDEX
    }

    /// Boundary nodes of `region`, ordered by their dense `boundary_index`.
    pub fn boundary_nodes(&self, region: RegionId) -> &[NodeId] {
        &self.region_boundary[region.index()]
    }

    pub fn boundary_count(&self, region: RegionId) -> usize {
        self.region_boundary[region.index()].len()
    }

    /// Re-tag every node from the grid partition and recompute boundary data.
    pub fn assign_regions(&mut self, grid: &Grid) {
        for (i, &pos) in self.node_pos.iter().enumerate() {
            self.node_region[i] = grid.region_of(pos);
        }
        self.region_count = grid.region_count();
        self.rebuild_boundaries();
    }

    // ── Link attributes ───────────────────────────────────────────────────

    /// Override one link's speed and travel time (from a speeds table).
    ///
    /// Travel times must be finite and positive; a violation here would
    /// silently corrupt every shortest-path tree, so it is fatal.
    pub fn set_link_speed(
        &mut self,
        link: LinkId,
        speed_mps: f64,
        travel_time_s: f64,
    ) -> GraphResult<()> {
        if !(speed_mps.is_finite() && speed_mps > 0.0) {
            return Err(GraphError::InvalidSpeed { link, value: speed_mps });
        }
        if !(travel_time_s.is_finite() && travel_time_s > 0.0) {
            return Err(GraphError::InvalidTravelTime { link, value: travel_time_s });
        }
        self.link_speed_mps[link.index()] = speed_mps;
        self.link_travel_time_s[link.index()] = travel_time_s;
        Ok(())
    }

    /// Maximum speed over all links (0 for an empty graph).
    pub fn max_speed(&self) -> f64 {
        self.link_speed_mps.iter().copied().fold(0.0, f64::max)
    }

    // ── Boundary recomputation ────────────────────────────────────────────

    /// Recompute `node_boundary_index` and the per-region boundary lists.
    ///
    /// Boundary rule: a node is boundary iff some incoming link originates in
    /// a different region.
    fn rebuild_boundaries(&mut self) {
        self.region_boundary = vec![Vec::new(); self.region_count];
        for i in 0..self.node_count() {
            let node = NodeId(i as u32);
            let region = self.node_region[i];
            let crossing = self
                .in_links(node)
                .iter()
                .any(|&l| self.node_region[self.link_from[l.index()].index()] != region);
            self.node_boundary_index[i] = if crossing {
                let slot = self.region_boundary[region.index()].len() as u32;
                self.region_boundary[region.index()].push(node);
                slot
            } else {
                NO_BOUNDARY_INDEX
            };
        }
    }
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed links in any order.  `build()`
/// sorts links by origin node, constructs both adjacency structures, applies
/// the default speed, and marks boundary nodes.  Self-loops are dropped.
pub struct RoadGraphBuilder {
    ext_ids: Vec<u64>,
    positions: Vec<GeoPoint>,
    regions: Vec<RegionId>,
    raw_links: Vec<RawLink>,
}

struct RawLink {
    from: NodeId,
    to: NodeId,
    length_m: f64,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            ext_ids: Vec::new(),
            positions: Vec::new(),
            regions: Vec::new(),
            raw_links: Vec::new(),
        }
    }

    /// Pre-allocate for the expected number of nodes and links to reduce
    /// reallocations when bulk-loading from CSV.
    pub fn with_capacity(nodes: usize, links: usize) -> Self {
        Self {
            ext_ids: Vec::with_capacity(nodes),
            positions: Vec::with_capacity(nodes),
            regions: Vec::with_capacity(nodes),
            raw_links: Vec::with_capacity(links),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, ext_id: u64, pos: GeoPoint, region: RegionId) -> NodeId {
        let id = NodeId(self.positions.len() as u32);
        self.ext_ids.push(ext_id);
        self.positions.push(pos);
        self.regions.push(region);
        id
    }

    /// Add a **directed** link from `from` to `to`.  Self-loops are ignored.
    pub fn add_link(&mut self, from: NodeId, to: NodeId, length_m: f64) {
        debug_assert!(from.index() < self.positions.len());
        debug_assert!(to.index() < self.positions.len());
        if from == to {
            return;
        }
        self.raw_links.push(RawLink { from, to, length_m });
    }

    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn link_count(&self) -> usize {
        self.raw_links.len()
    }

    /// Consume the builder and produce a [`RoadGraph`].
    ///
    /// Time complexity: O(L log L) for the link sort plus two counting-sort
    /// passes for the row pointers.
    pub fn build(self) -> RoadGraph {
        let node_count = self.positions.len();
        let link_count = self.raw_links.len();

        // Sort links by origin node for CSR construction.
        let mut raw = self.raw_links;
        raw.sort_by_key(|l| l.from.0);

        let link_from: Vec<NodeId> = raw.iter().map(|l| l.from).collect();
        let link_to: Vec<NodeId> = raw.iter().map(|l| l.to).collect();
        let link_length_m: Vec<f64> = raw.iter().map(|l| l.length_m).collect();
        let link_speed_mps = vec![DEFAULT_SPEED_MPS; link_count];
        let link_travel_time_s: Vec<f64> =
            link_length_m.iter().map(|&len| len / DEFAULT_SPEED_MPS).collect();

        // Forward CSR row pointer.
        let mut node_out_start = vec![0u32; node_count + 1];
        for l in &raw {
            node_out_start[l.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, link_count);

        // Backward index: counting sort of LinkIds by target node.
        let mut node_in_start = vec![0u32; node_count + 1];
        for l in &raw {
            node_in_start[l.to.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_in_start[i] += node_in_start[i - 1];
        }
        let mut in_links = vec![LinkId::INVALID; link_count];
        let mut cursor: Vec<u32> = node_in_start[..node_count].to_vec();
        for (i, l) in raw.iter().enumerate() {
            let slot = cursor[l.to.index()];
            in_links[slot as usize] = LinkId(i as u32);
            cursor[l.to.index()] += 1;
        }

        let region_count = self
            .regions
            .iter()
            .map(|r| r.index() + 1)
            .max()
            .unwrap_or(0);

        let mut graph = RoadGraph {
            node_ext_id: self.ext_ids,
            node_pos: self.positions,
            node_region: self.regions,
            node_boundary_index: vec![NO_BOUNDARY_INDEX; node_count],
            node_out_start,
            node_in_start,
            in_links,
            link_from,
            link_to,
            link_length_m,
            link_speed_mps,
            link_travel_time_s,
            region_count,
            region_boundary: Vec::new(),
        };
        graph.rebuild_boundaries();
        graph
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
