//! The assembled road map: graph + grid partition + two k-d trees.
//!
//! Two trees index the same node set at different granularities, following
//! the shape that benchmarks best on the historical data: a small-leaf tree
//! for pickup/dropoff snapping (leaf 2) and a large-leaf tree for coarse
//! region queries (leaf 1000).

use std::io::Read;
use std::path::Path;

use af_core::geo::BBOX_EPSILON_DEG;
use af_core::{BoundingBox, GeoPoint, NodeId, PlanarPoint, RegionId};
use af_graph::{Grid, RoadGraph, DEFAULT_GRID_DIM};
use af_spatial::KdTree;

use crate::error::LoadResult;
use crate::loader;

// ── MapConfig ─────────────────────────────────────────────────────────────────

/// Assembly knobs for [`RoadMap`].
#[derive(Copy, Clone, Debug)]
pub struct MapConfig {
    /// Grid divisions per axis (`dim²` regions).
    pub grid_dim: usize,
    /// Leaf size of the nearest-node tree.  Small is fast here.
    pub lookup_leaf_size: usize,
    /// Leaf size of the region tree.  Large is fast here.
    pub region_leaf_size: usize,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            grid_dim: DEFAULT_GRID_DIM,
            lookup_leaf_size: 2,
            region_leaf_size: 1000,
        }
    }
}

// ── RoadMap ───────────────────────────────────────────────────────────────────

/// A loaded road network ready for snap queries and precomputation.
pub struct RoadMap {
    pub graph: RoadGraph,
    pub grid: Grid,
    /// Tight bounds over the node set (no epsilon).  Queries outside are
    /// rejected before any tree descent.
    pub bbox: BoundingBox,
    lookup_tree: KdTree,
    region_tree: KdTree,
}

impl RoadMap {
    /// Assemble a map from a pre-built graph: partition regions on the
    /// epsilon-expanded bounding box, mark boundaries, and index every node
    /// in both trees.
    pub fn from_parts(mut graph: RoadGraph, bbox: BoundingBox, config: &MapConfig) -> RoadMap {
        let grid = Grid::new(bbox.expand_max(BBOX_EPSILON_DEG), config.grid_dim);
        graph.assign_regions(&grid);

        let entries: Vec<(PlanarPoint, NodeId)> = graph
            .node_pos
            .iter()
            .enumerate()
            .map(|(i, &pos)| (pos.to_planar(), NodeId(i as u32)))
            .collect();
        let lookup_tree = KdTree::build(entries.clone(), config.lookup_leaf_size);
        let region_tree = KdTree::build(entries, config.region_leaf_size);

        RoadMap { graph, grid, bbox, lookup_tree, region_tree }
    }

    /// Load and assemble from node and link CSV sources.
    pub fn load<N: Read, L: Read>(nodes: N, links: L, config: &MapConfig) -> LoadResult<RoadMap> {
        let (graph, bbox) = loader::load_graph(nodes, links)?;
        Ok(RoadMap::from_parts(graph, bbox, config))
    }

    /// Like [`load`](Self::load) but opening the two files.
    pub fn load_paths(nodes: &Path, links: &Path, config: &MapConfig) -> LoadResult<RoadMap> {
        let (graph, bbox) = loader::load_graph_paths(nodes, links)?;
        Ok(RoadMap::from_parts(graph, bbox, config))
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Nearest node to the query coordinate, or `None` when the query falls
    /// outside the map's bounding box (inclusive on the edges).
    pub fn nearest_node(&self, lat: f64, lon: f64) -> Option<NodeId> {
        self.nearest_node_with_distance(lat, lon).map(|(id, _)| id)
    }

    /// Nearest node and its planar distance in meters.
    pub fn nearest_node_with_distance(&self, lat: f64, lon: f64) -> Option<(NodeId, f64)> {
        let p = GeoPoint::new(lat, lon);
        if !self.bbox.contains(p) {
            return None;
        }
        self.lookup_tree.nearest(p.to_planar())
    }

    /// Region of the node nearest to the query, answered through the
    /// large-leaf tree.
    pub fn nearest_region(&self, lat: f64, lon: f64) -> Option<RegionId> {
        let p = GeoPoint::new(lat, lon);
        if !self.bbox.contains(p) {
            return None;
        }
        self.region_tree
            .nearest(p.to_planar())
            .map(|(id, _)| self.graph.region(id))
    }

    /// Geometric region of a coordinate, straight from the grid.
    pub fn region_of(&self, p: GeoPoint) -> RegionId {
        self.grid.region_of(p)
    }

    /// Maximum link speed in the map.
    pub fn max_speed(&self) -> f64 {
        self.graph.max_speed()
    }
}
