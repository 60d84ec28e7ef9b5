//! Node / link / speeds CSV loaders.
//!
//! # CSV formats
//!
//! The node and link files carry the full historical schemas; columns are
//! selected by header name and everything else is ignored.
//!
//! Nodes (11 columns, 4 consumed):
//!
//! ```csv
//! node_id,is_complete,num_in_links,num_out_links,osm_traffic_controller,longitude,latitude,osm_changeset,birth_timestamp,death_timestamp,region_id
//! ```
//!
//! Links (16 columns, 3 consumed):
//!
//! ```csv
//! link_id,begin_node_id,end_node_id,begin_angle,end_angle,street_length,...
//! ```
//!
//! A link referencing a node id absent from the node file is dropped
//! silently — the historical data contains plenty of those.
//!
//! The optional speeds table replaces the uniform default speed:
//!
//! ```csv
//! begin_node_id,end_node_id,speed,travel_time
//! ```
//!
//! Rows whose `travel_time` is not positive are skipped, as are rows naming
//! an unknown link.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use af_core::{BoundingBox, GeoPoint, LinkId, NodeId, RegionId};
use af_graph::{RoadGraph, RoadGraphBuilder};

use crate::error::LoadResult;

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct NodeRecord {
    node_id: u64,
    longitude: f64,
    latitude: f64,
    region_id: u16,
}

#[derive(Deserialize)]
struct LinkRecord {
    begin_node_id: u64,
    end_node_id: u64,
    street_length: f64,
}

#[derive(Deserialize)]
struct SpeedRecord {
    begin_node_id: u64,
    end_node_id: u64,
    speed: f64,
    travel_time: f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a graph from node and link CSV sources.
///
/// Returns the built graph together with the bounding box grown over every
/// node position (unexpanded — callers add the grid epsilon themselves).
pub fn load_graph<N: Read, L: Read>(nodes: N, links: L) -> LoadResult<(RoadGraph, BoundingBox)> {
    let mut builder = RoadGraphBuilder::new();
    let mut by_ext: FxHashMap<u64, NodeId> = FxHashMap::default();
    let mut bbox = BoundingBox::EMPTY;

    let mut reader = csv::Reader::from_reader(nodes);
    for result in reader.deserialize::<NodeRecord>() {
        let row = result?;
        let pos = GeoPoint::new(row.latitude, row.longitude);
        bbox.grow(pos);
        let id = builder.add_node(row.node_id, pos, RegionId(row.region_id));
        by_ext.insert(row.node_id, id);
    }

    let mut reader = csv::Reader::from_reader(links);
    for result in reader.deserialize::<LinkRecord>() {
        let row = result?;
        let (Some(&from), Some(&to)) = (
            by_ext.get(&row.begin_node_id),
            by_ext.get(&row.end_node_id),
        ) else {
            continue; // dangling link
        };
        builder.add_link(from, to, row.street_length);
    }

    Ok((builder.build(), bbox))
}

/// Like [`load_graph`] but opening the two files.
pub fn load_graph_paths(nodes: &Path, links: &Path) -> LoadResult<(RoadGraph, BoundingBox)> {
    load_graph(File::open(nodes)?, File::open(links)?)
}

/// `(begin_ext_id, end_ext_id) → LinkId` lookup for applying per-link tables.
pub fn link_index(graph: &RoadGraph) -> FxHashMap<(u64, u64), LinkId> {
    let mut index = FxHashMap::default();
    for l in 0..graph.link_count() {
        let from = graph.node_ext_id[graph.link_from[l].index()];
        let to = graph.node_ext_id[graph.link_to[l].index()];
        index.insert((from, to), LinkId(l as u32));
    }
    index
}

/// Apply a speeds table to an already-built graph.  Returns the number of
/// links updated.
pub fn apply_speeds<R: Read>(graph: &mut RoadGraph, speeds: R) -> LoadResult<usize> {
    let index = link_index(graph);
    let mut applied = 0;

    let mut reader = csv::Reader::from_reader(speeds);
    for result in reader.deserialize::<SpeedRecord>() {
        let row = result?;
        if row.travel_time <= 0.0 {
            continue;
        }
        let Some(&link) = index.get(&(row.begin_node_id, row.end_node_id)) else {
            continue;
        };
        graph.set_link_speed(link, row.speed, row.travel_time)?;
        applied += 1;
    }
    Ok(applied)
}

/// Like [`apply_speeds`] but opening the file.
pub fn apply_speeds_path(graph: &mut RoadGraph, speeds: &Path) -> LoadResult<usize> {
    apply_speeds(graph, File::open(speeds)?)
}
