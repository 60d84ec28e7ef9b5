//! Arc-flag CSV persistence.
//!
//! One row per link:
//!
//! ```csv
//! begin_node_id,end_node_id,hex_flags
//! 42,97,000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000a
//! ```
//!
//! Links are identified by their endpoints' external ids so the file stays
//! meaningful across reloads of the same node/link data.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Deserialize;

use af_core::RegionMask;
use af_engine::ArcFlagTable;
use af_graph::RoadGraph;

use crate::error::LoadResult;
use crate::loader::link_index;

#[derive(Deserialize)]
struct FlagRecord {
    begin_node_id: u64,
    end_node_id: u64,
    hex_flags: String,
}

/// Write the full flag table, one row per link in `LinkId` order.
pub fn write_arc_flags<W: Write>(
    writer: W,
    graph: &RoadGraph,
    table: &ArcFlagTable,
) -> LoadResult<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["begin_node_id", "end_node_id", "hex_flags"])?;
    for (l, mask) in table.masks().iter().enumerate() {
        out.write_record(&[
            graph.node_ext_id[graph.link_from[l].index()].to_string(),
            graph.node_ext_id[graph.link_to[l].index()].to_string(),
            mask.to_hex(),
        ])?;
    }
    out.flush()?;
    Ok(())
}

/// Like [`write_arc_flags`] but creating the file.
pub fn write_arc_flags_path(
    path: &Path,
    graph: &RoadGraph,
    table: &ArcFlagTable,
) -> LoadResult<()> {
    write_arc_flags(File::create(path)?, graph, table)
}

/// Read a flag table back for `graph`.  Rows naming unknown links are
/// skipped silently; malformed hex is an error.
pub fn read_arc_flags<R: Read>(reader: R, graph: &RoadGraph) -> LoadResult<ArcFlagTable> {
    let width = graph.region_count();
    let index = link_index(graph);
    let mut table = ArcFlagTable::new(graph.link_count(), width);

    let mut input = csv::Reader::from_reader(reader);
    for result in input.deserialize::<FlagRecord>() {
        let row = result?;
        let Some(&link) = index.get(&(row.begin_node_id, row.end_node_id)) else {
            continue;
        };
        *table.mask_mut(link) = RegionMask::from_hex(&row.hex_flags, width)?;
    }
    Ok(table)
}

/// Like [`read_arc_flags`] but opening the file.
pub fn read_arc_flags_path(path: &Path, graph: &RoadGraph) -> LoadResult<ArcFlagTable> {
    read_arc_flags(File::open(path)?, graph)
}
