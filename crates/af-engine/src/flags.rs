//! Arc-flag extraction and the per-link flag table.
//!
//! After a region's search, every link lying on any of the B shortest-path
//! trees gets that region's bit.  Walking predecessor chains node by node
//! would revisit shared path prefixes over and over; instead we use the fact
//! that a link is on some tree **iff** it is the recorded predecessor
//! `pred[m][i]` of its own origin `m` for at least one slot `i` — one pass
//! over the `N × B` predecessor slab collects the whole set.

use af_core::{LinkId, RegionId, RegionMask};
use af_graph::RoadGraph;

use crate::error::EngineResult;
use crate::scratch::SearchScratch;
use crate::search::{search_region, PriorityMode};

// ── ArcFlagTable ──────────────────────────────────────────────────────────────

/// One [`RegionMask`] per link, indexed by `LinkId`.
///
/// Bits are only ever set (once per region, during precomputation); the
/// table is read-only at query time.
pub struct ArcFlagTable {
    masks: Vec<RegionMask>,
    region_count: usize,
}

impl ArcFlagTable {
    /// All-zero table for `link_count` links over `region_count` regions.
    pub fn new(link_count: usize, region_count: usize) -> Self {
        Self {
            masks: vec![RegionMask::new(region_count); link_count],
            region_count,
        }
    }

    pub fn link_count(&self) -> usize {
        self.masks.len()
    }

    pub fn region_count(&self) -> usize {
        self.region_count
    }

    #[inline]
    pub fn mask(&self, link: LinkId) -> &RegionMask {
        &self.masks[link.index()]
    }

    #[inline]
    pub fn mask_mut(&mut self, link: LinkId) -> &mut RegionMask {
        &mut self.masks[link.index()]
    }

    /// Set bit `region` on every link in `links`.
    pub fn set_region(&mut self, region: RegionId, links: &[LinkId]) {
        for &l in links {
            self.masks[l.index()].set(region.index());
        }
    }

    /// `true` if `link` participates in some shortest path into `region`.
    #[inline]
    pub fn is_reachable(&self, link: LinkId, region: RegionId) -> bool {
        self.masks[link.index()].get(region.index())
    }

    /// All masks, indexed by `LinkId`.
    pub fn masks(&self) -> &[RegionMask] {
        &self.masks
    }
}

// ── Extraction ────────────────────────────────────────────────────────────────

/// Collect every link recorded as a predecessor in `scratch`, deduplicated,
/// ordered by first appearance scanning nodes then slots.
pub fn flagged_links(graph: &RoadGraph, scratch: &SearchScratch) -> Vec<LinkId> {
    let b = scratch.width();
    let mut seen = vec![false; graph.link_count()];
    let mut links = Vec::new();
    for cell in 0..graph.node_count() * b {
        let l = scratch.pred[cell];
        if l.is_valid() && !seen[l.index()] {
            seen[l.index()] = true;
            links.push(l);
        }
    }
    links
}

/// Run the search for one region and return the links to flag for it.
pub fn precompute_region(
    graph: &RoadGraph,
    region: RegionId,
    mode: PriorityMode,
    scratch: &mut SearchScratch,
) -> EngineResult<Vec<LinkId>> {
    search_region(graph, region, mode, scratch)?;
    Ok(flagged_links(graph, scratch))
}

/// Sequential driver: run every region on the calling thread and assemble
/// the full flag table.
pub fn precompute_arc_flags(graph: &RoadGraph, mode: PriorityMode) -> EngineResult<ArcFlagTable> {
    let mut table = ArcFlagTable::new(graph.link_count(), graph.region_count());
    let mut scratch = SearchScratch::new();
    for r in 0..graph.region_count() {
        let region = RegionId(r as u16);
        let links = precompute_region(graph, region, mode, &mut scratch)?;
        table.set_region(region, &links);
    }
    Ok(table)
}
