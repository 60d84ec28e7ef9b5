//! Hierarchical region dispatch.
//!
//! Regions are independent jobs, so the precomputation parallelizes at the
//! region level: a tree of workers where every internal node is a *manager*
//! that keeps one batch of jobs for itself, hands each child a contiguous
//! slice sized by that child's subtree, and then processes its own batch
//! while the children run.  A manager only reports completion once all of
//! its dispatched children have.
//!
//! Workers are scoped threads; completion signaling is the join, and a
//! panicking worker fails the whole job.  Each worker owns its own
//! [`SearchScratch`], so the only shared state is the immutable graph.

use std::collections::VecDeque;

use af_core::{LinkId, RegionId};
use af_graph::RoadGraph;

use crate::error::{EngineError, EngineResult};
use crate::flags::{precompute_region, ArcFlagTable};
use crate::scratch::SearchScratch;
use crate::search::PriorityMode;

// ── DispatchConfig ────────────────────────────────────────────────────────────

/// Shape of the worker tree and the per-worker batch size.
#[derive(Copy, Clone, Debug)]
pub struct DispatchConfig {
    /// Total workers (tree nodes), managers included.
    pub workers: usize,
    /// Maximum children per manager.
    pub branching_factor: usize,
    /// Jobs each worker takes per dispatch wave.
    pub batch_size: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            branching_factor: 2,
            batch_size: 1,
        }
    }
}

// ── WorkerTree ────────────────────────────────────────────────────────────────

/// The dispatch plan: a tree of the desired size grown breadth-first with at
/// most `branching_factor` children per node.  Ids are creation order (0 =
/// root); each node records its subtree size, which determines how many jobs
/// its slice gets.
pub struct WorkerTree {
    nodes: Vec<TreeNode>,
}

struct TreeNode {
    children: Vec<usize>,
    size: usize,
}

impl WorkerTree {
    pub fn new(desired_size: usize, branching_factor: usize) -> Self {
        let desired = desired_size.max(1);
        let branching = branching_factor.max(1);

        let mut nodes = vec![TreeNode { children: Vec::new(), size: 1 }];
        let mut queue: VecDeque<usize> = VecDeque::from([0]);
        while nodes.len() < desired {
            let Some(parent) = queue.pop_front() else { break };
            for _ in 0..branching {
                if nodes.len() >= desired {
                    break;
                }
                let id = nodes.len();
                nodes.push(TreeNode { children: Vec::new(), size: 1 });
                nodes[parent].children.push(id);
                queue.push_back(id);
            }
        }

        // Children always have larger ids than their parent, so one reverse
        // pass fills in every subtree size.
        for id in (0..nodes.len()).rev() {
            let child_sum: usize = nodes[id].children.iter().map(|&c| nodes[c].size).sum();
            nodes[id].size = 1 + child_sum;
        }

        Self { nodes }
    }

    /// Total number of workers in the tree.
    pub fn worker_count(&self) -> usize {
        self.nodes.len()
    }

    /// Child ids of `id`, in dispatch order.
    pub fn children(&self, id: usize) -> &[usize] {
        &self.nodes[id].children
    }

    /// Number of workers in the subtree rooted at `id` (including `id`).
    pub fn subtree_size(&self, id: usize) -> usize {
        self.nodes[id].size
    }
}

// ── Execution ─────────────────────────────────────────────────────────────────

struct RunCtx<'a> {
    graph: &'a RoadGraph,
    tree: &'a WorkerTree,
    mode: PriorityMode,
    batch_size: usize,
}

impl RunCtx<'_> {
    /// Process `jobs` on the subtree rooted at `id`: keep the first batch
    /// for this worker, slice the rest across the children proportionally to
    /// their subtree sizes, then work while they run.
    fn process_batch(
        &self,
        id: usize,
        jobs: &[RegionId],
    ) -> EngineResult<Vec<(RegionId, Vec<LinkId>)>> {
        let own = self.batch_size.min(jobs.len());
        let (mine, rest) = jobs.split_at(own);

        std::thread::scope(|scope| {
            let mut handles = Vec::new();
            let mut cursor = 0;
            for &child in self.tree.children(id) {
                if cursor >= rest.len() {
                    break; // out of jobs; remaining children stay idle
                }
                let end = (cursor + self.tree.subtree_size(child) * self.batch_size)
                    .min(rest.len());
                let slice = &rest[cursor..end];
                handles.push(scope.spawn(move || self.process_batch(child, slice)));
                cursor = end;
            }

            let mut out = Vec::with_capacity(jobs.len());
            let mut scratch = SearchScratch::new();
            for &region in mine {
                let links = precompute_region(self.graph, region, self.mode, &mut scratch)?;
                out.push((region, links));
            }

            for h in handles {
                out.extend(h.join().map_err(|_| EngineError::WorkerPanicked)??);
            }
            Ok(out)
        })
    }
}

/// Parallel driver: precompute every region's flags through the worker tree.
///
/// Equivalent to [`precompute_arc_flags`][crate::flags::precompute_arc_flags]
/// in its output; regions complete in no particular order across workers.
pub fn precompute_arc_flags_parallel(
    graph: &RoadGraph,
    mode: PriorityMode,
    config: &DispatchConfig,
) -> EngineResult<ArcFlagTable> {
    let tree = WorkerTree::new(config.workers, config.branching_factor);
    let batch_size = config.batch_size.max(1);
    let ctx = RunCtx { graph, tree: &tree, mode, batch_size };

    let regions: Vec<RegionId> = (0..graph.region_count())
        .map(|r| RegionId(r as u16))
        .collect();

    // One wave saturates the whole tree; larger region sets go in waves.
    let wave = tree.worker_count() * batch_size;
    let mut table = ArcFlagTable::new(graph.link_count(), graph.region_count());
    for chunk in regions.chunks(wave) {
        for (region, links) in ctx.process_batch(0, chunk)? {
            table.set_region(region, &links);
        }
    }
    Ok(table)
}
