//! Static 2-D k-d tree over planar-projected node coordinates.
//!
//! # Construction
//!
//! The point set is split recursively along the **longest dimension** of its
//! bounding box, at the median (`select_nth_unstable_by`), until at most
//! `leaf_size` points remain.  Small leaves favor nearest-neighbor queries;
//! large leaves favor bulk region scans — the map builds one tree of each
//! kind.  Above a size cutoff the two halves build in parallel via
//! `rayon::join`.
//!
//! # Queries
//!
//! Nearest-neighbor search descends the near side of each split first, then
//! visits the far side only if its bounding box could still contain a closer
//! point than the best found so far.  Ties in distance are broken by the
//! first point seen in traversal order.

use af_core::{NodeId, PlanarPoint};

/// Below this size, subtree construction stays on the calling thread.
const PARALLEL_BUILD_CUTOFF: usize = 1024;

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in the projected plane.
#[derive(Copy, Clone, Debug)]
struct Bounds {
    min: [f64; 2],
    max: [f64; 2],
}

impl Bounds {
    fn of(entries: &[(PlanarPoint, NodeId)]) -> Bounds {
        let mut b = Bounds {
            min: [f64::INFINITY; 2],
            max: [f64::NEG_INFINITY; 2],
        };
        for &(p, _) in entries {
            for axis in 0..2 {
                b.min[axis] = b.min[axis].min(p.coord(axis));
                b.max[axis] = b.max[axis].max(p.coord(axis));
            }
        }
        b
    }

    /// The axis with the larger extent.
    fn longest_axis(&self) -> usize {
        if self.max[0] - self.min[0] >= self.max[1] - self.min[1] {
            0
        } else {
            1
        }
    }

    /// Squared distance from `q` to the nearest point of the rectangle
    /// (0 when `q` is inside).
    fn min_dist_sq(&self, q: PlanarPoint) -> f64 {
        let mut d2 = 0.0;
        for axis in 0..2 {
            let c = q.coord(axis);
            let gap = if c < self.min[axis] {
                self.min[axis] - c
            } else if c > self.max[axis] {
                c - self.max[axis]
            } else {
                0.0
            };
            d2 += gap * gap;
        }
        d2
    }
}

// ── Tree nodes ────────────────────────────────────────────────────────────────

struct TreeNode {
    bounds: Bounds,
    kind: NodeKind,
}

enum NodeKind {
    Leaf(Vec<(PlanarPoint, NodeId)>),
    Split {
        axis: usize,
        /// Minimum coordinate of the right half along `axis`; points with a
        /// smaller coordinate live in the left subtree.
        value: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn build(mut entries: Vec<(PlanarPoint, NodeId)>, leaf_size: usize) -> TreeNode {
        let bounds = Bounds::of(&entries);
        if entries.len() <= leaf_size {
            return TreeNode {
                bounds,
                kind: NodeKind::Leaf(entries),
            };
        }

        let axis = bounds.longest_axis();
        let mid = entries.len() / 2;
        entries.select_nth_unstable_by(mid, |a, b| {
            a.0.coord(axis).total_cmp(&b.0.coord(axis))
        });
        let value = entries[mid].0.coord(axis);
        let right_half = entries.split_off(mid);

        let (left, right) = if entries.len() + right_half.len() >= PARALLEL_BUILD_CUTOFF {
            rayon::join(
                || TreeNode::build(entries, leaf_size),
                || TreeNode::build(right_half, leaf_size),
            )
        } else {
            (
                TreeNode::build(entries, leaf_size),
                TreeNode::build(right_half, leaf_size),
            )
        };

        TreeNode {
            bounds,
            kind: NodeKind::Split {
                axis,
                value,
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    fn nearest(&self, q: PlanarPoint, best: &mut Option<(NodeId, f64)>) {
        if let Some((_, best_d2)) = *best {
            if self.bounds.min_dist_sq(q) > best_d2 {
                return;
            }
        }

        match &self.kind {
            NodeKind::Leaf(entries) => {
                for &(p, id) in entries {
                    let d2 = p.distance_sq(q);
                    // Strict `<` keeps the first-seen point on exact ties.
                    if best.is_none_or(|(_, bd2)| d2 < bd2) {
                        *best = Some((id, d2));
                    }
                }
            }
            NodeKind::Split { axis, value, left, right } => {
                // Descend the side containing the query first; the far side
                // prunes itself against the best found so far.
                let (near, far) = if q.coord(*axis) < *value {
                    (left, right)
                } else {
                    (right, left)
                };
                near.nearest(q, best);
                far.nearest(q, best);
            }
        }
    }
}

// ── KdTree ────────────────────────────────────────────────────────────────────

/// Static k-d tree mapping planar points to the `NodeId`s that sit there.
pub struct KdTree {
    root: Option<TreeNode>,
    leaf_size: usize,
    len: usize,
}

impl KdTree {
    /// Build a tree over the given entries.  `leaf_size` must be ≥ 1.
    pub fn build(entries: Vec<(PlanarPoint, NodeId)>, leaf_size: usize) -> KdTree {
        assert!(leaf_size >= 1, "leaf_size must be at least 1");
        let len = entries.len();
        let root = if entries.is_empty() {
            None
        } else {
            Some(TreeNode::build(entries, leaf_size))
        };
        KdTree { root, leaf_size, len }
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn leaf_size(&self) -> usize {
        self.leaf_size
    }

    /// The nearest indexed point to `q` and its distance in meters.
    ///
    /// Returns `None` only for an empty tree; bounding-box policy (rejecting
    /// queries outside the map) is the caller's concern.
    pub fn nearest(&self, q: PlanarPoint) -> Option<(NodeId, f64)> {
        let mut best = None;
        self.root.as_ref()?.nearest(q, &mut best);
        best.map(|(id, d2)| (id, d2.sqrt()))
    }
}
