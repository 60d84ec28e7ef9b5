//! Uniform rectangular partition of the map's bounding box.
//!
//! The grid divides the (epsilon-expanded) bounding box into `dim × dim`
//! cells.  A node's region is `col * dim + row` where `col` indexes latitude
//! and `row` longitude.  Cells with no nodes are valid and simply stay empty.

use af_core::{BoundingBox, GeoPoint, RegionId};

/// Default number of divisions per axis (20 × 20 = 400 regions).
pub const DEFAULT_GRID_DIM: usize = 20;

/// A uniform `dim × dim` partition of a lat/lon bounding box.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    dim: usize,
    lat_min: f64,
    lon_min: f64,
    /// Cell extent in degrees latitude.
    cell_lat: f64,
    /// Cell extent in degrees longitude.
    cell_lon: f64,
}

impl Grid {
    /// Partition `bbox` into `dim × dim` cells.
    ///
    /// The caller is expected to have expanded the box's max sides (see
    /// [`BoundingBox::expand_max`]) so that nodes exactly on the max edge
    /// fall into the last cell rather than outside the grid.
    pub fn new(bbox: BoundingBox, dim: usize) -> Self {
        assert!(dim > 0, "grid must have at least one cell");
        Self {
            dim,
            lat_min: bbox.lat_min,
            lon_min: bbox.lon_min,
            cell_lat: bbox.lat_span() / dim as f64,
            cell_lon: bbox.lon_span() / dim as f64,
        }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Total number of regions (`dim²`).
    pub fn region_count(&self) -> usize {
        self.dim * self.dim
    }

    /// The `(col, row)` cell containing `p`, clamped to the grid.
    pub fn cell_of(&self, p: GeoPoint) -> (usize, usize) {
        (
            axis_cell(p.lat - self.lat_min, self.cell_lat, self.dim),
            axis_cell(p.lon - self.lon_min, self.cell_lon, self.dim),
        )
    }

    /// The region containing `p`: `col * dim + row`.
    pub fn region_of(&self, p: GeoPoint) -> RegionId {
        let (col, row) = self.cell_of(p);
        RegionId((col * self.dim + row) as u16)
    }
}

/// Cell index along one axis, clamped to `[0, dim)`.
///
/// Degenerate grids (all nodes on one line → zero cell extent) collapse to
/// cell 0; negative offsets saturate to 0 through the float→int cast.
#[inline]
fn axis_cell(offset: f64, cell_extent: f64, dim: usize) -> usize {
    if cell_extent <= 0.0 {
        return 0;
    }
    ((offset / cell_extent) as usize).min(dim - 1)
}
