//! Geographic coordinate types and the planar projection.
//!
//! The whole engine works on a flat-earth approximation calibrated for New
//! York City: one degree of latitude or longitude is converted to meters with
//! a fixed scale factor, and all distances are Euclidean in that plane.  The
//! same projection is applied at k-d tree insertion and at query time, so the
//! nearest-neighbor metric is consistent everywhere.

/// Meters per degree of latitude.
pub const LAT_METERS: f64 = 111_194.86461;

/// Meters per degree of longitude at NYC's latitude.
pub const LON_METERS: f64 = 84_253.141_896_5;

/// Padding added to a bounding box's max sides before grid partitioning, so
/// nodes exactly on the max edge land in the last cell.
pub const BBOX_EPSILON_DEG: f64 = 0.01;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Project to planar meters using the fixed NYC scale factors.
    #[inline]
    pub fn to_planar(self) -> PlanarPoint {
        PlanarPoint {
            x: self.lat * LAT_METERS,
            y: self.lon * LON_METERS,
        }
    }

    /// Approximate distance in meters: Euclidean distance between the two
    /// planar projections.  Accurate to well under 1 % at city scale.
    #[inline]
    pub fn approx_distance_m(self, other: GeoPoint) -> f64 {
        self.to_planar().distance(other.to_planar())
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── PlanarPoint ───────────────────────────────────────────────────────────────

/// A point in the projected plane, in meters.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along `axis` (0 = x, 1 = y).  Used by the k-d tree.
    #[inline]
    pub fn coord(self, axis: usize) -> f64 {
        if axis == 0 { self.x } else { self.y }
    }

    #[inline]
    pub fn distance_sq(self, other: PlanarPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    #[inline]
    pub fn distance(self, other: PlanarPoint) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// An axis-aligned lat/lon rectangle, grown one point at a time during map
/// loading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// The empty box: grows to exactly the first point added.
    pub const EMPTY: BoundingBox = BoundingBox {
        lat_min: f64::INFINITY,
        lat_max: f64::NEG_INFINITY,
        lon_min: f64::INFINITY,
        lon_max: f64::NEG_INFINITY,
    };

    /// Extend the box to include `p`.
    pub fn grow(&mut self, p: GeoPoint) {
        self.lat_min = self.lat_min.min(p.lat);
        self.lat_max = self.lat_max.max(p.lat);
        self.lon_min = self.lon_min.min(p.lon);
        self.lon_max = self.lon_max.max(p.lon);
    }

    /// `true` if `p` lies inside the box, inclusive on all edges.
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat >= self.lat_min
            && p.lat <= self.lat_max
            && p.lon >= self.lon_min
            && p.lon <= self.lon_max
    }

    /// A copy with `eps` added to the max sides only.
    pub fn expand_max(&self, eps: f64) -> BoundingBox {
        BoundingBox {
            lat_max: self.lat_max + eps,
            lon_max: self.lon_max + eps,
            ..*self
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// `true` if no point has ever been added.
    pub fn is_empty(&self) -> bool {
        self.lat_min > self.lat_max
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}
