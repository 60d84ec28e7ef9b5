//! Unit tests for af-core primitives.

#[cfg(test)]
mod ids {
    use crate::{LinkId, NodeId, RegionId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(NodeId(0) < NodeId(1));
        assert!(LinkId(100) > LinkId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(LinkId::INVALID.0, u32::MAX);
        assert_eq!(RegionId::INVALID.0, u16::MAX);
    }

    #[test]
    fn validity() {
        assert!(NodeId(0).is_valid());
        assert!(!LinkId::INVALID.is_valid());
        assert!(!RegionId::default().is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(RegionId(7).to_string(), "RegionId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::geo::{BBOX_EPSILON_DEG, LAT_METERS, LON_METERS};
    use crate::{BoundingBox, GeoPoint};

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(40.75, -73.98);
        assert_eq!(p.approx_distance_m(p), 0.0);
    }

    #[test]
    fn one_degree_lat() {
        let a = GeoPoint::new(40.0, -74.0);
        let b = GeoPoint::new(41.0, -74.0);
        assert!((a.approx_distance_m(b) - LAT_METERS).abs() < 1e-6);
    }

    #[test]
    fn one_degree_lon() {
        let a = GeoPoint::new(40.0, -74.0);
        let b = GeoPoint::new(40.0, -73.0);
        assert!((a.approx_distance_m(b) - LON_METERS).abs() < 1e-6);
    }

    #[test]
    fn projection_is_scaled() {
        let p = GeoPoint::new(2.0, 3.0).to_planar();
        assert_eq!(p.x, 2.0 * LAT_METERS);
        assert_eq!(p.y, 3.0 * LON_METERS);
    }

    #[test]
    fn bbox_grow_and_contains() {
        let mut bbox = BoundingBox::EMPTY;
        assert!(bbox.is_empty());
        bbox.grow(GeoPoint::new(40.5, -74.1));
        bbox.grow(GeoPoint::new(40.9, -73.7));
        assert!(!bbox.is_empty());
        assert!(bbox.contains(GeoPoint::new(40.7, -73.9)));
        assert!(!bbox.contains(GeoPoint::new(41.0, -73.9)));
        // Inclusive on the edges.
        assert!(bbox.contains(GeoPoint::new(40.9, -74.1)));
    }

    #[test]
    fn expand_max_only_grows_max_sides() {
        let mut bbox = BoundingBox::EMPTY;
        bbox.grow(GeoPoint::new(40.0, -74.0));
        bbox.grow(GeoPoint::new(41.0, -73.0));
        let expanded = bbox.expand_max(BBOX_EPSILON_DEG);
        assert_eq!(expanded.lat_min, 40.0);
        assert_eq!(expanded.lon_min, -74.0);
        assert!((expanded.lat_max - 41.01).abs() < 1e-12);
        assert!((expanded.lon_max - -72.99).abs() < 1e-12);
    }
}

#[cfg(test)]
mod mask {
    use crate::{CoreError, RegionMask};

    #[test]
    fn set_get() {
        let mut m = RegionMask::new(400);
        assert!(!m.any());
        m.set(0);
        m.set(399);
        assert!(m.get(0));
        assert!(m.get(399));
        assert!(!m.get(200));
        assert_eq!(m.count_ones(), 2);
    }

    #[test]
    fn decode_0a_width_8() {
        let m = RegionMask::from_hex("0A", 8).unwrap();
        assert_eq!(m.bits(), vec![0, 0, 0, 0, 1, 0, 1, 0]);
        assert_eq!(m.to_hex(), "0a");
    }

    #[test]
    fn empty_input_is_error() {
        assert_eq!(RegionMask::from_hex("", 8), Err(CoreError::EmptyHex));
        assert_eq!(RegionMask::from_hex("   ", 8), Err(CoreError::EmptyHex));
    }

    #[test]
    fn invalid_digit_is_error() {
        assert!(matches!(
            RegionMask::from_hex("0g", 8),
            Err(CoreError::InvalidHexDigit { digit: 'g' })
        ));
    }

    #[test]
    fn overflow_is_error() {
        // 0x1FF needs 9 bits.
        assert!(matches!(
            RegionMask::from_hex("1ff", 8),
            Err(CoreError::MaskOverflow { width: 8 })
        ));
        // Leading zeros beyond the width are fine.
        assert!(RegionMask::from_hex("00ff", 8).is_ok());
    }

    #[test]
    fn short_strings_left_pad() {
        let m = RegionMask::from_hex("f", 12).unwrap();
        assert_eq!(m.bits(), vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1]);
        assert_eq!(m.to_hex(), "00f");
    }

    #[test]
    fn roundtrip_every_single_bit() {
        for width in [1, 4, 7, 64, 65, 400] {
            for r in 0..width {
                let mut m = RegionMask::new(width);
                m.set(r);
                let back = RegionMask::from_hex(&m.to_hex(), width).unwrap();
                assert_eq!(back, m, "width {width} bit {r}");
            }
        }
    }

    #[test]
    fn roundtrip_dense_pattern() {
        let mut m = RegionMask::new(400);
        for r in (0..400).step_by(3) {
            m.set(r);
        }
        let hex = m.to_hex();
        assert_eq!(hex.len(), 100);
        assert_eq!(RegionMask::from_hex(&hex, 400).unwrap(), m);
    }
}
