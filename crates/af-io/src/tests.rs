//! Unit tests for af-io.
//!
//! All CSV fixtures are inline strings read through `Cursor`, so no test
//! touches the filesystem.

#[cfg(test)]
mod fixtures {
    /// Four nodes around lower Manhattan, full 11-column schema.
    pub const NODES: &str = "\
node_id,is_complete,num_in_links,num_out_links,osm_traffic_controller,longitude,latitude,osm_changeset,birth_timestamp,death_timestamp,region_id
1,1,0,1,none,-74.00,40.70,0,0,0,0
2,1,1,1,none,-73.99,40.70,0,0,0,0
3,1,1,1,none,-73.90,40.80,0,0,0,0
4,1,1,0,none,-73.95,40.75,0,0,0,0
";

    /// Five links in the 16-column schema; the last references a node id
    /// that does not exist.
    pub const LINKS: &str = "\
link_id,begin_node_id,end_node_id,begin_angle,end_angle,street_length,osm_name,osm_class,osm_way_id,startX,startY,endX,endY,osm_changeset,birth_timestamp,death_timestamp
10,1,2,0,0,850.0,a st,residential,0,0,0,0,0,0,0,0
11,2,3,0,0,900.0,b st,residential,0,0,0,0,0,0,0,0
12,3,4,0,0,700.0,c st,residential,0,0,0,0,0,0,0,0
13,4,1,0,0,650.0,d st,residential,0,0,0,0,0,0,0,0
14,1,999,0,0,100.0,ghost st,residential,0,0,0,0,0,0,0,0
";
}

// ── Graph loading ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Cursor;

    use af_graph::DEFAULT_SPEED_MPS;

    use crate::loader::{apply_speeds, load_graph};
    use crate::LoadError;

    #[test]
    fn counts_and_dangling_links() {
        let (g, bbox) =
            load_graph(Cursor::new(super::fixtures::NODES), Cursor::new(super::fixtures::LINKS))
                .unwrap();
        assert_eq!(g.node_count(), 4);
        // The ghost-street link was dropped.
        assert_eq!(g.link_count(), 4);
        assert_eq!(bbox.lat_min, 40.70);
        assert_eq!(bbox.lat_max, 40.80);
        assert_eq!(bbox.lon_min, -74.00);
        assert_eq!(bbox.lon_max, -73.90);
    }

    #[test]
    fn default_speed_applied() {
        let (g, _) =
            load_graph(Cursor::new(super::fixtures::NODES), Cursor::new(super::fixtures::LINKS))
                .unwrap();
        assert_eq!(g.max_speed(), DEFAULT_SPEED_MPS);
        for l in 0..g.link_count() {
            assert_eq!(g.link_travel_time_s[l], g.link_length_m[l] / DEFAULT_SPEED_MPS);
        }
    }

    #[test]
    fn unparseable_numeric_fails_fast() {
        let nodes = super::fixtures::NODES.replace("-74.00", "not-a-number");
        let err = load_graph(Cursor::new(nodes), Cursor::new(super::fixtures::LINKS));
        assert!(matches!(err, Err(LoadError::Csv(_))));
    }

    #[test]
    fn missing_column_fails_fast() {
        let nodes = "node_id,longitude,latitude\n1,-74.0,40.7\n";
        let err = load_graph(Cursor::new(nodes), Cursor::new(super::fixtures::LINKS));
        assert!(matches!(err, Err(LoadError::Csv(_))));
    }

    #[test]
    fn speeds_table() {
        let (mut g, _) =
            load_graph(Cursor::new(super::fixtures::NODES), Cursor::new(super::fixtures::LINKS))
                .unwrap();

        // Row 2 has a non-positive travel time, row 3 an unknown pair; only
        // the first row applies.
        let speeds = "\
begin_node_id,end_node_id,speed,travel_time
1,2,8.5,100.0
2,3,9.0,0.0
7,8,9.0,50.0
";
        let applied = apply_speeds(&mut g, Cursor::new(speeds)).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(g.max_speed(), 8.5);
    }

    #[test]
    fn invalid_speed_row_is_fatal() {
        let (mut g, _) =
            load_graph(Cursor::new(super::fixtures::NODES), Cursor::new(super::fixtures::LINKS))
                .unwrap();
        let speeds = "begin_node_id,end_node_id,speed,travel_time\n1,2,-4.0,100.0\n";
        let err = apply_speeds(&mut g, Cursor::new(speeds));
        assert!(matches!(err, Err(LoadError::Graph(_))));
    }
}

// ── RoadMap queries ───────────────────────────────────────────────────────────

#[cfg(test)]
mod map {
    use std::io::Cursor;

    use af_core::{GeoPoint, NodeId};

    use crate::{MapConfig, RoadMap};

    fn small_map() -> RoadMap {
        let config = MapConfig {
            grid_dim: 2,
            lookup_leaf_size: 1,
            region_leaf_size: 4,
        };
        RoadMap::load(
            Cursor::new(super::fixtures::NODES),
            Cursor::new(super::fixtures::LINKS),
            &config,
        )
        .unwrap()
    }

    #[test]
    fn nearest_node_snaps() {
        let map = small_map();
        // Just off node 1 at (40.70, -74.00).
        assert_eq!(map.nearest_node(40.701, -73.999), Some(NodeId(0)));
        // Exactly node 3.
        let (id, dist) = map.nearest_node_with_distance(40.80, -73.90).unwrap();
        assert_eq!(id, NodeId(2));
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn bbox_edge_is_in_bounds() {
        let map = small_map();
        assert_eq!(map.nearest_node(40.70, -74.00), Some(NodeId(0)));
        assert_eq!(map.nearest_node(40.80, -73.90), Some(NodeId(2)));
    }

    #[test]
    fn out_of_bounds_returns_none() {
        let map = small_map();
        assert!(map.nearest_node(40.60, -74.00).is_none());
        assert!(map.nearest_node(40.75, -74.50).is_none());
        assert!(map.nearest_region(41.0, -73.95).is_none());
    }

    #[test]
    fn regions_follow_grid() {
        let map = small_map();
        assert_eq!(map.graph.region_count(), 4);
        // Node 1 sits at the bbox minimum corner → cell (0,0).
        assert_eq!(map.graph.region(NodeId(0)).index(), 0);
        // region_of agrees with the node's assigned region.
        for i in 0..map.graph.node_count() {
            let node = NodeId(i as u32);
            assert_eq!(map.region_of(map.graph.node_pos[i]), map.graph.region(node));
        }
        // nearest_region snaps to node 3's region.
        assert_eq!(
            map.nearest_region(40.79, -73.91),
            Some(map.graph.region(NodeId(2)))
        );
    }

    #[test]
    fn projection_consistency() {
        // A query between two nodes must pick the planar-nearest one, the
        // same metric the tree was built with.
        let map = small_map();
        let a = map.graph.node_pos[0];
        let b = map.graph.node_pos[1];
        let query = GeoPoint::new(a.lat, (a.lon + b.lon) / 2.0 + 0.0001);
        let got = map.nearest_node(query.lat, query.lon).unwrap();
        assert_eq!(got, NodeId(1));
    }
}

// ── Arc-flag persistence ──────────────────────────────────────────────────────

#[cfg(test)]
mod arcflags {
    use std::io::Cursor;

    use af_core::{GeoPoint, LinkId, RegionId};
    use af_engine::{precompute_arc_flags, PriorityMode};
    use af_graph::RoadGraphBuilder;

    use crate::{read_arc_flags, write_arc_flags, LoadError};

    fn triangle() -> af_graph::RoadGraph {
        let mut b = RoadGraphBuilder::new();
        let a = b.add_node(1, GeoPoint::new(0.0, 0.0), RegionId(0));
        let m = b.add_node(2, GeoPoint::new(0.0, 1.0), RegionId(1));
        let c = b.add_node(3, GeoPoint::new(1.0, 1.0), RegionId(2));
        b.add_link(a, m, 5.0);
        b.add_link(m, c, 5.0);
        b.add_link(a, c, 15.0);
        b.build()
    }

    #[test]
    fn write_read_roundtrip() {
        let g = triangle();
        let table = precompute_arc_flags(&g, PriorityMode::Domination).unwrap();

        let mut buf = Vec::new();
        write_arc_flags(&mut buf, &g, &table).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("begin_node_id,end_node_id,hex_flags\n"));
        assert_eq!(text.lines().count(), 1 + g.link_count());

        let back = read_arc_flags(Cursor::new(buf), &g).unwrap();
        assert_eq!(back.masks(), table.masks());
    }

    #[test]
    fn unknown_rows_are_skipped() {
        let g = triangle();
        let csv = "begin_node_id,end_node_id,hex_flags\n77,88,1\n1,2,2\n";
        let table = read_arc_flags(Cursor::new(csv), &g).unwrap();
        // Only the 1→2 row landed: hex 2 = region 1 of 3 set.
        assert!(table.is_reachable(LinkId(0), RegionId(1)));
        assert!(!table.is_reachable(LinkId(0), RegionId(0)));
    }

    #[test]
    fn malformed_hex_is_error() {
        let g = triangle();
        let csv = "begin_node_id,end_node_id,hex_flags\n1,2,zz\n";
        assert!(matches!(
            read_arc_flags(Cursor::new(csv), &g),
            Err(LoadError::Mask(_))
        ));
    }

    #[test]
    fn empty_hex_is_error() {
        let g = triangle();
        let csv = "begin_node_id,end_node_id,hex_flags\n1,2,\n";
        assert!(matches!(
            read_arc_flags(Cursor::new(csv), &g),
            Err(LoadError::Mask(af_core::CoreError::EmptyHex))
        ));
    }
}

// ── Trips ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trip {
    use std::io::Cursor;

    use crate::trip::{METERS_PER_MILE, MIN_WINDING_FACTOR};
    use crate::{load_trips, LoadError};

    const HEADER: &str = "medallion,hack_license,vendor_id,rate_code,store_and_fwd_flag,pickup_datetime,dropoff_datetime,passenger_count,trip_time_in_secs,trip_distance,pickup_longitude,pickup_latitude,dropoff_longitude,dropoff_latitude\n";

    #[test]
    fn parses_one_trip() {
        let row = "m1,h1,VTS,1,N,2013-01-07 12:00:00,2013-01-07 12:10:30,1,630,2.0,-73.98,40.75,-73.96,40.77\n";
        let trips = load_trips(Cursor::new(format!("{HEADER}{row}"))).unwrap();
        assert_eq!(trips.len(), 1);
        let t = &trips[0];
        assert_eq!(t.duration_s, 630);
        assert_eq!(t.metered_dist_m, 2.0 * METERS_PER_MILE);
        assert!(t.straight_line_m > 0.0);
        // Street distance exceeds the straight line.
        assert!(t.winding_factor > MIN_WINDING_FACTOR);
        assert!((t.pace_s_per_m - 630.0 / t.metered_dist_m).abs() < 1e-12);
    }

    #[test]
    fn zero_distance_trip() {
        let row = "m1,h1,VTS,1,N,2013-01-07 12:00:00,2013-01-07 12:01:00,1,60,0.0,-73.98,40.75,-73.98,40.75\n";
        let trips = load_trips(Cursor::new(format!("{HEADER}{row}"))).unwrap();
        let t = &trips[0];
        assert_eq!(t.pace_s_per_m, 0.0);
        assert_eq!(t.winding_factor, 1.0);
    }

    #[test]
    fn bad_timestamp_is_error() {
        let row = "m1,h1,VTS,1,N,yesterday,2013-01-07 12:10:30,1,630,2.0,-73.98,40.75,-73.96,40.77\n";
        let err = load_trips(Cursor::new(format!("{HEADER}{row}")));
        assert!(matches!(err, Err(LoadError::Parse(_))));
    }
}
