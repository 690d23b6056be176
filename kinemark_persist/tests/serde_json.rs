// Copyright 2025 the Kinemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON encoding of flat maps, available with the `serde` feature.
//!
//! The crate's own dev-dependency turns `serde` on for every test build.

use kinemark_persist::{FlatMap, FlatValue};

#[test]
fn flat_map_serializes_as_an_object_keyed_by_field() {
    let mut map = FlatMap::new();
    map.insert("swap_axes", true);
    map.insert("ids", vec![3_i64, 7]);

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"ids":{"IntArray":[3,7]},"swap_axes":{"Bool":true}}"#);
}

#[test]
fn flat_map_survives_a_json_trip() {
    let mut map = FlatMap::new();
    map.insert("x", vec![0.25_f64, -1.5]);
    map.insert("selected", -1_i64);
    map.insert("x_scale", 2.0);

    let json = serde_json::to_string(&map).unwrap();
    let back: FlatMap = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
    assert_eq!(back.get("selected"), Some(&FlatValue::Int(-1)));
}
