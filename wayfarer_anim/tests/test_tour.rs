/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

use std::path::PathBuf;
use wayfarer_common::{datetime::secs, geo::GeoPoint};
use wayfarer_anim::*;

// run with "cargo test --test test_tour -- --nocapture"

fn pt (lat: f64, lng: f64) -> GeoPoint { GeoPoint::from_lat_lng_degrees( lat, lng) }

fn config_path (filename: &str) -> PathBuf {
    PathBuf::from( env!("CARGO_MANIFEST_DIR")).join("configs").join( filename)
}

#[test]
fn test_builtin () {
    let tour = Tour::builtin();
    assert_eq!( tour.waypoints.len(), 9);
    assert_eq!( tour.routes.len(), 8);

    for w in tour.routes.windows(2) {
        assert_eq!( w[0].to, w[1].from);
    }

    let coords = tour.flattened_coords();
    assert_eq!( coords.len(), 9);
    assert_eq!( coords[0], tour.waypoints[0].position);
    assert_eq!( coords[8], tour.waypoints[8].position);

    let lhr = tour.find( &WaypointCode::from("LHR")).unwrap();
    assert_eq!( lhr.name, "London");
    assert!( tour.find( &WaypointCode::from("XXX")).is_none());
}

#[test]
fn test_malformed_routes_are_skipped () {
    let tour = Tour::new(
        vec![
            Waypoint::new( "A", "Alpha", 0.0, 0.0),
            Waypoint::new( "B", "Bravo", 0.0, 10.0),
            Waypoint::new( "C", "Charlie", 10.0, 10.0),
        ],
        vec![
            Route::new( "A", "B", vec![ pt(0.0,0.0), pt(1.0,5.0), pt(0.0,10.0) ]),
            Route::new( "B", "X", vec![ pt(0.0,10.0), pt(5.0,5.0) ]),   // unknown waypoint
            Route::new( "B", "C", vec![ pt(0.0,10.0) ]),                // too few coords
            Route::new( "B", "C", vec![ pt(0.0,10.0), pt(10.0,10.0) ]),
        ]
    );

    assert_eq!( tour.valid_routes().len(), 2);
    assert_eq!( tour.flattened_coords(), vec![ pt(0.0,0.0), pt(1.0,5.0), pt(0.0,10.0), pt(10.0,10.0) ]);
}

#[test]
fn test_broken_chaining_is_kept () {
    let tour = Tour::new(
        vec![
            Waypoint::new( "A", "Alpha", 0.0, 0.0),
            Waypoint::new( "B", "Bravo", 0.0, 10.0),
            Waypoint::new( "C", "Charlie", 10.0, 10.0),
        ],
        vec![
            Route::new( "A", "B", vec![ pt(0.0,0.0), pt(0.0,10.0) ]),
            Route::new( "C", "A", vec![ pt(10.0,10.0), pt(0.0,0.0) ]),
        ]
    );
    assert_eq!( tour.flattened_coords().len(), 4);
}

#[test]
fn test_no_routes () {
    let tour = Tour::new( vec![ Waypoint::new( "A", "Alpha", 0.0, 0.0) ], vec![]);
    assert!( tour.flattened_coords().is_empty());
}

#[test]
fn test_load_tour_config () {
    let tour = Tour::load( config_path("tour.ron")).unwrap();
    assert_eq!( tour.waypoints.len(), 3);
    assert_eq!( tour.routes.len(), 2);
    assert_eq!( tour.flattened_coords().len(), 4);
    assert_eq!( tour.find( &WaypointCode::from("JFK")).unwrap().position, pt(40.7128,-74.006));
}

#[test]
fn test_load_animation_config () {
    let config = AnimationConfig::load( config_path("animation.ron")).unwrap();
    assert_eq!( config.resolution, 10);
    assert_eq!( config.loop_delay, secs(1));
    assert_eq!( config.playback, Playback::Loop);
    assert_eq!( config.completed_style, PolylineStyle::completed()); // not in file
}

#[test]
fn test_missing_config () {
    let res = AnimationConfig::load( config_path("no-such-file.ron"));
    assert!( matches!( res, Err(AnimError::ConfigError(_))));
}

#[test]
fn test_tour_serde_roundtrip () {
    let tour = Tour::builtin();
    let s = ron::to_string( &tour).unwrap();
    let tour2: Tour = ron::from_str( &s).unwrap();
    assert_eq!( tour, tour2);
}
