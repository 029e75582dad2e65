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

use wayfarer_common::geo::GeoPoint;
use wayfarer_anim::curve::{synthesize_subpaths, CurveParams, SubPath};
use wayfarer_anim::registry::PathRegistry;
use wayfarer_anim::{AnimationConfig, PolylineStyle, RecordingSurface};

// run with "cargo test --test test_registry -- --nocapture"

fn pt (lat: f64, lng: f64) -> GeoPoint { GeoPoint::from_lat_lng_degrees( lat, lng) }

fn sub_paths () -> Vec<SubPath> {
    synthesize_subpaths( &[pt(0.0,0.0), pt(0.0,10.0), pt(10.0,10.0)], &CurveParams::default())
}

fn config () -> AnimationConfig {
    AnimationConfig { trail_length: 3, ..AnimationConfig::default() }
}

#[test]
fn test_initial_renderings () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    let reg = PathRegistry::create( &sps, &config(), Some(&mut s));

    assert_eq!( reg.len(), 2);
    assert_eq!( s.live_count(), 6);

    let handles = reg.handles();
    let guide = s.polyline( handles[0]).unwrap();
    assert_eq!( guide.points, sps[0].samples());
    assert_eq!( guide.style, PolylineStyle::guide());
    assert!( s.polyline( handles[1]).unwrap().points.is_empty());
    assert!( s.polyline( handles[2]).unwrap().points.is_empty());
}

#[test]
fn test_trail_bound_and_completed_growth () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    let handles = reg.handles();

    let mut last_completed = 0;
    for p in sps[0].samples() {
        reg.append_to_trail( 0, *p, Some(&mut s));
        reg.append_to_completed( 0, *p, Some(&mut s));

        assert!( reg.trail_len(0) <= 3);
        assert!( s.polyline( handles[1]).unwrap().points.len() <= 3);
        assert_eq!( reg.trail(0).last(), Some(p));

        let n = reg.completed(0).len();
        assert!( n > last_completed);
        last_completed = n;
    }

    assert_eq!( reg.completed(0), sps[0].samples());
    assert_eq!( s.polyline( handles[2]).unwrap().points, sps[0].samples());
    assert_eq!( reg.trail(0), sps[0].samples()[8..].to_vec());
}

#[test]
fn test_finalize_and_reset () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    let handles = reg.handles();

    for p in sps[0].samples() {
        reg.append_to_trail( 0, *p, Some(&mut s));
        reg.append_to_completed( 0, *p, Some(&mut s));
    }
    reg.finalize_sub_path( 0, Some(&mut s));

    assert!( reg.is_finalized(0));
    assert!( !reg.is_finalized(1));
    assert_eq!( reg.trail_len(0), 0);
    assert!( s.polyline( handles[1]).unwrap().points.is_empty());
    assert_eq!( s.polyline( handles[0]).unwrap().style, PolylineStyle::finalized_guide());
    assert_eq!( reg.completed(0).len(), 11); // completed overlay stays

    reg.reset( Some(&mut s));
    assert!( !reg.is_finalized(0));
    assert!( reg.completed(0).is_empty());
    assert!( s.polyline( handles[2]).unwrap().points.is_empty());
    assert_eq!( s.polyline( handles[0]).unwrap().style, PolylineStyle::guide());
    assert_eq!( s.live_count(), 6);
}

#[test]
fn test_dispose_is_idempotent () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    reg.append_to_trail( 0, pt(0.0,0.0), Some(&mut s));

    reg.dispose( Some(&mut s));
    assert_eq!( s.live_count(), 0);
    assert!( reg.handles().is_empty());
    let failures = s.failures();

    reg.dispose( Some(&mut s));
    assert_eq!( s.live_count(), 0);
    assert_eq!( s.failures(), failures);
    assert!( reg.is_disposed());

    // no new renderings after dispose
    reg.append_to_completed( 0, pt(0.0,0.0), Some(&mut s));
    assert_eq!( s.live_count(), 0);
}

#[test]
fn test_failed_update_catches_up () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    let handles = reg.handles();

    reg.append_to_completed( 0, *sps[0].get(0).unwrap(), Some(&mut s));
    s.fail_next(1);
    reg.append_to_completed( 0, *sps[0].get(1).unwrap(), Some(&mut s));
    assert_eq!( s.polyline( handles[2]).unwrap().points.len(), 1);
    assert_eq!( reg.completed(0).len(), 2);

    reg.append_to_completed( 0, *sps[0].get(2).unwrap(), Some(&mut s));
    assert_eq!( s.polyline( handles[2]).unwrap().points, sps[0].samples()[..3].to_vec());
}

#[test]
fn test_lazy_rendering_after_failed_create () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    s.fail_next(3); // all renderings of the first sub-path
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    assert_eq!( s.live_count(), 3);
    assert_eq!( reg.handles().len(), 3);

    // guide and trail come back with the first point
    reg.append_to_trail( 0, pt(0.0,0.0), Some(&mut s));
    assert_eq!( s.live_count(), 5);
    assert_eq!( reg.handles().len(), 5);

    reg.append_to_completed( 0, pt(0.0,0.0), Some(&mut s));
    assert_eq!( reg.handles().len(), 6);
}

#[test]
fn test_guide_recovers_from_failed_create () {
    let sps = sub_paths();
    let mut s = RecordingSurface::new();
    s.fail_next(1); // the guide of the first sub-path
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    assert_eq!( reg.handles().len(), 5);

    reg.append_to_trail( 0, *sps[0].get(0).unwrap(), Some(&mut s));
    reg.append_to_completed( 0, *sps[0].get(0).unwrap(), Some(&mut s));

    let handles = reg.handles();
    assert_eq!( handles.len(), 6);
    let guide = s.polyline( handles[0]).unwrap();
    println!("recovered guide: {} points", guide.points.len());
    assert_eq!( guide.points, sps[0].samples());
    assert_eq!( guide.style, PolylineStyle::guide());
}

#[test]
fn test_finalize_renders_missing_guide_dimmed () {
    let sps = sub_paths();

    // nothing got through until the second sub-path was finalized
    let mut s = RecordingSurface::new();
    s.fail_next(6);
    let mut reg = PathRegistry::create( &sps, &config(), Some(&mut s));
    assert!( reg.handles().is_empty());

    reg.finalize_sub_path( 1, Some(&mut s));
    assert!( reg.is_finalized(1));
    let handles = reg.handles();
    assert_eq!( handles.len(), 1);
    assert_eq!( s.polyline( handles[0]).unwrap().style, PolylineStyle::finalized_guide());

    // a finalized sub-path does not get its full guide back from trail updates
    reg.append_to_trail( 1, *sps[1].get(0).unwrap(), Some(&mut s));
    assert_eq!( s.polyline( handles[0]).unwrap().style, PolylineStyle::finalized_guide());
}

#[test]
fn test_without_surface () {
    let sps = sub_paths();
    let mut reg = PathRegistry::create::<RecordingSurface>( &sps, &config(), None);
    reg.append_to_trail::<RecordingSurface>( 0, pt(0.0,0.0), None);
    reg.append_to_completed::<RecordingSurface>( 0, pt(0.0,0.0), None);
    assert!( reg.handles().is_empty());
    assert_eq!( reg.completed(0).len(), 1);
    reg.dispose::<RecordingSurface>( None);
}
