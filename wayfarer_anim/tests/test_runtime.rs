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

use tokio::{sync::mpsc, time::sleep};
use wayfarer_common::{datetime::{millis, secs}, geo::GeoPoint};
use wayfarer_anim::*;

// run with "cargo test --test test_runtime -- --nocapture"

fn animation (playback: Playback) -> Animation<RecordingSurface> {
    let wps = vec![
        Waypoint::new( "A", "Alpha", 0.0, 0.0),
        Waypoint::new( "B", "Bravo", 0.0, 10.0),
        Waypoint::new( "C", "Charlie", 10.0, 10.0),
        Waypoint::new( "D", "Delta", 10.0, 0.0),
    ];
    let points: Vec<GeoPoint> = wps.iter().map( |w| w.position).collect();
    Animation::from_points( &points, wps, AnimationConfig { playback, ..AnimationConfig::default() }, RecordingSurface::new())
}

#[test]
fn test_no_runtime () {
    let res = spawn_animation( animation( Playback::Once));
    assert!( matches!( res, Err(AnimError::NoRuntime)));

    let (tx,_rx) = mpsc::channel::<TimerToken>(1);
    assert!( matches!( TokioScheduler::new( tx), Err(AnimError::NoRuntime)));
}

#[tokio::test(start_paused = true)]
async fn test_play_once () {
    let mut handle = spawn_animation( animation( Playback::Once)).unwrap();
    assert!( handle.is_running());

    sleep( secs(10)).await;

    let (state, completed, markers) = handle.query( |a| {
        let completed: Vec<usize> = (0..3).map( |i| a.registry().unwrap().completed(i).len()).collect();
        (a.state(), completed, a.surface().unwrap().aircraft_markers().len())
    }).await.unwrap();
    assert_eq!( state, DriverState::Finished);
    assert_eq!( completed, vec![11,11,11]);
    assert_eq!( markers, 1);

    let animation = handle.dispose().await.unwrap();
    assert_eq!( animation.state(), DriverState::Disposed);
    assert_eq!( animation.surface().unwrap().live_count(), 0);
    assert!( !handle.is_running());
}

#[tokio::test(start_paused = true)]
async fn test_dispose_while_running () {
    let mut handle = spawn_animation( animation( Playback::Loop)).unwrap();
    sleep( millis(500)).await;

    let point = handle.query( |a| a.cursor().point).await.unwrap();
    assert!( point > 0);

    let animation = handle.dispose().await.unwrap();
    assert_eq!( animation.surface().unwrap().live_count(), 0);
    assert!( animation.visited().is_empty());

    // second dispose is a no-op, queries fail
    assert!( handle.dispose().await.is_none());
    assert!( matches!( handle.query( |a| a.state()).await, Err(AnimError::TaskTerminated)));
}

#[tokio::test(start_paused = true)]
async fn test_loops_forever () {
    let mut handle = spawn_animation( animation( Playback::Loop)).unwrap();
    sleep( secs(10)).await; // one loop takes 33 ticks of 80ms

    let loops = handle.query( |a| a.loops_completed()).await.unwrap();
    assert!( loops >= 3, "only {loops} loops");
    assert!( handle.is_running());

    handle.dispose().await;
}

#[tokio::test(start_paused = true)]
async fn test_exec_detaches_surface () {
    let mut handle = spawn_animation( animation( Playback::Loop)).unwrap();
    sleep( millis(300)).await;

    let surface = handle.exec( |a| a.detach_surface()).await.unwrap().unwrap();
    let calls = surface.calls();
    sleep( secs(1)).await;

    // the animation keeps going without a surface
    let point = handle.query( |a| (a.cursor().sub_path, a.cursor().point)).await.unwrap();
    assert!( point > (0,4));
    assert_eq!( surface.calls(), calls);

    handle.exec( move |a| a.attach_surface( surface)).await.unwrap();
    let animation = handle.dispose().await.unwrap();
    assert_eq!( animation.surface().unwrap().live_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_independent_instances () {
    let mut h1 = spawn_animation( animation( Playback::Loop)).unwrap();
    sleep( millis(400)).await;
    let mut h2 = spawn_animation( animation( Playback::Loop)).unwrap();
    sleep( millis(10)).await;

    let p1 = h1.query( |a| a.cursor().point).await.unwrap();
    let p2 = h2.query( |a| a.cursor().point).await.unwrap();
    assert!( p1 > p2);

    let a1 = h1.dispose().await.unwrap();
    assert_eq!( a1.surface().unwrap().live_count(), 0);

    // disposing one animation leaves the other one alone
    let live = h2.query( |a| a.surface().unwrap().live_count()).await.unwrap();
    assert!( live > 0);
    h2.dispose().await;
}
