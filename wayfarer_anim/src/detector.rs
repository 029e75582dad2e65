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

//! arrival and departure detection at waypoints.
//!
//! Entering uses a tight per-axis tolerance (effectively an exact match with a route endpoint),
//! leaving a much larger euclidean radius. The gap between both makes sure each visit produces
//! exactly one `entered` and, eventually, exactly one `left` event.

use wayfarer_common::geo::GeoPoint;
use wayfarer_common::debug;

use crate::config::AnimationConfig;
use crate::tour::{Waypoint, WaypointCode};

#[derive(Debug,Clone,Default,PartialEq)]
pub struct WaypointEvents {
    pub entered: Option<WaypointCode>,
    pub left: Vec<WaypointCode>,
}

impl WaypointEvents {
    pub fn is_empty (&self) -> bool { self.entered.is_none() && self.left.is_empty() }
}

#[derive(Debug,Clone)]
pub struct WaypointDetector {
    waypoints: Vec<Waypoint>,
    enter_tolerance: f64,
    leave_threshold: f64,
    visited: Vec<WaypointCode>, // in order of entry
}

impl WaypointDetector {
    pub fn new (waypoints: Vec<Waypoint>, enter_tolerance: f64, leave_threshold: f64) -> Self {
        WaypointDetector { waypoints, enter_tolerance, leave_threshold, visited: Vec::new() }
    }

    pub fn from_config (waypoints: Vec<Waypoint>, config: &AnimationConfig) -> Self {
        Self::new( waypoints, config.enter_tolerance, config.leave_threshold)
    }

    pub fn visited (&self) -> &[WaypointCode] { &self.visited }

    pub fn is_visited (&self, code: &WaypointCode) -> bool { self.visited.contains( code) }

    pub fn waypoints (&self) -> &[Waypoint] { &self.waypoints }

    /// leave events are computed before enter events so that a waypoint can be left and another one
    /// entered on the same position
    pub fn check (&mut self, position: &GeoPoint) -> WaypointEvents {
        let mut events = WaypointEvents::default();

        let waypoints = &self.waypoints;
        let leave_threshold = self.leave_threshold;
        self.visited.retain( |code| {
            let far = match waypoints.iter().find( |w| w.code == *code) {
                Some(w) => position.degree_distance_to( &w.position) > leave_threshold,
                None => true
            };
            if far { events.left.push( code.clone()) }
            !far
        });

        // several codes can share a position, take the first one we are not in yet
        let entered = self.waypoints.iter()
            .filter( |w| position.is_within( &w.position, self.enter_tolerance))
            .find( |w| !self.visited.contains( &w.code));
        if let Some(w) = entered {
            self.visited.push( w.code.clone());
            events.entered = Some( w.code.clone());
        }

        if !events.is_empty() {
            debug!("waypoint events at {}: entered {:?}, left {:?}", position, events.entered, events.left);
        }
        events
    }

    pub fn clear (&mut self) {
        self.visited.clear()
    }
}
