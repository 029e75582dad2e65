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

//! the static input of an animation: named waypoints and the routes that chain them

use std::{fmt, path::Path};
use serde::{Serialize,Deserialize};
use lazy_static::lazy_static;

use wayfarer_common::{geo::GeoPoint, config::load_config};
use wayfarer_common::warn;

use crate::errors::Result;

#[derive(Debug,Clone,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
#[serde(transparent)]
pub struct WaypointCode(String);

impl WaypointCode {
    pub fn new (code: impl ToString) -> Self { WaypointCode(code.to_string()) }
    pub fn as_str (&self) -> &str { self.0.as_str() }
}

impl fmt::Display for WaypointCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for WaypointCode {
    fn from (s: &str) -> Self { WaypointCode(s.to_string()) }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Waypoint {
    pub code: WaypointCode,
    pub name: String,
    pub position: GeoPoint,
}

impl Waypoint {
    pub fn new (code: &str, name: &str, lat: f64, lng: f64) -> Self {
        Waypoint { code: code.into(), name: name.to_string(), position: GeoPoint::from_lat_lng_degrees( lat, lng) }
    }
}

/// raw control points between two waypoints
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Route {
    pub from: WaypointCode,
    pub to: WaypointCode,
    pub coords: Vec<GeoPoint>,
}

impl Route {
    pub fn new (from: &str, to: &str, coords: Vec<GeoPoint>) -> Self {
        Route { from: from.into(), to: to.into(), coords }
    }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct Tour {
    pub waypoints: Vec<Waypoint>,
    pub routes: Vec<Route>,
}

lazy_static! {
    static ref BUILTIN_TOUR: Tour = {
        let waypoints = vec![
            Waypoint::new( "ADD", "Addis Ababa", 9.032, 38.7422),
            Waypoint::new( "ISB", "Islamabad", 33.6844, 73.0479),
            Waypoint::new( "LHR", "London", 51.5074, -0.1278),
            Waypoint::new( "JFK", "New York", 40.7128, -74.006),
            Waypoint::new( "KBP", "Kyiv", 50.4501, 30.5234),
            Waypoint::new( "CPH", "Copenhagen", 55.6761, 12.5683),
            Waypoint::new( "HKG", "Hong Kong", 22.3193, 114.1694),
            Waypoint::new( "SYD", "Sydney", -33.8688, 151.2093),
            Waypoint::new( "DXB", "Dubai", 25.2048, 55.2708),
        ];
        let routes = waypoints.windows(2).map( |w| {
            Route { from: w[0].code.clone(), to: w[1].code.clone(), coords: vec![ w[0].position, w[1].position ] }
        }).collect();

        Tour { waypoints, routes }
    };
}

impl Tour {
    pub fn new (waypoints: Vec<Waypoint>, routes: Vec<Route>) -> Self {
        Tour { waypoints, routes }
    }

    /// the nine city tour we show by default
    pub fn builtin () -> Tour {
        BUILTIN_TOUR.clone()
    }

    pub fn load (path: impl AsRef<Path>) -> Result<Tour> {
        Ok( load_config( path)? )
    }

    pub fn find (&self, code: &WaypointCode) -> Option<&Waypoint> {
        self.waypoints.iter().find( |w| w.code == *code)
    }

    fn is_valid_route (&self, route: &Route) -> bool {
        if route.coords.len() < 2 {
            warn!("skipping route {}->{} with {} coordinates", route.from, route.to, route.coords.len());
            false
        } else if self.find( &route.from).is_none() || self.find( &route.to).is_none() {
            warn!("skipping route {}->{} with unknown waypoint", route.from, route.to);
            false
        } else {
            true
        }
    }

    /// the routes we can animate, in tour order. A route that doesn't start where its predecessor
    /// ended is kept but reported
    pub fn valid_routes (&self) -> Vec<&Route> {
        let routes: Vec<&Route> = self.routes.iter().filter( |r| self.is_valid_route(r)).collect();
        for w in routes.windows(2) {
            if w[0].to != w[1].from {
                warn!("route {}->{} not chained to {}->{}", w[0].from, w[0].to, w[1].from, w[1].to);
            }
        }
        routes
    }

    /// all control coordinates of valid routes, with shared junction points listed once
    pub fn flattened_coords (&self) -> Vec<GeoPoint> {
        let mut coords: Vec<GeoPoint> = Vec::new();
        for route in self.valid_routes() {
            for p in &route.coords {
                if coords.last() != Some(p) {
                    coords.push( *p);
                }
            }
        }
        coords
    }
}
