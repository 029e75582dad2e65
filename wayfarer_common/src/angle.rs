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

//! compass headings and the angle arithmetic we need to rotate a marker smoothly.
//! All angles in here are degrees

use std::{fmt, ops};
use serde::{Serialize, Deserialize};

/// map into [-180,180]
#[inline]
pub fn normalize_180 (d: f64) -> f64 {
    let x = d % 360.0;

    if x < -180.0 { 360.0 + x }
    else if x > 180.0 { x - 360.0 }
    else { x }
}

/// map into [0,360)
#[inline]
pub fn normalize_360 (d: f64) -> f64 {
    let x = d % 360.0;
    let x = if x < 0.0 { 360.0 + x } else { x };
    if x >= 360.0 { 0.0 } else { x } // tiny negative remainders round up to 360.0
}

/// signed angle in [-180,180] we have to turn from `from` to reach `to` along the shorter direction
#[inline]
pub fn shortest_turn (from: f64, to: f64) -> f64 {
    normalize_180( to - from)
}

/// move `from` towards `to` by `factor` of the shortest turn between them. Result is in [0,360)
#[inline]
pub fn turn_towards (from: f64, to: f64, factor: f64) -> f64 {
    normalize_360( from + shortest_turn( from, to) * factor)
}

/// compass direction in [0,360), 0 being north and increasing clockwise.
/// Deserialized values are normalized, i.e. -90 becomes 270
#[derive(Clone,Copy,PartialEq,PartialOrd,Serialize,Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Heading(f64);

impl Heading {
    pub const NORTH: Heading = Heading(0.0);
    pub const EAST: Heading = Heading(90.0);
    pub const SOUTH: Heading = Heading(180.0);
    pub const WEST: Heading = Heading(270.0);

    #[inline]
    pub fn from_degrees (deg: f64) -> Self { Heading( normalize_360( deg)) }

    #[inline]
    pub fn from_radians (rad: f64) -> Self { Heading( normalize_360( rad.to_degrees())) }

    #[inline] pub fn degrees (&self) -> f64 { self.0 }
    #[inline] pub fn radians (&self) -> f64 { self.0.to_radians() }

    /// signed shortest turn (in degrees) from self to `other`
    pub fn turn_to (&self, other: Heading) -> f64 {
        shortest_turn( self.0, other.0)
    }

    /// rotate towards `target` by `factor` of the shortest turn
    pub fn smoothed_towards (&self, target: Heading, factor: f64) -> Heading {
        Heading( turn_towards( self.0, target.0, factor))
    }

    /// the opposite direction
    pub fn reverse (&self) -> Heading {
        Heading::from_degrees( self.0 + 180.0)
    }
}

impl From<f64> for Heading {
    fn from (deg: f64) -> Self { Heading::from_degrees( deg) }
}

impl From<Heading> for f64 {
    fn from (h: Heading) -> Self { h.0 }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:.1}°", self.0) }
}

impl fmt::Debug for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "Heading({})", self.0) }
}

// rotating by plain degrees (e.g. a glyph offset) keeps it a heading
impl ops::Add<f64> for Heading {
    type Output = Heading;
    fn add (self, rhs: f64) -> Heading { Heading::from_degrees( self.0 + rhs) }
}

impl ops::Sub<f64> for Heading {
    type Output = Heading;
    fn sub (self, rhs: f64) -> Heading { Heading::from_degrees( self.0 - rhs) }
}
