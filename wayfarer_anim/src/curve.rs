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
#![allow(non_snake_case)]

//! synthesis of curved sub-paths between consecutive route points.
//!
//! Each hop from `start` to `end` is sampled at `resolution + 1` points. The parameter is eased-out
//! (`t' = t(2-t)`) so that the marker decelerates into the next waypoint, and every sample is offset
//! perpendicular to the straight chord by `sin(π t') * c` where the curve intensity `c` grows with the
//! hop length. The result is a stylized arc, not a great circle.

use serde::{Serialize,Deserialize};

use wayfarer_common::geo::{GeoPoint, angular_distance, crosses_antimeridian};
use wayfarer_common::{clamp, deg, lerp, pow2, sin, sqrt, PI};

#[derive(Debug,Clone,Copy,PartialEq,Serialize,Deserialize)]
pub struct CurveParams {
    /// number of intervals per hop
    pub resolution: usize,
    /// intensity per radian of angular distance
    pub factor: f64,
    pub min: f64,
    pub max: f64,
}

impl Default for CurveParams {
    fn default () -> Self {
        CurveParams { resolution: 10, factor: 0.2, min: 0.03, max: 0.5 }
    }
}

/// the immutable sample sequence of one hop
#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct SubPath {
    samples: Vec<GeoPoint>,
}

impl SubPath {
    pub fn new (samples: Vec<GeoPoint>) -> Self { SubPath { samples } }

    #[inline] pub fn len (&self) -> usize { self.samples.len() }
    #[inline] pub fn is_empty (&self) -> bool { self.samples.is_empty() }

    pub fn get (&self, idx: usize) -> Option<&GeoPoint> { self.samples.get(idx) }
    pub fn first (&self) -> Option<&GeoPoint> { self.samples.first() }
    pub fn last (&self) -> Option<&GeoPoint> { self.samples.last() }

    pub fn samples (&self) -> &[GeoPoint] { &self.samples }
}

/// curve intensity (radians) for a hop of `distance` radians
pub fn curve_intensity (distance: f64, params: &CurveParams) -> f64 {
    clamp( distance * params.factor, params.min, params.max)
}

#[inline]
pub fn ease_out (t: f64) -> f64 {
    t * (2.0 - t)
}

/// sample one hop. The first and last sample are exactly `start` and `end`
pub fn synthesize_segment (start: &GeoPoint, end: &GeoPoint, params: &CurveParams) -> SubPath {
    let n = params.resolution.max(1);
    let c = curve_intensity( angular_distance( start, end), params);

    let Δlat = end.lat() - start.lat();
    let Δlng = end.lng() - start.lng();
    let chord = sqrt( pow2(Δlat) + pow2(Δlng));

    // unit normal of the chord, rotated clockwise so that eastbound hops bulge north
    let (nlat, nlng) = if chord > 0.0 {
        let sign = if crosses_antimeridian( start, end) { -1.0 } else { 1.0 };
        (sign * Δlng / chord, -sign * Δlat / chord)
    } else {
        (0.0, 0.0)
    };

    let mut samples = Vec::with_capacity( n + 1);
    samples.push( *start);
    for j in 1..n {
        let t = ease_out( j as f64 / n as f64);
        let offset = deg( sin( PI * t) * c);
        let lat = lerp( start.lat(), end.lat(), t) + nlat * offset;
        let lng = lerp( start.lng(), end.lng(), t) + nlng * offset;
        samples.push( GeoPoint::from_lat_lng_degrees( lat, lng));
    }
    samples.push( *end);

    SubPath { samples }
}

/// one sub-path per consecutive pair of `points`. Less than two points yield no sub-paths
pub fn synthesize_subpaths (points: &[GeoPoint], params: &CurveParams) -> Vec<SubPath> {
    points.windows(2).map( |w| synthesize_segment( &w[0], &w[1], params)).collect()
}
