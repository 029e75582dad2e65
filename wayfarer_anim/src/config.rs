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

//! animation tunables. Every constant of the animation lives in [`AnimationConfig`] so that it can be
//! overridden from a RON file (see `configs/animation.ron`), e.g.
//! ```ron
//! AnimationConfig(
//!     resolution: 10,
//!     tick_interval: "80ms",
//!     playback: Loop,
//! )
//! ```
//! Omitted fields keep their defaults.

use std::{path::Path, time::Duration};
use serde::{Serialize,Deserialize};

use wayfarer_common::{config::load_config, datetime::{deserialize_duration, serialize_duration, millis}};
use wayfarer_common::warn;

use crate::curve::CurveParams;
use crate::errors::Result;

/// what to do after the last sub-path has been traversed
#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum Playback {
    /// reset the renderings and start over from the first sub-path
    Loop,
    /// stay at the end
    Once,
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub struct PolylineStyle {
    pub color: String,
    pub weight: f64,
    pub opacity: f64,
    pub dashed: bool,
}

impl PolylineStyle {
    pub fn new (color: impl ToString, weight: f64, opacity: f64, dashed: bool) -> Self {
        PolylineStyle { color: color.to_string(), weight, opacity, dashed }
    }

    /// static full route, low opacity
    pub fn guide () -> Self { PolylineStyle::new( "#FF0000", 2.0, 0.25, true) }

    /// short, opaque trail right behind the marker
    pub fn trail () -> Self { PolylineStyle::new( "#CD9B1C", 3.0, 0.9, false) }

    /// the part of the route that was already flown
    pub fn completed () -> Self { PolylineStyle::new( "#CD9B1C", 2.0, 0.5, false) }

    /// guide of a finished sub-path - the completed overlay represents it from now on
    pub fn finalized_guide () -> Self { PolylineStyle::new( "#FF0000", 2.0, 0.0, true) }
}

#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// number of curve intervals per sub-path (samples = resolution + 1)
    pub resolution: usize,

    /// curve intensity per radian of angular hop distance
    pub curve_factor: f64,
    /// lower and upper bound for the curve intensity (radians)
    pub min_curve: f64,
    pub max_curve: f64,

    /// max number of points in the active trail of a sub-path
    pub trail_length: usize,

    /// how many samples ahead we look to compute the target bearing
    pub look_ahead: usize,

    /// fraction of the remaining turn the heading follows per tick
    pub heading_smoothing: f64,

    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub tick_interval: Duration,

    /// pause before a new loop starts
    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub loop_delay: Duration,

    /// delay between leaving a waypoint and un-highlighting it
    #[serde(deserialize_with="deserialize_duration", serialize_with="serialize_duration")]
    pub fade_delay: Duration,

    /// max lat and lng difference (degrees) for the marker to be at a waypoint
    pub enter_tolerance: f64,

    /// degree space distance beyond which an entered waypoint counts as left
    pub leave_threshold: f64,

    /// heading (degrees) the unrotated marker glyph points to
    pub glyph_offset: f64,

    pub playback: Playback,

    pub guide_style: PolylineStyle,
    pub trail_style: PolylineStyle,
    pub completed_style: PolylineStyle,
    pub finalized_guide_style: PolylineStyle,
}

impl Default for AnimationConfig {
    fn default () -> Self {
        AnimationConfig {
            resolution: 10,
            curve_factor: 0.2,
            min_curve: 0.03,
            max_curve: 0.5,
            trail_length: 6,
            look_ahead: 2,
            heading_smoothing: 0.1,
            tick_interval: millis(80),
            loop_delay: millis(0),
            fade_delay: millis(600),
            enter_tolerance: 1e-4,
            leave_threshold: 1.0,
            glyph_offset: 45.0,
            playback: Playback::Loop,
            guide_style: PolylineStyle::guide(),
            trail_style: PolylineStyle::trail(),
            completed_style: PolylineStyle::completed(),
            finalized_guide_style: PolylineStyle::finalized_guide(),
        }
    }
}

impl AnimationConfig {
    pub fn load (path: impl AsRef<Path>) -> Result<Self> {
        let config: AnimationConfig = load_config( path)?;
        Ok( config.validated() )
    }

    pub fn curve_params (&self) -> CurveParams {
        CurveParams {
            resolution: self.resolution,
            factor: self.curve_factor,
            min: self.min_curve,
            max: self.max_curve,
        }
    }

    /// clamp values the animation can't work with
    pub fn validated (mut self) -> Self {
        if self.resolution < 1 {
            warn!("resolution {} too small, using 1", self.resolution);
            self.resolution = 1;
        }
        if self.trail_length < 1 {
            warn!("trail_length {} too small, using 1", self.trail_length);
            self.trail_length = 1;
        }
        if self.look_ahead < 1 {
            warn!("look_ahead {} too small, using 1", self.look_ahead);
            self.look_ahead = 1;
        }
        if !(self.heading_smoothing > 0.0 && self.heading_smoothing <= 1.0) {
            warn!("heading_smoothing {} outside (0,1], using 1.0", self.heading_smoothing);
            self.heading_smoothing = 1.0;
        }
        if self.min_curve > self.max_curve {
            warn!("min_curve {} exceeds max_curve {}, swapping", self.min_curve, self.max_curve);
            std::mem::swap( &mut self.min_curve, &mut self.max_curve);
        }
        if self.enter_tolerance <= 0.0 {
            warn!("enter_tolerance {} not positive, using 1e-4", self.enter_tolerance);
            self.enter_tolerance = 1e-4;
        }
        if self.leave_threshold <= self.enter_tolerance {
            let t = self.enter_tolerance * 10.0;
            warn!("leave_threshold {} not above enter_tolerance, using {}", self.leave_threshold, t);
            self.leave_threshold = t;
        }
        self
    }
}
