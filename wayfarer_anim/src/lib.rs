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

//! animation of a marker along curved routes between waypoints.
//!
//! A [`Tour`] (waypoints and the routes chaining them) is turned into curved [`curve::SubPath`]s, which
//! an [`Animation`] steps through on timer callbacks, rendering guides, trails, a rotated marker and
//! waypoint highlights on an abstract [`DrawingSurface`]. Animations run either on tokio (see
//! [`spawn_animation`]) or are stepped manually with a [`ManualScheduler`].

#![allow(uncommon_codepoints)]

pub mod errors;
pub use errors::{AnimError, Result};

pub mod config;
pub use config::{AnimationConfig, Playback, PolylineStyle};

pub mod tour;
pub use tour::{Tour, Waypoint, WaypointCode, Route};

pub mod surface;
pub use surface::{DrawingSurface, RecordingSurface, Glyph, SurfaceError};

pub mod scheduler;
pub use scheduler::{Scheduler, ManualScheduler, TimerToken};

pub mod curve;
pub mod registry;
pub mod detector;
pub mod presenter;

pub mod driver;
pub use driver::{Animation, AnimationCursor, DriverState, TickReport};

pub mod runtime;
pub use runtime::{spawn_animation, AnimationHandle, TokioScheduler};

pub mod export;
