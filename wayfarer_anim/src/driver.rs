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

//! the animation state machine.
//!
//! An [`Animation`] owns everything a single playback needs (sub-paths, cursor, renderings, visited
//! waypoints and its surface) and is advanced by timer callbacks. Each tick schedules the next one,
//! hence there is never more than one pending tick per animation. Ticks go through
//! ```text
//!   Idle ──start──▶ Advancing ──(last sample)──▶ SubPathComplete ──(more sub-paths)──▶ Advancing
//!                                                      │
//!                                                      ├──(Loop)──▶ Advancing (sub-path 0)
//!                                                      └──(Once)──▶ Finished
//! ```
//! [`Animation::dispose`] can be called in any state and moves to `Disposed`.

use std::time::Duration;

use wayfarer_common::{angle::Heading, geo::{GeoPoint, bearing}};
use wayfarer_common::{debug, error, info, warn};

use crate::config::{AnimationConfig, Playback};
use crate::curve::{SubPath, synthesize_subpaths};
use crate::detector::{WaypointDetector, WaypointEvents};
use crate::errors::Result;
use crate::presenter::MarkerPresenter;
use crate::registry::PathRegistry;
use crate::scheduler::{Scheduler, TimerToken};
use crate::surface::DrawingSurface;
use crate::tour::{Tour, Waypoint, WaypointCode};

#[derive(Debug,Clone,Copy,PartialEq,Default)]
pub struct AnimationCursor {
    pub sub_path: usize,
    /// index of the next sample to show
    pub point: usize,
    pub previous_bearing: Option<Heading>,
}

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum DriverState {
    Idle,
    Advancing,
    SubPathComplete,
    Finished,
    Disposed,
}

/// what a single advancing tick did
#[derive(Debug,Clone,PartialEq)]
pub struct TickReport {
    pub sub_path: usize,
    pub point: usize,
    pub position: GeoPoint,
    pub heading: Heading,
    pub events: WaypointEvents,
}

pub struct Animation<S> where S: DrawingSurface {
    config: AnimationConfig,
    waypoints: Vec<Waypoint>,
    sub_paths: Vec<SubPath>,

    registry: Option<PathRegistry>,
    detector: WaypointDetector,
    presenter: MarkerPresenter,
    surface: Option<S>,

    cursor: AnimationCursor,
    state: DriverState,
    tick_timer: Option<TimerToken>,
    fade_timers: Vec<(TimerToken,WaypointCode)>,
    loops_completed: usize,
}

impl<S> Animation<S> where S: DrawingSurface {
    pub fn new (tour: &Tour, config: AnimationConfig, surface: S) -> Self {
        Self::from_points( &tour.flattened_coords(), tour.waypoints.clone(), config, surface)
    }

    /// animate along raw `points`, detecting arrivals at `waypoints`
    pub fn from_points (points: &[GeoPoint], waypoints: Vec<Waypoint>, config: AnimationConfig, surface: S) -> Self {
        let config = config.validated();
        let sub_paths = synthesize_subpaths( points, &config.curve_params());
        let detector = WaypointDetector::from_config( waypoints.clone(), &config);
        let presenter = MarkerPresenter::new( config.glyph_offset);

        Animation {
            config,
            waypoints,
            sub_paths,
            registry: None,
            detector,
            presenter,
            surface: Some(surface),
            cursor: AnimationCursor::default(),
            state: DriverState::Idle,
            tick_timer: None,
            fade_timers: Vec::new(),
            loops_completed: 0,
        }
    }

    //--- accessors

    pub fn config (&self) -> &AnimationConfig { &self.config }
    pub fn cursor (&self) -> &AnimationCursor { &self.cursor }
    pub fn state (&self) -> DriverState { self.state }
    pub fn sub_paths (&self) -> &[SubPath] { &self.sub_paths }
    pub fn waypoints (&self) -> &[Waypoint] { &self.waypoints }
    pub fn registry (&self) -> Option<&PathRegistry> { self.registry.as_ref() }
    pub fn presenter (&self) -> &MarkerPresenter { &self.presenter }
    pub fn visited (&self) -> &[WaypointCode] { self.detector.visited() }
    pub fn loops_completed (&self) -> usize { self.loops_completed }
    pub fn pending_fades (&self) -> usize { self.fade_timers.len() }

    pub fn is_active (&self) -> bool {
        matches!( self.state, DriverState::Advancing | DriverState::SubPathComplete)
    }

    pub fn surface (&self) -> Option<&S> { self.surface.as_ref() }
    pub fn surface_mut (&mut self) -> Option<&mut S> { self.surface.as_mut() }

    /// take the surface away. The animation keeps going without visual updates
    pub fn detach_surface (&mut self) -> Option<S> { self.surface.take() }

    /// (re)attach a surface. A running animation renders the waypoints it could not render without one
    pub fn attach_surface (&mut self, surface: S) {
        self.surface = Some(surface);
        if self.is_active() {
            self.presenter.show_waypoints( &self.waypoints, self.surface.as_mut());
        }
    }

    //--- lifecycle

    /// create the renderings and schedule the first tick. Fails if the scheduler can't start timers,
    /// in which case nothing gets rendered
    pub fn start<T> (&mut self, sched: &mut T) -> Result<()> where T: Scheduler + ?Sized {
        if self.state != DriverState::Idle {
            warn!("animation already started ({:?})", self.state);
            return Ok(())
        }
        if self.sub_paths.is_empty() {
            warn!("no sub-paths to animate");
            self.state = DriverState::Finished;
            return Ok(())
        }

        self.tick_timer = Some( sched.schedule_after( Duration::ZERO)?);

        self.registry = Some( PathRegistry::create( &self.sub_paths, &self.config, self.surface.as_mut()));
        self.presenter.show_waypoints( &self.waypoints, self.surface.as_mut());
        self.state = DriverState::Advancing;

        info!("animation started with {} sub-paths", self.sub_paths.len());
        Ok(())
    }

    /// a timer scheduled by this animation expired. Returns a report if this was an advancing tick.
    /// Tokens we don't know (e.g. of cancelled timers) are ignored
    pub fn on_timer<T> (&mut self, token: TimerToken, sched: &mut T) -> Option<TickReport> where T: Scheduler + ?Sized {
        if self.tick_timer == Some(token) {
            self.tick_timer = None;
            self.step( sched)

        } else if let Some(idx) = self.fade_timers.iter().position( |(t,_)| *t == token) {
            let (_,code) = self.fade_timers.remove( idx);
            self.presenter.fade_out( &code, self.surface.as_mut());
            None

        } else {
            debug!("ignoring stale {}", token);
            None
        }
    }

    fn step<T> (&mut self, sched: &mut T) -> Option<TickReport> where T: Scheduler + ?Sized {
        match self.state {
            DriverState::Advancing => self.advance( sched),
            DriverState::SubPathComplete => { self.complete_sub_path( sched); None }
            _ => None
        }
    }

    fn advance<T> (&mut self, sched: &mut T) -> Option<TickReport> where T: Scheduler + ?Sized {
        let idx = self.cursor.sub_path;
        let point = self.cursor.point;
        let sp = self.sub_paths.get( idx)?;
        let position = *sp.get( point)?;
        let sp_len = sp.len();
        let target = self.target_bearing( sp, point);

        let heading = match self.cursor.previous_bearing {
            Some(prev) => prev.smoothed_towards( target, self.config.heading_smoothing),
            None => target
        };
        self.cursor.previous_bearing = Some(heading);

        if let Some(registry) = self.registry.as_mut() {
            registry.append_to_trail( idx, position, self.surface.as_mut());
            registry.append_to_completed( idx, position, self.surface.as_mut());
        }

        let events = self.detector.check( &position);
        self.process_events( &events, sched);

        self.presenter.move_marker( &position, heading, self.surface.as_mut());

        self.cursor.point += 1;
        if self.cursor.point >= sp_len {
            self.state = DriverState::SubPathComplete;
        }
        debug!("tick {}/{} at {} heading {:.1}", idx, point, position, heading.degrees());
        self.schedule_tick( self.config.tick_interval, sched);

        Some( TickReport { sub_path: idx, point, position, heading, events } )
    }

    /// bearing towards the sample `look_ahead` positions ahead, clamped to the end of the sub-path.
    /// On the last sample we keep the direction we came from
    fn target_bearing (&self, sp: &SubPath, point: usize) -> Heading {
        let last = sp.len().saturating_sub(1);
        let ahead = (point + self.config.look_ahead).min( last);

        match (sp.get(point), sp.get(ahead)) {
            (Some(p), Some(q)) if ahead > point => bearing( p, q),
            (Some(p), _) if point > 0 => match sp.get( point-1) {
                Some(prev) => bearing( prev, p),
                None => self.cursor.previous_bearing.unwrap_or( Heading::NORTH)
            },
            _ => self.cursor.previous_bearing.unwrap_or( Heading::NORTH)
        }
    }

    fn process_events<T> (&mut self, events: &WaypointEvents, sched: &mut T) where T: Scheduler + ?Sized {
        for code in &events.left {
            match sched.schedule_after( self.config.fade_delay) {
                Ok(token) => self.fade_timers.push( (token, code.clone())),
                Err(e) => {
                    warn!("failed to schedule fade of {}: {}", code, e);
                    self.presenter.fade_out( code, self.surface.as_mut());
                }
            }
        }

        if let Some(code) = &events.entered {
            // a pending fade of a waypoint we re-entered would hide it while we are there
            self.fade_timers.retain( |(token,c)| {
                if c == code { sched.cancel( *token); false } else { true }
            });
            info!("entered waypoint {}", code);
            self.presenter.highlight( code, self.surface.as_mut());
        }
    }

    fn complete_sub_path<T> (&mut self, sched: &mut T) where T: Scheduler + ?Sized {
        let idx = self.cursor.sub_path;
        if let Some(registry) = self.registry.as_mut() {
            registry.finalize_sub_path( idx, self.surface.as_mut());
        }

        if idx + 1 < self.sub_paths.len() {
            self.cursor.sub_path += 1;
            self.cursor.point = 0;
            self.state = DriverState::Advancing;
            self.schedule_tick( Duration::ZERO, sched);

        } else {
            match self.config.playback {
                Playback::Once => {
                    self.state = DriverState::Finished;
                    info!("animation finished after {} sub-paths", self.sub_paths.len());
                }
                Playback::Loop => {
                    self.loops_completed += 1;
                    if let Some(registry) = self.registry.as_mut() {
                        registry.reset( self.surface.as_mut());
                    }
                    self.cursor.sub_path = 0;
                    self.cursor.point = 0;
                    self.state = DriverState::Advancing;
                    info!("animation wrapped (loop {})", self.loops_completed);
                    self.schedule_tick( self.config.loop_delay, sched);
                }
            }
        }
    }

    fn schedule_tick<T> (&mut self, delay: Duration, sched: &mut T) where T: Scheduler + ?Sized {
        match sched.schedule_after( delay) {
            Ok(token) => self.tick_timer = Some(token),
            Err(e) => {
                error!("failed to schedule next tick, stopping animation: {}", e);
                self.state = DriverState::Finished;
            }
        }
    }

    /// cancel all timers, remove all renderings and forget visited waypoints. Safe to call more than once
    pub fn dispose<T> (&mut self, sched: &mut T) where T: Scheduler + ?Sized {
        if self.state == DriverState::Disposed { return }

        if let Some(token) = self.tick_timer.take() {
            sched.cancel( token);
        }
        for (token,_) in self.fade_timers.drain(..) {
            sched.cancel( token);
        }

        if let Some(registry) = self.registry.as_mut() {
            registry.dispose( self.surface.as_mut());
        }
        self.presenter.clear( self.surface.as_mut());
        self.detector.clear();

        self.state = DriverState::Disposed;
        info!("animation disposed");
    }
}
