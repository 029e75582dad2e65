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

//! the per sub-path renderings of an animation.
//!
//! Each sub-path owns three polylines on the drawing surface:
//!  - the *guide* showing the whole sub-path (dimmed once the sub-path is finalized)
//!  - the *trail*, a bounded FIFO of the points the marker passed most recently
//!  - the *completed* overlay, which only grows until the registry is reset
//!
//! Point state is kept here, independent of the surface. A failed surface call only means the
//! rendering lags behind until the next successful update (which always sends the full point list).

use wayfarer_common::{collections::RingBuffer, geo::GeoPoint};
use wayfarer_common::{debug, trace, warn};

use crate::config::{AnimationConfig, PolylineStyle};
use crate::curve::SubPath;
use crate::surface::{DrawingSurface, PolylineHandle, SurfaceError};

#[derive(Debug)]
struct PathRenderings {
    guide: Option<PolylineHandle>,
    trail: Option<PolylineHandle>,
    completed: Option<PolylineHandle>,

    guide_points: Vec<GeoPoint>,
    trail_points: RingBuffer<GeoPoint>,
    completed_points: Vec<GeoPoint>,
    finalized: bool,
}

#[derive(Debug)]
pub struct PathRegistry {
    paths: Vec<PathRenderings>,

    guide_style: PolylineStyle,
    trail_style: PolylineStyle,
    completed_style: PolylineStyle,
    finalized_guide_style: PolylineStyle,

    disposed: bool,
}

fn log_failure (op: &str, idx: usize, e: SurfaceError) {
    warn!("{} of sub-path {} failed: {}", op, idx, e);
}

/// render a polyline if we don't have one yet, otherwise update it
fn upsert_polyline<S> (surface: &mut S, handle: &mut Option<PolylineHandle>, points: &[GeoPoint], style: &PolylineStyle)
    -> Result<(),SurfaceError> where S: DrawingSurface + ?Sized
{
    match handle {
        Some(h) => surface.update_polyline( *h, points),
        None => {
            let h = surface.render_polyline( points, style)?;
            trace!("rendered polyline {:?} with {} points", h, points.len());
            *handle = Some(h);
            Ok(())
        }
    }
}

fn render_missing_guide<S> (surface: &mut S, pr: &mut PathRenderings, style: &PolylineStyle, idx: usize) where S: DrawingSurface + ?Sized {
    match surface.render_polyline( &pr.guide_points, style) {
        Ok(h) => pr.guide = Some(h),
        Err(e) => log_failure( "guide rendering", idx, e)
    }
}

impl PathRegistry {
    /// create the registry and its initial renderings: full guides, empty trails and completed overlays
    pub fn create<S> (sub_paths: &[SubPath], config: &AnimationConfig, mut surface: Option<&mut S>) -> Self
        where S: DrawingSurface + ?Sized
    {
        let mut paths = Vec::with_capacity( sub_paths.len());

        for (idx,sp) in sub_paths.iter().enumerate() {
            let mut pr = PathRenderings {
                guide: None,
                trail: None,
                completed: None,
                guide_points: sp.samples().to_vec(),
                trail_points: RingBuffer::new( config.trail_length),
                completed_points: Vec::with_capacity( sp.len()),
                finalized: false,
            };

            if let Some(s) = surface.as_deref_mut() {
                match s.render_polyline( &pr.guide_points, &config.guide_style) {
                    Ok(h) => pr.guide = Some(h),
                    Err(e) => log_failure( "guide rendering", idx, e)
                }
                match s.render_polyline( &[], &config.trail_style) {
                    Ok(h) => pr.trail = Some(h),
                    Err(e) => log_failure( "trail rendering", idx, e)
                }
                match s.render_polyline( &[], &config.completed_style) {
                    Ok(h) => pr.completed = Some(h),
                    Err(e) => log_failure( "completed rendering", idx, e)
                }
            }
            paths.push( pr);
        }

        PathRegistry {
            paths,
            guide_style: config.guide_style.clone(),
            trail_style: config.trail_style.clone(),
            completed_style: config.completed_style.clone(),
            finalized_guide_style: config.finalized_guide_style.clone(),
            disposed: false,
        }
    }

    pub fn len (&self) -> usize { self.paths.len() }
    pub fn is_empty (&self) -> bool { self.paths.is_empty() }
    pub fn is_disposed (&self) -> bool { self.disposed }

    pub fn trail (&self, idx: usize) -> Vec<GeoPoint> {
        self.paths.get(idx).map( |p| p.trail_points.to_vec()).unwrap_or_default()
    }

    pub fn trail_len (&self, idx: usize) -> usize {
        self.paths.get(idx).map( |p| p.trail_points.len()).unwrap_or(0)
    }

    pub fn completed (&self, idx: usize) -> &[GeoPoint] {
        self.paths.get(idx).map( |p| p.completed_points.as_slice()).unwrap_or(&[])
    }

    pub fn is_finalized (&self, idx: usize) -> bool {
        self.paths.get(idx).map( |p| p.finalized).unwrap_or(false)
    }

    /// all polyline handles we currently hold
    pub fn handles (&self) -> Vec<PolylineHandle> {
        self.paths.iter().flat_map( |p| [p.guide, p.trail, p.completed]).flatten().collect()
    }

    pub fn append_to_trail<S> (&mut self, idx: usize, point: GeoPoint, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        if self.disposed { return }
        let Some(pr) = self.paths.get_mut(idx) else { return };

        pr.trail_points.push( point);
        if let Some(s) = surface {
            if pr.guide.is_none() && !pr.finalized {
                // the guide failed to render at creation, try again
                render_missing_guide( s, pr, &self.guide_style, idx);
            }
            let points = pr.trail_points.to_vec();
            if let Err(e) = upsert_polyline( s, &mut pr.trail, &points, &self.trail_style) {
                log_failure( "trail update", idx, e)
            }
        }
    }

    pub fn append_to_completed<S> (&mut self, idx: usize, point: GeoPoint, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        if self.disposed { return }
        let Some(pr) = self.paths.get_mut(idx) else { return };

        pr.completed_points.push( point);
        if let Some(s) = surface {
            if let Err(e) = upsert_polyline( s, &mut pr.completed, &pr.completed_points, &self.completed_style) {
                log_failure( "completed update", idx, e)
            }
        }
    }

    /// the marker has left sub-path `idx`: clear its trail and dim its guide
    pub fn finalize_sub_path<S> (&mut self, idx: usize, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        if self.disposed { return }
        let Some(pr) = self.paths.get_mut(idx) else { return };

        pr.trail_points.clear();
        pr.finalized = true;

        if let Some(s) = surface {
            if let Some(h) = pr.trail {
                if let Err(e) = s.update_polyline( h, &[]) { log_failure( "trail clear", idx, e) }
            }
            match pr.guide {
                Some(h) => if let Err(e) = s.set_polyline_style( h, &self.finalized_guide_style) { log_failure( "guide dimming", idx, e) },
                None => render_missing_guide( s, pr, &self.finalized_guide_style, idx)
            }
        }
        debug!("sub-path {} finalized", idx);
    }

    /// back to the initial state: empty trails and completed overlays, full guides
    pub fn reset<S> (&mut self, mut surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        if self.disposed { return }

        for (idx,pr) in self.paths.iter_mut().enumerate() {
            pr.trail_points.clear();
            pr.completed_points.clear();
            pr.finalized = false;

            if let Some(s) = surface.as_deref_mut() {
                for h in [pr.trail, pr.completed].into_iter().flatten() {
                    if let Err(e) = s.update_polyline( h, &[]) { log_failure( "reset", idx, e) }
                }
                if let Err(e) = upsert_polyline( s, &mut pr.guide, &pr.guide_points, &self.guide_style) {
                    log_failure( "guide restore", idx, e)
                } else if let Some(h) = pr.guide {
                    if let Err(e) = s.set_polyline_style( h, &self.guide_style) { log_failure( "guide restore", idx, e) }
                }
            }
        }
    }

    /// remove every rendering we created. Calling this more than once is a no-op
    pub fn dispose<S> (&mut self, mut surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        if self.disposed { return }
        self.disposed = true;

        for (idx,pr) in self.paths.iter_mut().enumerate() {
            for handle in [pr.guide.take(), pr.trail.take(), pr.completed.take()].into_iter().flatten() {
                if let Some(s) = surface.as_deref_mut() {
                    if let Err(e) = s.remove_polyline( handle) { log_failure( "removal", idx, e) }
                }
            }
            pr.trail_points.clear();
        }
        debug!("path registry disposed");
    }
}
