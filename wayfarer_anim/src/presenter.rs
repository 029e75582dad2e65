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

//! the moving aircraft marker and the waypoint markers/labels.
//!
//! All operations tolerate a missing surface (they only update state) and surface errors (they log
//! and skip the visual update). Neither should ever stop an animation. Waypoint renderings that
//! are missing or out of date get caught up with the next call that has a surface.

use std::collections::BTreeMap;

use wayfarer_common::{angle::Heading, geo::GeoPoint};
use wayfarer_common::warn;

use crate::surface::{DrawingSurface, Glyph, LabelHandle, MarkerHandle, SurfaceError};
use crate::tour::{Waypoint, WaypointCode};

/// a waypoint and what we have on the surface for it. Rendered glyph and label visibility are kept
/// with the handles so that we can catch up with `highlighted` after failed calls or while detached
#[derive(Debug)]
struct WaypointRendering {
    position: GeoPoint,
    name: String,
    marker: Option<(MarkerHandle,Glyph)>,
    label: Option<(LabelHandle,bool)>,
    highlighted: bool,
}

impl WaypointRendering {
    fn glyph (&self) -> Glyph {
        if self.highlighted { Glyph::WaypointHighlighted } else { Glyph::Waypoint }
    }

    fn render_marker<S> (&self, s: &mut S) -> Option<(MarkerHandle,Glyph)> where S: DrawingSurface + ?Sized {
        let glyph = self.glyph();
        s.render_marker( &self.position, 0.0, glyph)
            .map( |h| (h, glyph))
            .map_err( |e| log_failure( "waypoint marker rendering", e)).ok()
    }

    /// bring the surface in line with `highlighted`, rendering whatever is missing
    fn sync<S> (&mut self, s: &mut S) where S: DrawingSurface + ?Sized {
        match self.marker {
            Some((_,glyph)) if glyph == self.glyph() => {}
            Some((h,_)) => match s.remove_marker( h) {
                Ok(()) | Err(SurfaceError::UnknownHandle(_)) => self.marker = self.render_marker( s),
                Err(e) => log_failure( "waypoint marker removal", e) // keep it, next sync tries again
            }
            None => self.marker = self.render_marker( s)
        }

        let visible = self.highlighted;
        match self.label {
            Some((_,v)) if v == visible => {}
            Some((h,_)) => match s.set_label_visible( h, visible) {
                Ok(()) => self.label = Some((h,visible)),
                Err(SurfaceError::UnknownHandle(_)) => self.label = None,
                Err(e) => log_failure( "label visibility", e)
            }
            None => {
                self.label = s.render_label( &self.position, &self.name, visible)
                    .map( |h| (h, visible))
                    .map_err( |e| log_failure( "waypoint label", e)).ok();
            }
        }
    }
}

#[derive(Debug)]
pub struct MarkerPresenter {
    glyph_offset: f64,
    marker: Option<MarkerHandle>,
    waypoints: BTreeMap<WaypointCode,WaypointRendering>,
}

fn log_failure (op: &str, e: SurfaceError) {
    warn!("{} failed, skipping: {}", op, e);
}

impl MarkerPresenter {
    /// `glyph_offset` is the heading the unrotated aircraft glyph points to
    pub fn new (glyph_offset: f64) -> Self {
        MarkerPresenter { glyph_offset, marker: None, waypoints: BTreeMap::new() }
    }

    pub fn marker (&self) -> Option<MarkerHandle> { self.marker }

    pub fn is_highlighted (&self, code: &WaypointCode) -> bool {
        self.waypoints.get( code).map( |w| w.highlighted).unwrap_or(false)
    }

    /// glyph rotation for a given heading
    pub fn rotation (&self, heading: Heading) -> f64 {
        (heading - self.glyph_offset).degrees()
    }

    /// register the waypoints and render their markers and labels (hidden unless highlighted).
    /// Without a surface they are only registered, and get rendered by the next highlight change
    /// or the next call with a surface
    pub fn show_waypoints<S> (&mut self, waypoints: &[Waypoint], mut surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        for wp in waypoints {
            let wr = self.waypoints.entry( wp.code.clone()).or_insert_with( || WaypointRendering {
                position: wp.position,
                name: wp.name.clone(),
                marker: None,
                label: None,
                highlighted: false
            });
            if let Some(s) = surface.as_deref_mut() {
                wr.sync( s);
            }
        }
    }

    /// replace the aircraft marker with one at `point` rotated to `heading`
    pub fn move_marker<S> (&mut self, point: &GeoPoint, heading: Heading, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        let Some(s) = surface else { return };

        if let Some(h) = self.marker {
            match s.remove_marker( h) {
                Ok(()) | Err(SurfaceError::UnknownHandle(_)) => self.marker = None,
                Err(e) => return log_failure( "marker removal", e) // keep the old one until we can remove it
            }
        }

        match s.render_marker( point, self.rotation( heading), Glyph::Aircraft) {
            Ok(h) => self.marker = Some(h),
            Err(e) => log_failure( "marker rendering", e)
        }
    }

    pub fn highlight<S> (&mut self, code: &WaypointCode, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        self.set_highlight( code, true, surface)
    }

    pub fn fade_out<S> (&mut self, code: &WaypointCode, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        self.set_highlight( code, false, surface)
    }

    fn set_highlight<S> (&mut self, code: &WaypointCode, highlighted: bool, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        let Some(wr) = self.waypoints.get_mut( code) else { return };
        wr.highlighted = highlighted;

        if let Some(s) = surface {
            wr.sync( s);
        }
    }

    /// remove everything we rendered
    pub fn clear<S> (&mut self, surface: Option<&mut S>) where S: DrawingSurface + ?Sized {
        let marker = self.marker.take();
        let waypoints = std::mem::take( &mut self.waypoints);

        let Some(s) = surface else { return };

        if let Some(h) = marker {
            if let Err(e) = s.remove_marker( h) { log_failure( "marker removal", e) }
        }
        for wr in waypoints.into_values() {
            if let Some((h,_)) = wr.marker {
                if let Err(e) = s.remove_marker( h) { log_failure( "waypoint marker removal", e) }
            }
            if let Some((h,_)) = wr.label {
                if let Err(e) = s.remove_label( h) { log_failure( "label removal", e) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;

    #[test]
    fn test_single_marker () {
        let mut s = RecordingSurface::new();
        let mut p = MarkerPresenter::new( 45.0);

        for i in 0..5 {
            p.move_marker( &GeoPoint::from_lat_lng_degrees( i as f64, 0.0), Heading::from_degrees(90.0), Some(&mut s));
        }
        let markers = s.aircraft_markers();
        assert_eq!( markers.len(), 1);
        assert_eq!( markers[0].rotation, 45.0);
        assert_eq!( markers[0].point.lat(), 4.0);
    }

    #[test]
    fn test_highlight_and_fade () {
        let mut s = RecordingSurface::new();
        let mut p = MarkerPresenter::new( 45.0);
        let wps = vec![ Waypoint::new( "A", "Alpha", 0.0, 0.0) ];
        let a = WaypointCode::from("A");

        p.show_waypoints( &wps, Some(&mut s));
        assert!( s.visible_labels().is_empty());

        p.highlight( &a, Some(&mut s));
        assert!( p.is_highlighted( &a));
        assert_eq!( s.visible_labels(), vec!["Alpha"]);

        p.fade_out( &a, Some(&mut s));
        assert!( s.visible_labels().is_empty());

        p.clear( Some(&mut s));
        assert_eq!( s.live_count(), 0);
    }

    #[test]
    fn test_catch_up_after_missing_surface () {
        let mut s = RecordingSurface::new();
        let mut p = MarkerPresenter::new( 45.0);
        let wps = vec![ Waypoint::new( "A", "Alpha", 0.0, 0.0), Waypoint::new( "B", "Bravo", 0.0, 10.0) ];
        let a = WaypointCode::from("A");

        p.show_waypoints::<RecordingSurface>( &wps, None);
        p.highlight::<RecordingSurface>( &a, None);
        assert!( p.is_highlighted( &a));
        assert_eq!( s.live_count(), 0);

        p.show_waypoints( &wps, Some(&mut s));
        assert_eq!( s.live_count(), 4);
        assert_eq!( s.visible_labels(), vec!["Alpha"]);
        assert_eq!( s.markers().filter( |(_,m)| m.glyph == Glyph::WaypointHighlighted).count(), 1);
    }

    #[test]
    fn test_failed_label_is_rendered_on_highlight () {
        let mut s = RecordingSurface::new();
        let mut p = MarkerPresenter::new( 45.0);
        let wps = vec![ Waypoint::new( "A", "Alpha", 0.0, 0.0) ];

        s.fail_next(2); // marker and label
        p.show_waypoints( &wps, Some(&mut s));
        assert_eq!( s.live_count(), 0);

        p.highlight( &WaypointCode::from("A"), Some(&mut s));
        assert_eq!( s.live_count(), 2);
        assert_eq!( s.visible_labels(), vec!["Alpha"]);
    }

    #[test]
    fn test_no_surface () {
        let mut p = MarkerPresenter::new( 45.0);
        p.move_marker::<RecordingSurface>( &GeoPoint::from_lat_lng_degrees( 0.0, 0.0), Heading::NORTH, None);
        assert!( p.marker().is_none());
        p.clear::<RecordingSurface>( None);
    }
}
