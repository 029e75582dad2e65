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

//! the abstract drawing surface an animation renders to, and an in-memory implementation of it.
//!
//! The animation core does not know about any concrete map or canvas library. All it needs is a
//! [`DrawingSurface`] that can show polylines, rotated point markers and text labels, and that hands
//! out opaque handles for them. [`RecordingSurface`] keeps everything in memory so that we can
//! inspect (and export) what would be visible at any point in time.

use std::collections::BTreeMap;
use serde::{Serialize,Deserialize};
use thiserror::Error;

use wayfarer_common::geo::GeoPoint;
use crate::config::PolylineStyle;

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub struct PolylineHandle(pub u64);

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub struct MarkerHandle(pub u64);

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,PartialOrd,Ord,Serialize,Deserialize)]
pub struct LabelHandle(pub u64);

#[derive(Debug,Clone,Copy,PartialEq,Eq,Serialize,Deserialize)]
pub enum Glyph {
    Aircraft,
    Waypoint,
    WaypointHighlighted,
}

#[derive(Error,Debug,Clone,PartialEq)]
pub enum SurfaceError {
    #[error("drawing surface detached")]
    Detached,

    #[error("unknown rendering handle {0}")]
    UnknownHandle(u64),

    #[error("drawing backend error {0}")]
    Backend(String),
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

pub trait DrawingSurface {
    fn render_polyline (&mut self, points: &[GeoPoint], style: &PolylineStyle) -> SurfaceResult<PolylineHandle>;
    fn update_polyline (&mut self, handle: PolylineHandle, points: &[GeoPoint]) -> SurfaceResult<()>;
    fn set_polyline_style (&mut self, handle: PolylineHandle, style: &PolylineStyle) -> SurfaceResult<()>;
    fn remove_polyline (&mut self, handle: PolylineHandle) -> SurfaceResult<()>;

    /// `rotation` is in degrees, clockwise
    fn render_marker (&mut self, point: &GeoPoint, rotation: f64, glyph: Glyph) -> SurfaceResult<MarkerHandle>;
    fn remove_marker (&mut self, handle: MarkerHandle) -> SurfaceResult<()>;

    fn render_label (&mut self, point: &GeoPoint, text: &str, visible: bool) -> SurfaceResult<LabelHandle>;
    fn set_label_visible (&mut self, handle: LabelHandle, visible: bool) -> SurfaceResult<()>;
    fn remove_label (&mut self, handle: LabelHandle) -> SurfaceResult<()>;
}

/* #region RecordingSurface **************************************************************************************/

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct RecordedPolyline {
    pub points: Vec<GeoPoint>,
    pub style: PolylineStyle,
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct RecordedMarker {
    pub point: GeoPoint,
    pub rotation: f64,
    pub glyph: Glyph,
}

#[derive(Debug,Clone,PartialEq,Serialize)]
pub struct RecordedLabel {
    pub point: GeoPoint,
    pub text: String,
    pub visible: bool,
}

/// a drawing surface that only remembers what is currently rendered
#[derive(Debug,Default)]
pub struct RecordingSurface {
    next_id: u64,
    polylines: BTreeMap<u64,RecordedPolyline>,
    markers: BTreeMap<u64,RecordedMarker>,
    labels: BTreeMap<u64,RecordedLabel>,

    calls: usize,
    failures: usize,
    fail_next: usize,
    detached: bool,
}

impl RecordingSurface {
    pub fn new () -> Self { RecordingSurface::default() }

    /// make the next `n` surface calls fail with a backend error
    pub fn fail_next (&mut self, n: usize) { self.fail_next = n }

    /// simulate a surface that went away (e.g. during view teardown). All calls fail until [`Self::attach`]
    pub fn detach (&mut self) { self.detached = true }
    pub fn attach (&mut self) { self.detached = false }
    pub fn is_detached (&self) -> bool { self.detached }

    /// number of calls made, including failed ones
    pub fn calls (&self) -> usize { self.calls }
    pub fn failures (&self) -> usize { self.failures }

    /// number of renderings currently shown
    pub fn live_count (&self) -> usize {
        self.polylines.len() + self.markers.len() + self.labels.len()
    }

    pub fn polylines (&self) -> impl Iterator<Item=(PolylineHandle,&RecordedPolyline)> {
        self.polylines.iter().map( |(k,v)| (PolylineHandle(*k), v))
    }
    pub fn markers (&self) -> impl Iterator<Item=(MarkerHandle,&RecordedMarker)> {
        self.markers.iter().map( |(k,v)| (MarkerHandle(*k), v))
    }
    pub fn labels (&self) -> impl Iterator<Item=(LabelHandle,&RecordedLabel)> {
        self.labels.iter().map( |(k,v)| (LabelHandle(*k), v))
    }

    pub fn polyline (&self, handle: PolylineHandle) -> Option<&RecordedPolyline> { self.polylines.get( &handle.0) }
    pub fn marker (&self, handle: MarkerHandle) -> Option<&RecordedMarker> { self.markers.get( &handle.0) }
    pub fn label (&self, handle: LabelHandle) -> Option<&RecordedLabel> { self.labels.get( &handle.0) }

    /// the markers that show an aircraft glyph (there should never be more than one per animation)
    pub fn aircraft_markers (&self) -> Vec<&RecordedMarker> {
        self.markers.values().filter( |m| m.glyph == Glyph::Aircraft).collect()
    }

    pub fn visible_labels (&self) -> Vec<&str> {
        self.labels.values().filter( |l| l.visible).map( |l| l.text.as_str()).collect()
    }

    fn check_call (&mut self) -> SurfaceResult<()> {
        self.calls += 1;
        if self.detached {
            self.failures += 1;
            Err( SurfaceError::Detached)
        } else if self.fail_next > 0 {
            self.fail_next -= 1;
            self.failures += 1;
            Err( SurfaceError::Backend("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn next_id (&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

impl DrawingSurface for RecordingSurface {
    fn render_polyline (&mut self, points: &[GeoPoint], style: &PolylineStyle) -> SurfaceResult<PolylineHandle> {
        self.check_call()?;
        let id = self.next_id();
        self.polylines.insert( id, RecordedPolyline { points: points.to_vec(), style: style.clone() });
        Ok( PolylineHandle(id) )
    }

    fn update_polyline (&mut self, handle: PolylineHandle, points: &[GeoPoint]) -> SurfaceResult<()> {
        self.check_call()?;
        let pl = self.polylines.get_mut( &handle.0).ok_or( SurfaceError::UnknownHandle(handle.0))?;
        pl.points = points.to_vec();
        Ok(())
    }

    fn set_polyline_style (&mut self, handle: PolylineHandle, style: &PolylineStyle) -> SurfaceResult<()> {
        self.check_call()?;
        let pl = self.polylines.get_mut( &handle.0).ok_or( SurfaceError::UnknownHandle(handle.0))?;
        pl.style = style.clone();
        Ok(())
    }

    fn remove_polyline (&mut self, handle: PolylineHandle) -> SurfaceResult<()> {
        self.check_call()?;
        self.polylines.remove( &handle.0).map( |_| ()).ok_or( SurfaceError::UnknownHandle(handle.0))
    }

    fn render_marker (&mut self, point: &GeoPoint, rotation: f64, glyph: Glyph) -> SurfaceResult<MarkerHandle> {
        self.check_call()?;
        let id = self.next_id();
        self.markers.insert( id, RecordedMarker { point: *point, rotation, glyph });
        Ok( MarkerHandle(id) )
    }

    fn remove_marker (&mut self, handle: MarkerHandle) -> SurfaceResult<()> {
        self.check_call()?;
        self.markers.remove( &handle.0).map( |_| ()).ok_or( SurfaceError::UnknownHandle(handle.0))
    }

    fn render_label (&mut self, point: &GeoPoint, text: &str, visible: bool) -> SurfaceResult<LabelHandle> {
        self.check_call()?;
        let id = self.next_id();
        self.labels.insert( id, RecordedLabel { point: *point, text: text.to_string(), visible });
        Ok( LabelHandle(id) )
    }

    fn set_label_visible (&mut self, handle: LabelHandle, visible: bool) -> SurfaceResult<()> {
        self.check_call()?;
        let label = self.labels.get_mut( &handle.0).ok_or( SurfaceError::UnknownHandle(handle.0))?;
        label.visible = visible;
        Ok(())
    }

    fn remove_label (&mut self, handle: LabelHandle) -> SurfaceResult<()> {
        self.check_call()?;
        self.labels.remove( &handle.0).map( |_| ()).ok_or( SurfaceError::UnknownHandle(handle.0))
    }
}

/* #endregion RecordingSurface */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_lifecycle () {
        let mut s = RecordingSurface::new();
        let p = GeoPoint::from_lat_lng_degrees( 1.0, 2.0);

        let pl = s.render_polyline( &[p], &PolylineStyle::guide()).unwrap();
        let m = s.render_marker( &p, 45.0, Glyph::Aircraft).unwrap();
        let l = s.render_label( &p, "X", false).unwrap();
        assert_eq!( s.live_count(), 3);

        s.set_label_visible( l, true).unwrap();
        assert_eq!( s.visible_labels(), vec!["X"]);

        s.remove_polyline( pl).unwrap();
        s.remove_marker( m).unwrap();
        s.remove_label( l).unwrap();
        assert_eq!( s.live_count(), 0);
        assert_eq!( s.remove_label( l), Err( SurfaceError::UnknownHandle(l.0)));
    }

    #[test]
    fn test_failure_injection () {
        let mut s = RecordingSurface::new();
        let p = GeoPoint::from_lat_lng_degrees( 1.0, 2.0);

        s.fail_next(1);
        assert!( s.render_marker( &p, 0.0, Glyph::Aircraft).is_err());
        assert!( s.render_marker( &p, 0.0, Glyph::Aircraft).is_ok());
        assert_eq!( s.failures(), 1);

        s.detach();
        assert_eq!( s.render_label( &p, "X", true), Err( SurfaceError::Detached));
        s.attach();
        assert!( s.render_label( &p, "X", true).is_ok());
        assert_eq!( s.calls(), 4);
    }
}
