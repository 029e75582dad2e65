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

//! GeoJSON snapshots of what a [`RecordingSurface`] currently shows

use std::{fs, path::Path};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use geo_types::{LineString, Point};

use crate::errors::Result;
use crate::surface::{Glyph, RecordingSurface};

fn feature (geometry: Geometry) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: None,
        properties: None,
        foreign_members: None,
    }
}

fn glyph_name (glyph: Glyph) -> &'static str {
    match glyph {
        Glyph::Aircraft => "aircraft",
        Glyph::Waypoint => "waypoint",
        Glyph::WaypointHighlighted => "waypoint-highlighted",
    }
}

/// one feature per live polyline, marker and label. Empty polylines are skipped since they are not
/// valid GeoJSON line strings
pub fn snapshot_geojson (surface: &RecordingSurface) -> FeatureCollection {
    let mut features = Vec::new();

    for (handle,pl) in surface.polylines() {
        if pl.points.len() < 2 { continue }

        let ls: LineString = pl.points.iter().map( |p| p.coord()).collect::<Vec<_>>().into();
        let mut f = feature( Geometry::new( Value::from( &ls)));
        f.set_property( "type", "polyline");
        f.set_property( "handle", handle.0);
        f.set_property( "color", pl.style.color.clone());
        f.set_property( "weight", pl.style.weight);
        f.set_property( "opacity", pl.style.opacity);
        f.set_property( "dashed", pl.style.dashed);
        features.push( f);
    }

    for (handle,m) in surface.markers() {
        let p: Point = *m.point.point();
        let mut f = feature( Geometry::new( Value::from( &p)));
        f.set_property( "type", "marker");
        f.set_property( "handle", handle.0);
        f.set_property( "glyph", glyph_name( m.glyph));
        f.set_property( "rotation", m.rotation);
        features.push( f);
    }

    for (handle,l) in surface.labels() {
        let p: Point = *l.point.point();
        let mut f = feature( Geometry::new( Value::from( &p)));
        f.set_property( "type", "label");
        f.set_property( "handle", handle.0);
        f.set_property( "text", l.text.clone());
        f.set_property( "visible", l.visible);
        features.push( f);
    }

    FeatureCollection { bbox: None, features, foreign_members: None }
}

pub fn write_geojson (path: impl AsRef<Path>, fc: FeatureCollection) -> Result<()> {
    let gj = GeoJson::FeatureCollection( fc);
    fs::write( path, serde_json::to_string_pretty( &gj)?)?;
    Ok(())
}
