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

//! geographic points and the spherical / degree-space measures we need to animate along them.
//! `GeoPoint` is a new type around [geo](https://docs.rs/geo/latest/geo/index.html) `Point` so that
//! we can hand our points to geo algorithms (and geojson) without copying. Note that `geo` uses
//! x = longitude, y = latitude whereas our ctors and accessors use the common (lat,lng) order.
//!
//! The measures in here are deliberately simple. Bearings are spherical forward azimuths, distances
//! are euclidean in degree space. Neither is meant for navigation.

use std::fmt;
use serde::ser::{Serialize as SerializeTrait, Serializer, SerializeStruct};
use serde::de::{self, Deserialize as DeserializeTrait, Deserializer, Visitor, SeqAccess, MapAccess};

use geo::{Coord, Point};

use crate::angle::Heading;
use crate::{atan2, cos, pow2, rad, sin, sqrt};

pub type GeoCoord = Coord<f64>;

/* #region GeoPoint ***********************************************************************************************/

/// a wrapper for geo::Point that uses geodetic degrees stored as f64.
/// Values are stored as given (no normalization) since interpolated curve samples can legitimately
/// leave the [-180,180] longitude range between two points that cross the antimeridian
#[derive(Clone,Copy,PartialEq)]
pub struct GeoPoint(Point);

impl GeoPoint {
    pub fn from_lat_lng_degrees (lat: f64, lng: f64) -> Self {
        GeoPoint( Point::new( lng, lat))
    }

    pub fn from_point(p:Point) -> Self { GeoPoint(p) }

    #[inline] pub fn lat (&self) -> f64 { self.0.y() }
    #[inline] pub fn lng (&self) -> f64 { self.0.x() }

    pub fn point<'a> (&'a self) -> &'a Point { &self.0 }
    pub fn coord (&self)->GeoCoord { self.0.0 }

    /// spherical forward azimuth from self to `other` (0 = north, clockwise)
    pub fn bearing_to (&self, other: &GeoPoint) -> Heading {
        bearing( self, other)
    }

    /// euclidean distance in degree space
    pub fn degree_distance_to (&self, other: &GeoPoint) -> f64 {
        sqrt( pow2(other.lat() - self.lat()) + pow2(other.lng() - self.lng()))
    }

    /// true if both latitude and longitude differ by less than `tolerance` degrees
    pub fn is_within (&self, other: &GeoPoint, tolerance: f64) -> bool {
        (self.lat() - other.lat()).abs() < tolerance && (self.lng() - other.lng()).abs() < tolerance
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4},{:.4})", self.lat(), self.lng())
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint(lat: {}, lng: {})", self.lat(), self.lng())
    }
}

impl From<GeoPoint> for Point {
    fn from (p: GeoPoint) -> Point { p.0 }
}

impl SerializeTrait for GeoPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        let mut state = serializer.serialize_struct("GeoPoint", 2)?;
        state.serialize_field("lat", &self.lat())?;
        state.serialize_field("lng", &self.lng())?;
        state.end()
    }
}

// accepted input: maps with "lat" | "latitude" | "y" and "lng" | "lon" | "longitude" | "x" keys,
// or plain (lat,lng) sequences
impl<'de> DeserializeTrait<'de> for GeoPoint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: Deserializer<'de> {
        deserializer.deserialize_any( GeoPointVisitor)
    }
}

struct GeoPointVisitor;

impl<'de> Visitor<'de> for GeoPointVisitor {
    type Value = GeoPoint;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a GeoPoint as {lat,lng} map or [lat,lng] sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<GeoPoint, A::Error> where A: SeqAccess<'de> {
        let lat: f64 = seq.next_element()?.ok_or_else( || de::Error::invalid_length( 0, &self))?;
        let lng: f64 = seq.next_element()?.ok_or_else( || de::Error::invalid_length( 1, &self))?;
        Ok( GeoPoint::from_lat_lng_degrees( lat, lng))
    }

    fn visit_map<A>(self, mut map: A) -> Result<GeoPoint, A::Error> where A: MapAccess<'de> {
        let mut lat: Option<f64> = None;
        let mut lng: Option<f64> = None;

        while let Some(key) = map.next_key::<String>()? {
            let slot = match key.as_str() {
                "lat" | "latitude" | "y" => &mut lat,
                "lng" | "lon" | "longitude" | "x" => &mut lng,
                _ => { map.next_value::<de::IgnoredAny>()?; continue }
            };
            if slot.is_some() {
                return Err( de::Error::custom( format!("duplicate GeoPoint field '{key}'")))
            }
            *slot = Some( map.next_value()?);
        }

        match (lat, lng) {
            (Some(lat), Some(lng)) => Ok( GeoPoint::from_lat_lng_degrees( lat, lng)),
            (None, _) => Err( de::Error::missing_field("lat")),
            (_, None) => Err( de::Error::missing_field("lng")),
        }
    }
}

/* #endregion GeoPoint */

/* #region free functions ****************************************************************************************/

/// standard forward azimuth on a sphere, returned as heading in [0,360)
pub fn bearing (start: &GeoPoint, end: &GeoPoint) -> Heading {
    let φ1 = rad( start.lat());
    let φ2 = rad( end.lat());
    let Δλ = rad( end.lng() - start.lng());

    let y = sin(Δλ) * cos(φ2);
    let x = cos(φ1) * sin(φ2) - sin(φ1) * cos(φ2) * cos(Δλ);

    Heading::from_radians( atan2( y, x))
}

/// true if going from `start` to `end` along the shorter way would cross the antimeridian.
/// Only the raw longitude difference is checked
pub fn crosses_antimeridian (start: &GeoPoint, end: &GeoPoint) -> bool {
    (end.lng() - start.lng()).abs() > 180.0
}

/// angular (not great circle) distance between two points in radians: sqrt(Δφ² + Δλ²)
pub fn angular_distance (start: &GeoPoint, end: &GeoPoint) -> f64 {
    let Δφ = rad( end.lat() - start.lat());
    let Δλ = rad( end.lng() - start.lng());
    sqrt( pow2(Δφ) + pow2(Δλ))
}

/* #endregion free functions */
