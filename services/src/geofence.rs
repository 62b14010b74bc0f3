//! Allowed scan regions.
//!
//! A [`Geofence`] is built once from a [`GeofenceConfig`] at startup and
//! shared read-only. Membership tests are pure and never fail.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Mean Earth radius used for circle membership, in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A circular region around a centre point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_meters: f64,
}

/// On-disk shape of the geofence file.
///
/// ```json
/// {
///   "polygons": [[[14.5736, 121.1320], [14.5732, 121.1318], [14.5726, 121.1315]]],
///   "circles": [{ "latitude": 14.573, "longitude": 121.132, "radius_meters": 50 }]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeofenceConfig {
    /// Each polygon is an ordered list of `[lat, lon]` vertices.
    #[serde(default)]
    pub polygons: Vec<Vec<[f64; 2]>>,
    #[serde(default)]
    pub circles: Vec<Circle>,
}

#[derive(Debug, Error)]
pub enum GeofenceConfigError {
    #[error("failed to read geofence file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid geofence file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl GeofenceConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GeofenceConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| GeofenceConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| GeofenceConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}

/// A polygon with consecutive duplicate vertices removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Coordinate>,
}

impl Polygon {
    pub fn new(points: impl IntoIterator<Item = Coordinate>) -> Self {
        let mut vertices: Vec<Coordinate> = Vec::new();
        for point in points {
            if vertices.last() != Some(&point) {
                vertices.push(point);
            }
        }
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    /// Fewer than three distinct vertices cannot enclose anything.
    pub fn is_usable(&self) -> bool {
        self.distinct_vertices() >= 3
    }

    fn distinct_vertices(&self) -> usize {
        self.vertices
            .iter()
            .map(|v| (v.latitude.to_bits(), v.longitude.to_bits()))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Even-odd ray casting along the latitude axis.
    ///
    /// Points exactly on an edge may land on either side.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        if !self.is_usable() {
            return false;
        }

        let n = self.vertices.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];

            let crosses = (vi.longitude > longitude) != (vj.longitude > longitude)
                && latitude
                    < (vj.latitude - vi.latitude) * (longitude - vi.longitude)
                        / (vj.longitude - vi.longitude)
                        + vi.latitude;
            if crosses {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

impl Circle {
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        haversine_meters(
            Coordinate::new(self.latitude, self.longitude),
            Coordinate::new(latitude, longitude),
        ) <= self.radius_meters
    }
}

/// Great-circle distance between two points, in metres.
pub fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let (lat1, lat2) = (a.latitude.to_radians(), b.latitude.to_radians());
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_METERS * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The set of regions a scan may come from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geofence {
    polygons: Vec<Polygon>,
    circles: Vec<Circle>,
}

impl Geofence {
    pub fn new(config: GeofenceConfig) -> Self {
        let polygons = config
            .polygons
            .into_iter()
            .map(|points| Polygon::new(points.into_iter().map(|[lat, lon]| Coordinate::new(lat, lon))))
            .collect();
        Self {
            polygons,
            circles: config.circles,
        }
    }

    /// A fence with no regions. Every scan skips the location check.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// True when at least one usable polygon or any circle is configured.
    pub fn is_enabled(&self) -> bool {
        !self.circles.is_empty() || self.polygons.iter().any(Polygon::is_usable)
    }

    pub fn is_within(&self, latitude: f64, longitude: f64) -> bool {
        self.polygons.iter().any(|p| p.contains(latitude, longitude))
            || self.circles.iter().any(|c| c.contains(latitude, longitude))
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }
}

impl From<GeofenceConfig> for Geofence {
    fn from(config: GeofenceConfig) -> Self {
        Geofence::new(config)
    }
}
