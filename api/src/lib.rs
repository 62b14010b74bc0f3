pub mod auth;
pub mod response;
pub mod routes;
pub mod state;

use services::geofence::{Geofence, GeofenceConfig, GeofenceConfigError};

/// Builds the geofence from the configured file. No file means no fence.
pub fn load_geofence(path: Option<&str>) -> Result<Geofence, GeofenceConfigError> {
    let Some(path) = path else {
        tracing::warn!("GEOFENCE_PATH not set, geofencing disabled");
        return Ok(Geofence::disabled());
    };

    let geofence = Geofence::new(GeofenceConfig::from_file(path)?);
    tracing::info!(
        path,
        polygons = geofence.polygons().len(),
        circles = geofence.circles().len(),
        enabled = geofence.is_enabled(),
        "Geofence loaded"
    );
    Ok(geofence)
}
