use sea_orm::DatabaseConnection;
use services::clock::InstitutionClock;
use services::geofence::Geofence;
use std::sync::Arc;

/// Everything a handler needs, loaded once at startup.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    geofence: Arc<Geofence>,
    clock: InstitutionClock,
}

impl AppState {
    pub fn new(db: DatabaseConnection, geofence: Geofence, clock: InstitutionClock) -> Self {
        Self {
            db,
            geofence: Arc::new(geofence),
            clock,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn geofence(&self) -> &Geofence {
        &self.geofence
    }

    pub fn clock(&self) -> &InstitutionClock {
        &self.clock
    }
}
