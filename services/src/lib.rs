pub mod attendance_service;
pub mod clock;
pub mod decision;
pub mod error;
pub mod geofence;
pub mod period_service;
pub mod scan_token_service;
pub mod time_window;


pub use error::ServiceError;
