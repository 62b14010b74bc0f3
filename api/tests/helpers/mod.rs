
pub use app::{bearer, body_json, make_test_app, make_test_app_with_geofence, seed_period, seed_user};
