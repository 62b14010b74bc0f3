mod attendance;
mod health_test;
mod qr_test;
