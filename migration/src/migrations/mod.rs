pub mod m202510010001_create_users;
pub mod m202510010002_create_periods;
pub mod m202510010003_create_scan_tokens;
pub mod m202510010004_create_attendance_records;
pub mod m202510080001_add_attendance_location;
pub mod m202510080002_add_period_teacher;
