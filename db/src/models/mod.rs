pub mod attendance_record;
pub mod period;
pub mod scan_token;
pub mod user;

pub use attendance_record::Entity as AttendanceRecord;
pub use period::Entity as Period;
pub use scan_token::Entity as ScanToken;
pub use user::Entity as User;
