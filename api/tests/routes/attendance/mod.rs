mod list_test;
mod scan_test;
mod verify_test;
