#[path = "../test_utils.rs"]
mod test_utils;

mod change_request_test;
mod export_test;
mod middleware_test;
mod notification_test;
mod person_test;
mod standby_test;
