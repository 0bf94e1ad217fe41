pub mod change_request;
pub mod export;
pub mod notification;
pub mod person;
pub mod standby;
