pub mod change_request;
pub mod export;
pub mod health;
pub mod notification;
pub mod person;
pub mod standby;
