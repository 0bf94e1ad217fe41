pub mod assignment;
pub mod calendar;
pub mod change_request;
pub mod notification;
pub mod person;
