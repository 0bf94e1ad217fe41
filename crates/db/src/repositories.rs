pub mod calendar;
pub mod exchange_request;
pub mod notification;
pub mod person;
pub mod standby_schedule;
