//! # Standby Core
//!
//! Domain model and business rules for the on-call (standby) rotation:
//!
//! - **Rotation**: turning dates into weekly windows and daily overrides
//! - **Resolver**: deciding who is on call at a given instant
//! - **Service**: the change-request workflow and its notifications
//! - **Export**: CSV and printable renderings of the roster
//!
//! Storage is reached only through the traits in [`repository`]. The
//! [`memory`] module provides an in-process implementation of all of them.

pub mod errors;
pub mod export;
pub mod memory;
pub mod models;
pub mod repository;
pub mod resolver;
pub mod rotation;
pub mod service;
