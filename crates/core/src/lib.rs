//! rentdesk_core - functional core for the rentdesk project.
//!
//! Domain types, pure operations and the backend traits the services are
//! written against. Nothing in this crate performs I/O.

pub mod auth;
pub mod customer;
pub mod image;
pub mod storage;
