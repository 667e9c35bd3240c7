//! Bookstand backend application library.
//!
//! Exposes the catalog module (REST endpoints plus server-rendered views)
//! and module registration for the service binary.

pub mod modules;
