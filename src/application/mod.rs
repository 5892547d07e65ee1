//! Application layer services implementing business logic.
//!
//! Services consume the repository and generator traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::mapping_service::MappingService`] - Shorten, resolve, update and expire mappings

pub mod services;
