//! Domain layer: the mapping entity and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Store trait definitions and their error type
//!
//! The domain layer has no dependency on the transport or infrastructure
//! layers. Store implementations live in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod repositories;
