//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short code → destination association
//! - [`NewMapping`] - Insertion payload for a fresh mapping

pub mod mapping;

pub use mapping::{NewMapping, UrlMapping};
