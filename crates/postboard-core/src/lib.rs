//! # Postboard Core
//!
//! The domain layer of the Postboard API.
//! Entities, ports and error types with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::RepoError;
