//! # Postboard Shared
//!
//! Wire schemas shared by the server and any Rust client.
//! Response types whitelist the fields they serialize.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
