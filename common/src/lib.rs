//! Shared domain types for `airgauge`.
//!
//! Everything here is free of IO: the network model, the `nmcli` record
//! decoder, error types and the traits the adapters in `airgauge-core`
//! implement.

pub mod config;
pub mod error;
pub mod scanning;
pub mod speed;
pub mod vendors;
pub mod wifi;
