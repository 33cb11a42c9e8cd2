//! Cross-crate scenarios for `airgauge`.
//!
//! Scan providers and speed testers are replaced by fakes, so nothing here
//! needs a wireless adapter, root or network access.

#[cfg(test)]
mod fakes;
mod scanning;
mod speedtest;
