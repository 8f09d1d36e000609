//! Configuration types
//!
//! Board-level panel configuration. Boards either build a [`TftConfig`] in
//! code, read it from a TOML description, or keep it in flash as postcard
//! binary data.

pub mod hardware;
pub mod panel;

pub use hardware::*;
pub use panel::*;
