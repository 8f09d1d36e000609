//! Panel traits
//!
//! These traits define the interface between the windowed frame buffer
//! and a concrete panel controller.

pub mod panel;

pub use panel::{HardwareInit, Panel, PanelTransport};
