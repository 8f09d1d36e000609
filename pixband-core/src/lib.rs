//! Board-agnostic core types for the Pixband TFT driver
//!
//! This crate contains everything that does not depend on a particular
//! panel controller or microcontroller:
//!
//! - Pixel geometry and the RGB565 colour type
//! - Font table format consumed by the text layer
//! - Hardware binding and panel configuration types
//! - Panel traits (window/pixel transport and per-controller bring-up)

#![no_std]
#![deny(unsafe_code)]

pub mod colour;
pub mod config;
pub mod font;
pub mod geometry;
pub mod traits;

pub use colour::Colour;
pub use font::{Glyph, LcdFont};
pub use geometry::{PixelNumber, Rect};
pub use traits::{HardwareInit, Panel, PanelTransport};
