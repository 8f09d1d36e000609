//! Panel controller drivers
//!
//! This crate provides concrete implementations of the panel traits
//! defined in pixband-core:
//!
//! - MIPI-DCS command/data link over SPI with chip-select and A0 lines
//! - ILI9488 controllers (18-bit pixels over SPI)
//! - ILI9341 controllers (16-bit pixels over SPI)

#![no_std]
#![deny(unsafe_code)]

pub mod controller;
pub mod dcs;

#[cfg(test)]
mod testing;

pub use controller::{Ili9341, Ili9488};
pub use dcs::{DcsError, DcsLink};
