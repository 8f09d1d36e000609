//! Pixband Hardware Abstraction Layer
//!
//! This crate defines the small set of hardware traits a panel link needs:
//! a write-only SPI master and push-pull output pins for chip-select and
//! the A0 (data/command) line. Board HALs either implement these directly
//! or go through the [`embedded`] adapters for `embedded-hal` 1.0 types.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  pixband-tft (windowed frame buffer)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixband-drivers (ILI9488, ILI9341)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pixband-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          embedded-hal / chip HAL
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`] - Digital output
//! - [`spi::SpiBus`] - SPI bus writes

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod spi;

// Re-export key traits at crate root for convenience
pub use gpio::OutputPin;
pub use spi::{Mode, SpiBus, SpiConfig};
