//! Windowed frame buffer for colour TFT panels
//!
//! A full 320x480 RGB565 frame needs 300 KiB, far more RAM than the
//! microcontrollers driving these panels have. [`TftLcd`] instead keeps a
//! band of `buffer_rows` complete rows and presents the whole surface to
//! callers:
//!
//! - **Window** - the band of surface rows currently held in RAM. Drawing
//!   on a row outside it flushes the band and slides it.
//! - **Dirty tracking** - the bounding box of pixels changed since the
//!   last flush; only that box is sent to the panel.
//! - **Drawing** - set/clear pixel, rectangle clear, monochrome bitmaps.
//! - **Glyph columns** - the one-pixel-wide strips the text layer renders
//!   characters with.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │  UI / text layer (write!, set_cursor)    │
//! └──────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  TftLcd: window + dirty rect + drawing   │
//! └──────────────────────────────────────────┘
//!                     │ flush: set_window + write_pixels
//!                     ▼
//! ┌──────────────────────────────────────────┐
//! │  Panel (pixband-drivers: ILI9488, ...)   │
//! └──────────────────────────────────────────┘
//! ```
//!
//! With the `embedded-graphics` feature, [`TftLcd`] is also an
//! `embedded_graphics::draw_target::DrawTarget` over `Rgb565`.
//!
//! Drawing never fails: coordinates outside the surface are clipped and
//! transport errors during a flush are logged and counted.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

#[macro_use]
mod fmt;

pub mod dirty;
mod draw;
mod glyph;
#[cfg(any(test, feature = "embedded-graphics"))]
mod graphics;
pub mod lcd;
pub mod text;
pub mod window;

#[cfg(test)]
mod testing;

// Re-export key types
pub use dirty::DirtyTracker;
pub use lcd::TftLcd;
pub use text::MAX_FONTS;
pub use window::Window;
