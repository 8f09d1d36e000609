//! Controller variants
//!
//! Each variant owns a [`DcsLink`](crate::dcs::DcsLink) and a delay
//! provider, and differs only in its bring-up sequence and the pixel
//! format it streams.

pub mod ili9341;
pub mod ili9488;

pub use ili9341::Ili9341;
pub use ili9488::Ili9488;
