//! Panel transport and bring-up traits

use crate::colour::Colour;
use crate::config::HardwareBinding;
use crate::geometry::Rect;

/// Pixel transport to a panel controller
///
/// Both operations block until the bytes are on the wire.
pub trait PanelTransport {
    /// Error type for bus operations
    type Error;

    /// Select the panel region subsequent pixels are written to
    ///
    /// `area` uses exclusive bottom/right edges and is never empty.
    fn set_window(&mut self, area: &Rect) -> Result<(), Self::Error>;

    /// Stream pixels into the active window in row-major order
    ///
    /// May be called repeatedly after one [`set_window`](Self::set_window);
    /// each call continues where the previous one stopped.
    fn write_pixels(&mut self, pixels: &[Colour]) -> Result<(), Self::Error>;
}

/// Controller-specific bring-up
///
/// Every concrete panel driver supplies its own power-up sequence; the
/// frame buffer only decides when to run it.
pub trait HardwareInit: PanelTransport {
    /// SPI clock this controller runs at when the binding does not say
    const PREFERRED_SPI_FREQUENCY: u32;

    /// Fastest SPI clock the controller accepts for writes
    const MAX_SPI_FREQUENCY: u32;

    /// SPI clock to run this controller at for a binding
    ///
    /// A zero frequency in the binding selects the preferred clock; any
    /// other is capped at the controller's maximum.
    fn spi_frequency(binding: &HardwareBinding) -> u32 {
        match binding.spi_frequency {
            0 => Self::PREFERRED_SPI_FREQUENCY,
            f => f.min(Self::MAX_SPI_FREQUENCY),
        }
    }

    /// Reset and configure the controller
    fn hardware_init(&mut self, binding: &HardwareBinding) -> Result<(), Self::Error>;
}

/// A panel that can be brought up and written to
pub trait Panel: HardwareInit {}

// Blanket implementation for types that implement both traits
impl<T: HardwareInit> Panel for T {}
