//! `embedded-graphics` drawing target
//!
//! Lets the primitives, fonts and images of `embedded-graphics` render
//! through the buffered window. Points off the surface are dropped, like
//! every other drawing call.

use core::convert::Infallible;

use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{Dimensions, OriginDimensions, Size};
use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::Pixel;
use pixband_core::{Colour, Panel, PixelNumber};

use crate::lcd::TftLcd;

fn to_colour(colour: Rgb565) -> Colour {
    Colour(RawU16::from(colour).into_inner())
}

impl<P: Panel> OriginDimensions for TftLcd<P> {
    fn size(&self) -> Size {
        Size::new(self.num_cols() as u32, self.num_rows() as u32)
    }
}

impl<P: Panel> DrawTarget for TftLcd<P> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, colour) in pixels {
            let (Ok(row), Ok(col)) = (
                PixelNumber::try_from(point.y),
                PixelNumber::try_from(point.x),
            ) else {
                continue;
            };
            self.put_pixel(row, col, to_colour(colour));
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, colour: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        // Inside the bounding box, so both corners fit a PixelNumber
        let top = area.top_left.y as PixelNumber;
        let left = area.top_left.x as PixelNumber;
        let bottom = top + area.size.height as PixelNumber;
        let right = left + area.size.width as PixelNumber;
        self.fill_rect(top, left, bottom, right, to_colour(colour));
        Ok(())
    }
}
