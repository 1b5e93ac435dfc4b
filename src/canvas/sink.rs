//! Output side of the canvas.
//!
//! The panel driver (or any other consumer) receives a rectangular
//! address window followed by a stream of pixels that fill it row by
//! row. The window is inclusive on both ends and always lies on the
//! surface; the canvas clips before calling in.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

/// Destination for committed pixels.
pub trait PixelSink {
    /// Open an address window `x0..=x1` × `y0..=y1`.
    fn begin_region(&mut self, x0: u16, y0: u16, x1: u16, y1: u16);

    /// Write the next pixel of the current window.
    fn push_pixel(&mut self, color: Rgb565);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn begin_region(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        (**self).begin_region(x0, y0, x1, y1);
    }

    fn push_pixel(&mut self, color: Rgb565) {
        (**self).push_pixel(color);
    }
}

/// Adapts any `embedded-graphics` draw target into a [`PixelSink`].
///
/// Used on the device to stream onto the `mipidsi` panel driver. Bus
/// errors are counted, not propagated: drawing never fails.
pub struct DrawTargetSink<D> {
    target: D,
    window: (i32, i32, i32, i32),
    cursor: Point,
    errors: u32,
}

impl<D> DrawTargetSink<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            window: (0, 0, 0, 0),
            cursor: Point::zero(),
            errors: 0,
        }
    }

    /// Number of pixel writes the target rejected so far.
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }
}

impl<D> PixelSink for DrawTargetSink<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn begin_region(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
        self.window = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
        self.cursor = Point::new(x0 as i32, y0 as i32);
    }

    fn push_pixel(&mut self, color: Rgb565) {
        let (x0, _, x1, y1) = self.window;
        if self.cursor.y > y1 {
            // Window already full; extra pixels are dropped like the panel does.
            return;
        }
        if self
            .target
            .draw_iter(core::iter::once(Pixel(self.cursor, color)))
            .is_err()
        {
            self.errors = self.errors.saturating_add(1);
        }
        self.cursor.x += 1;
        if self.cursor.x > x1 {
            self.cursor.x = x0;
            self.cursor.y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_graphics::geometry::Size;
    use embedded_graphics::pixelcolor::RgbColor;
    use heapless::Vec;

    struct Recorder {
        pixels: Vec<(Point, Rgb565), 32>,
    }

    impl OriginDimensions for Recorder {
        fn size(&self) -> Size {
            Size::new(240, 320)
        }
    }

    impl DrawTarget for Recorder {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, c) in pixels {
                let _ = self.pixels.push((p, c));
            }
            Ok(())
        }
    }

    #[test]
    fn window_is_filled_row_major() {
        let mut sink = DrawTargetSink::new(Recorder { pixels: Vec::new() });
        sink.begin_region(10, 20, 11, 21);
        for _ in 0..5 {
            sink.push_pixel(Rgb565::RED);
        }
        let pts: Vec<Point, 8> = sink.target_mut().pixels.iter().map(|(p, _)| *p).collect();
        assert_eq!(
            pts.as_slice(),
            &[
                Point::new(10, 20),
                Point::new(11, 20),
                Point::new(10, 21),
                Point::new(11, 21)
            ]
        );
        assert_eq!(sink.error_count(), 0);
    }
}
