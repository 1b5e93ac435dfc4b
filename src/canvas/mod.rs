//! Minimal 2D drawing engine.
//!
//! Pixel, line, rectangle, triangle-outline and 5×7 glyph rendering onto a
//! fixed-size surface. Everything is integer-only and clipped against the
//! surface bounds; off-surface drawing is silently dropped.
//!
//! Each primitive opens one address window on the [`PixelSink`] per
//! contiguous run and streams the run's pixels into it.

pub mod font;
pub mod sink;

use core::mem::swap;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::Point;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use sink::{DrawTargetSink, PixelSink};

/// Horizontal advance of one glyph at `scale` (5.4 px per scale step, truncated).
pub const fn glyph_advance(scale: i32) -> i32 {
    (27 * scale) / 5
}

/// Drawable rectangular surface backed by a pixel sink.
pub struct Canvas<S> {
    sink: S,
    width: i32,
    height: i32,
}

impl<S: PixelSink> Canvas<S> {
    pub fn new(sink: S, width: i32, height: i32) -> Self {
        Self {
            sink,
            width,
            height,
        }
    }

    /// Canvas with the panel's native 240×320 geometry.
    pub fn with_panel_size(sink: S) -> Self {
        Self::new(sink, DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Commit one pixel; no-op outside the surface.
    pub fn draw_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if !self.contains(x, y) {
            return;
        }
        self.sink.begin_region(x as u16, y as u16, x as u16, y as u16);
        self.sink.push_pixel(color);
    }

    /// Vertical run of `h` pixels starting at `(x, y)` going down.
    pub fn draw_fast_vline(&mut self, x: i32, y: i32, h: i32, color: Rgb565) {
        if h <= 0 || x < 0 || x >= self.width {
            return;
        }
        let y0 = y.max(0);
        let y1 = y.saturating_add(h - 1).min(self.height - 1);
        if y0 > y1 {
            return;
        }
        self.sink.begin_region(x as u16, y0 as u16, x as u16, y1 as u16);
        for _ in y0..=y1 {
            self.sink.push_pixel(color);
        }
    }

    /// Horizontal run of `w` pixels starting at `(x, y)` going right.
    pub fn draw_fast_hline(&mut self, x: i32, y: i32, w: i32, color: Rgb565) {
        if w <= 0 || y < 0 || y >= self.height {
            return;
        }
        let x0 = x.max(0);
        let x1 = x.saturating_add(w - 1).min(self.width - 1);
        if x0 > x1 {
            return;
        }
        self.sink.begin_region(x0 as u16, y as u16, x1 as u16, y as u16);
        for _ in x0..=x1 {
            self.sink.push_pixel(color);
        }
    }

    /// Straight line between two inclusive endpoints.
    ///
    /// Axis-aligned lines become a single run; anything else goes through
    /// [`Self::write_line`]. The plotted set does not depend on endpoint order.
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        if x0 == x1 {
            let top = y0.min(y1).max(0);
            let bottom = y0.max(y1).min(self.height - 1);
            if top <= bottom {
                self.draw_fast_vline(x0, top, bottom - top + 1, color);
            }
        } else if y0 == y1 {
            let left = x0.min(x1).max(0);
            let right = x0.max(x1).min(self.width - 1);
            if left <= right {
                self.draw_fast_hline(left, y0, right - left + 1, color);
            }
        } else {
            self.write_line(x0, y0, x1, y1, color);
        }
    }

    /// Integer Bresenham walk along the major axis.
    ///
    /// Spans are computed in `i64`, and the walk starts at the first
    /// on-surface step of the major axis, so work is bounded by the surface
    /// size whatever the endpoints.
    fn write_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb565) {
        let (mut x0, mut y0, mut x1, mut y1) =
            (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            swap(&mut x0, &mut y0);
            swap(&mut x1, &mut y1);
        }
        // Always walk low-to-high on the major axis so reversed endpoints
        // produce the same pixels.
        if x0 > x1 {
            swap(&mut x0, &mut x1);
            swap(&mut y0, &mut y1);
        }

        let major_len = i64::from(if steep { self.height } else { self.width });
        let start = x0.max(0);
        let end = x1.min(major_len - 1);
        if start > end {
            return;
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep: i64 = if y0 < y1 { 1 } else { -1 };
        let half = dx / 2;

        // Error term after `skipped` steps stays in [0, dx), which fixes how
        // many minor-axis steps were taken.
        let skipped = i128::from(start - x0);
        let owed = skipped * i128::from(dy) - i128::from(half);
        let minor_steps = if owed > 0 {
            (owed + i128::from(dx) - 1) / i128::from(dx)
        } else {
            0
        };
        let mut err = (i128::from(half) - skipped * i128::from(dy) + minor_steps * i128::from(dx)) as i64;
        let mut y = y0 + ystep * minor_steps as i64;

        for x in start..=end {
            // `y` lies between the original endpoints, so it fits in i32.
            let (px, py) = if steep { (y, x) } else { (x, y) };
            self.draw_pixel(px as i32, py as i32, color);
            err -= dy;
            if err < 0 {
                y += ystep;
                err += dx;
            }
        }
    }

    /// `w` adjacent vertical runs of height `h`. No-op for non-positive sizes.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgb565) {
        if w <= 0 || h <= 0 {
            return;
        }
        let first = x.max(0);
        let last = x.saturating_add(w).min(self.width);
        for column in first..last {
            self.draw_fast_vline(column, y, h, color);
        }
    }

    pub fn fill_screen(&mut self, color: Rgb565) {
        self.fill_rect(0, 0, self.width, self.height, color);
    }

    /// Outline of the triangle `p0`-`p1`-`p2`.
    pub fn draw_triangle(&mut self, p0: Point, p1: Point, p2: Point, color: Rgb565) {
        self.draw_line(p0.x, p0.y, p1.x, p1.y, color);
        self.draw_line(p1.x, p1.y, p2.x, p2.y, color);
        self.draw_line(p2.x, p2.y, p0.x, p0.y, color);
    }

    /// Render one 5×7 glyph with its top-left corner at `(x, y)`.
    ///
    /// Set bits are painted `fg`. Clear bits and the trailing spacing column
    /// are painted `bg` unless `bg == fg`, in which case they are left
    /// untouched (transparent overlay). Returns the horizontal advance, or
    /// 1 when the glyph lies entirely off the surface.
    pub fn draw_glyph(
        &mut self,
        x: i32,
        y: i32,
        code: u8,
        fg: Rgb565,
        bg: Rgb565,
        scale: u8,
    ) -> i32 {
        let scale = i32::from(scale.max(1));
        let advance = glyph_advance(scale);

        if x >= self.width
            || y >= self.height
            || x + 6 * scale - 1 < 0
            || y + 8 * scale - 1 < 0
        {
            return 1;
        }
        let Some(columns) = font::glyph(code) else {
            return advance;
        };
        let opaque = bg != fg;

        for (i, column) in columns.iter().enumerate() {
            let cx = x + i as i32 * scale;
            let mut bits = *column;
            for j in 0..8 {
                let cy = y + j * scale;
                if bits & 1 != 0 {
                    self.plot_block(cx, cy, scale, fg);
                } else if opaque {
                    self.plot_block(cx, cy, scale, bg);
                }
                bits >>= 1;
            }
        }

        if opaque {
            if scale == 1 {
                self.draw_fast_vline(x + 5, y, 8, bg);
            } else {
                self.fill_rect(x + 5 * scale, y, scale, 8 * scale, bg);
            }
        }

        advance
    }

    fn plot_block(&mut self, x: i32, y: i32, scale: i32, color: Rgb565) {
        if scale == 1 {
            self.draw_pixel(x, y, color);
        } else {
            self.fill_rect(x, y, scale, scale, color);
        }
    }

    /// Left-to-right text on a black background, no wrapping.
    ///
    /// Returns the x coordinate just past the last glyph.
    pub fn draw_string(&mut self, text: &str, x: i32, y: i32, scale: u8, color: Rgb565) -> i32 {
        let mut cursor = x;
        for code in text.bytes() {
            let advance = self.draw_glyph(cursor, y, code, color, Rgb565::BLACK, scale);
            cursor = cursor.saturating_add(advance);
        }
        cursor
    }
}

/// Recording sink used by the library's unit tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::PixelSink;
    use embedded_graphics::pixelcolor::Rgb565;

    pub struct RecordingSink {
        pub width: i32,
        pub height: i32,
        pub frame: std::vec::Vec<Option<Rgb565>>,
        pub commits: std::vec::Vec<(i32, i32, Rgb565)>,
        pub regions: usize,
        window: (i32, i32, i32, i32),
        cursor: (i32, i32),
    }

    impl RecordingSink {
        pub fn new(width: i32, height: i32) -> Self {
            Self {
                width,
                height,
                frame: std::vec![None; (width * height) as usize],
                commits: std::vec::Vec::new(),
                regions: 0,
                window: (0, 0, 0, 0),
                cursor: (0, 0),
            }
        }

        pub fn panel() -> Self {
            Self::new(crate::config::DISPLAY_WIDTH, crate::config::DISPLAY_HEIGHT)
        }

        pub fn at(&self, x: i32, y: i32) -> Option<Rgb565> {
            self.frame[(y * self.width + x) as usize]
        }

        pub fn clear_log(&mut self) {
            self.commits.clear();
            self.regions = 0;
        }

        /// Sorted, de-duplicated coordinates of every committed pixel.
        pub fn plotted(&self) -> std::vec::Vec<(i32, i32)> {
            let mut pts: std::vec::Vec<(i32, i32)> =
                self.commits.iter().map(|&(x, y, _)| (x, y)).collect();
            pts.sort_unstable();
            pts.dedup();
            pts
        }

        /// Whether any pixel inside the rectangle was committed.
        pub fn touched(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
            self.commits
                .iter()
                .any(|&(px, py, _)| px >= x && px < x + w && py >= y && py < y + h)
        }
    }

    impl PixelSink for RecordingSink {
        fn begin_region(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) {
            self.regions += 1;
            self.window = (x0 as i32, y0 as i32, x1 as i32, y1 as i32);
            self.cursor = (x0 as i32, y0 as i32);
        }

        fn push_pixel(&mut self, color: Rgb565) {
            let (x0, _, x1, _) = self.window;
            let (x, y) = self.cursor;
            assert!(x >= 0 && x < self.width && y >= 0 && y < self.height);
            self.frame[(y * self.width + x) as usize] = Some(color);
            self.commits.push((x, y, color));
            self.cursor = if x + 1 > x1 { (x0, y + 1) } else { (x + 1, y) };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    fn canvas() -> Canvas<RecordingSink> {
        Canvas::with_panel_size(RecordingSink::panel())
    }

    #[test]
    fn pixel_inside_commits_exactly_once() {
        let mut c = canvas();
        for &(x, y) in &[(0, 0), (239, 319), (120, 160), (0, 319), (239, 0)] {
            c.sink_mut().clear_log();
            c.draw_pixel(x, y, Rgb565::RED);
            assert_eq!(c.sink().commits.as_slice(), &[(x, y, Rgb565::RED)]);
            assert_eq!(c.sink().at(x, y), Some(Rgb565::RED));
        }
    }

    #[test]
    fn pixel_outside_commits_nothing() {
        let mut c = canvas();
        for &(x, y) in &[(-1, 0), (0, -1), (240, 0), (0, 320), (1000, -1000)] {
            c.draw_pixel(x, y, Rgb565::RED);
        }
        assert!(c.sink().commits.is_empty());
        assert_eq!(c.sink().regions, 0);
    }

    #[test]
    fn reversed_lines_plot_the_same_pixels() {
        let cases = [
            (3, 7, 50, 20),
            (10, 200, 12, 10),
            (100, 100, 0, 0),
            (5, 5, 60, 5),
            (7, 300, 7, 2),
            (-20, -5, 260, 330),
            (0, 0, 9, 10),
        ];
        for &(x0, y0, x1, y1) in &cases {
            let mut a = canvas();
            a.draw_line(x0, y0, x1, y1, Rgb565::WHITE);
            let mut b = canvas();
            b.draw_line(x1, y1, x0, y0, Rgb565::WHITE);
            assert_eq!(a.sink().plotted(), b.sink().plotted(), "line {:?}", (x0, y0, x1, y1));
        }
    }

    #[test]
    fn diagonal_line_is_connected_and_hits_endpoints() {
        let mut c = canvas();
        c.draw_line(2, 3, 30, 17, Rgb565::GREEN);
        let pts = c.sink().plotted();
        assert_eq!(pts.len(), 29); // one pixel per step on the major (x) axis
        assert!(pts.contains(&(2, 3)));
        assert!(pts.contains(&(30, 17)));
        for w in pts.windows(2) {
            assert_eq!(w[1].0 - w[0].0, 1);
            assert!((w[1].1 - w[0].1).abs() <= 1);
        }
    }

    #[test]
    fn axis_aligned_line_is_one_region() {
        let mut c = canvas();
        c.draw_line(10, 40, 10, 20, Rgb565::WHITE);
        assert_eq!(c.sink().regions, 1);
        assert_eq!(c.sink().commits.len(), 21);
    }

    #[test]
    fn empty_rects_commit_nothing() {
        let mut c = canvas();
        c.fill_rect(10, 10, 0, 5, Rgb565::BLUE);
        c.fill_rect(10, 10, 5, 0, Rgb565::BLUE);
        c.fill_rect(10, 10, -3, 5, Rgb565::BLUE);
        c.fill_rect(10, 10, 5, -3, Rgb565::BLUE);
        assert!(c.sink().commits.is_empty());
    }

    #[test]
    fn fill_rect_is_clipped_to_surface() {
        let mut c = canvas();
        c.fill_rect(230, 310, 20, 20, Rgb565::BLUE);
        assert_eq!(c.sink().commits.len(), 10 * 10);
        assert_eq!(c.sink().regions, 10);
        assert_eq!(c.sink().at(239, 319), Some(Rgb565::BLUE));
    }

    #[test]
    fn glyph_opaque_paints_full_cell() {
        let mut c = canvas();
        let advance = c.draw_glyph(0, 0, b'!', Rgb565::RED, Rgb565::BLACK, 1);
        assert_eq!(advance, 5);
        // '!' is a single column (index 2) with bits 0..=4 and 6 set.
        assert_eq!(c.sink().at(2, 0), Some(Rgb565::RED));
        assert_eq!(c.sink().at(2, 5), Some(Rgb565::BLACK));
        assert_eq!(c.sink().at(2, 6), Some(Rgb565::RED));
        assert_eq!(c.sink().at(0, 0), Some(Rgb565::BLACK));
        // Spacing column painted with the background.
        assert_eq!(c.sink().at(5, 7), Some(Rgb565::BLACK));
        assert_eq!(c.sink().at(6, 0), None);
    }

    #[test]
    fn glyph_transparent_leaves_background_untouched() {
        let mut c = canvas();
        c.draw_glyph(0, 0, b'!', Rgb565::RED, Rgb565::RED, 1);
        assert_eq!(c.sink().plotted().len(), 6);
        assert_eq!(c.sink().at(0, 0), None);
    }

    #[test]
    fn glyph_scale_expands_blocks() {
        let mut c = canvas();
        let advance = c.draw_glyph(10, 10, b'!', Rgb565::RED, Rgb565::BLACK, 3);
        assert_eq!(advance, 16);
        for dx in 0..3 {
            for dy in 0..3 {
                assert_eq!(c.sink().at(10 + 2 * 3 + dx, 10 + dy), Some(Rgb565::RED));
            }
        }
        assert_eq!(c.sink().at(10 + 5 * 3 + 2, 10 + 23), Some(Rgb565::BLACK));
    }

    #[test]
    fn clipped_glyph_draws_nothing_and_advances_one() {
        let mut c = canvas();
        assert_eq!(c.draw_glyph(240, 0, b'A', Rgb565::RED, Rgb565::BLACK, 2), 1);
        assert_eq!(c.draw_glyph(-12, 0, b'A', Rgb565::RED, Rgb565::BLACK, 2), 1);
        assert_eq!(c.draw_glyph(0, -16, b'A', Rgb565::RED, Rgb565::BLACK, 2), 1);
        assert!(c.sink().commits.is_empty());
    }

    #[test]
    fn string_starting_off_surface_advances_one_per_clipped_glyph() {
        let mut c = canvas();
        // Both cells end left of x = 0: 'A' at -20, 'B' at -19.
        assert_eq!(c.draw_string("AB", -20, 0, 2, Rgb565::RED), -18);
        assert!(c.sink().commits.is_empty());

        // 'A' at -12 is clipped (1); 'B' at -11 reaches x = 0 (10).
        assert_eq!(c.draw_string("AB", -12, 0, 2, Rgb565::RED), -1);
        assert!(c.sink().touched(0, 0, 1, 16));
    }

    #[test]
    fn far_off_surface_lines_are_clipped_not_faulted() {
        let mut c = canvas();
        c.draw_line(5, i32::MIN, 5, i32::MAX, Rgb565::RED);
        assert_eq!(c.sink().regions, 1);
        assert_eq!(c.sink().commits.len(), 320);

        c.sink_mut().clear_log();
        c.draw_line(i32::MIN, 7, i32::MAX, 7, Rgb565::RED);
        assert_eq!(c.sink().commits.len(), 240);

        c.sink_mut().clear_log();
        c.draw_line(-2_000_000_000, 0, 2_000_000_000, 1, Rgb565::RED);
        // The minor step lands right after x = 0.
        assert_eq!(c.sink().commits.len(), 240);
        assert_eq!(c.sink().at(0, 0), Some(Rgb565::RED));
        assert!(c.sink().commits.iter().all(|&(x, y, _)| (x == 0) == (y == 0)));

        c.sink_mut().clear_log();
        c.draw_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, Rgb565::RED);
        c.draw_line(i32::MAX, i32::MIN, i32::MIN, i32::MAX, Rgb565::RED);
        c.draw_line(i32::MIN, 3, i32::MAX, -3, Rgb565::RED);
        assert!(c.sink().commits.len() <= 3 * 320);
    }

    #[test]
    fn clipped_diagonal_matches_unclipped_walk() {
        let mut full = Canvas::new(RecordingSink::new(500, 400), 500, 400);
        full.draw_line(0, 10, 400, 130, Rgb565::WHITE);
        let mut clipped = canvas();
        clipped.draw_line(-100, 10, 300, 130, Rgb565::WHITE);
        let expected: std::vec::Vec<(i32, i32)> = full
            .sink()
            .plotted()
            .into_iter()
            .map(|(x, y)| (x - 100, y))
            .filter(|&(x, _)| (0..240).contains(&x))
            .collect();
        assert_eq!(clipped.sink().plotted(), expected);
    }

    #[test]
    fn huge_rect_work_is_bounded_by_surface() {
        let mut c = canvas();
        c.fill_rect(i32::MIN, 0, i32::MAX, 2, Rgb565::BLUE);
        assert!(c.sink().commits.is_empty());
        c.fill_rect(-1_000_000, 0, 1_000_010, 1, Rgb565::BLUE);
        assert_eq!(c.sink().commits.len(), 10);
    }

    #[test]
    fn string_advances_per_glyph() {
        let mut c = canvas();
        let end = c.draw_string("12:34", 40, 70, 6, Rgb565::CYAN);
        assert_eq!(end, 40 + 5 * glyph_advance(6));
        assert!(c.sink().touched(40, 70, 32, 48));
    }

    #[test]
    fn triangle_outline_touches_vertices() {
        let mut c = canvas();
        c.draw_triangle(
            Point::new(120, 10),
            Point::new(239, 190),
            Point::new(10, 190),
            Rgb565::RED,
        );
        assert_eq!(c.sink().at(120, 10), Some(Rgb565::RED));
        assert_eq!(c.sink().at(239, 190), Some(Rgb565::RED));
        assert_eq!(c.sink().at(10, 190), Some(Rgb565::RED));
        assert_eq!(c.sink().at(120, 100), None);
    }
}
