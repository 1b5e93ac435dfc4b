//! Screen geometry and paint routines.
//!
//! Coordinates are for the 240×320 portrait panel. Clearing paints black
//! over exactly what a screen drew, so a later screen starts from a clean
//! background without a full-surface wipe.

use core::fmt::Write;

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::Point;
use heapless::String;

use super::Region;
use crate::calendar::DateTime;
use crate::canvas::{Canvas, PixelSink};
use crate::sensors::SensorField;

/// `(x, y, w, h)` rectangle.
pub type Rect = (i32, i32, i32, i32);

// Clock face

pub const TIME_ORIGIN: Point = Point::new(40, 70);
pub const TIME_SCALE: u8 = 6;
pub const DATE_ORIGIN: Point = Point::new(10, 130);
pub const COMMA_ORIGIN: Point = Point::new(120, 130);
pub const YEAR_ORIGIN: Point = Point::new(150, 130);
pub const DATE_SCALE: u8 = 3;

pub const CLOCK_FACE_RECT: Rect = (25, 70, 200, 85);
pub const MONTH_RECT: Rect = (10, 130, 110, 25);
pub const DAY_RECT: Rect = (85, 130, 40, 25);
pub const HOUR_RECT: Rect = (40, 70, 160, 47);
pub const MINUTE_RECT: Rect = (130, 70, 70, 47);

// Sensor screen

pub const FRAME_COLUMNS: [i32; 3] = [5, 142, 235];
pub const FRAME_ROWS: [i32; 5] = [0, 50, 100, 150, 200];
pub const FRAME_LEFT: i32 = 5;
pub const FRAME_WIDTH: i32 = 231;
pub const FRAME_HEIGHT: i32 = 200;
pub const LABEL_X: i32 = 12;
pub const VALUE_X: i32 = 148;
/// Text baseline row of each sensor field, in [`SensorField::ALL`] order.
pub const ROW_Y: [i32; 4] = [20, 70, 120, 170];
pub const SENSOR_SCALE: u8 = 2;
/// Top edge of each value cell's clear rectangle.
pub const VALUE_CLEAR_Y: [i32; 4] = [15, 55, 105, 165];
pub const VALUE_CLEAR_X: i32 = 145;
pub const VALUE_CLEAR_W: i32 = 86;
pub const VALUE_CLEAR_H: i32 = 35;
/// Widest value that fits the clear rectangle at [`SENSOR_SCALE`].
pub const VALUE_MAX_CHARS: usize = 8;
const VALUE_OVERFLOW: &str = "########";
pub const SENSOR_VALUES_RECT: Rect = (148, 20, 235, 190);

// Warning screen

pub const WARNING_TRIANGLE: [Point; 3] = [Point::new(120, 10), Point::new(240, 190), Point::new(10, 190)];
pub const WARNING_TEXT_RECT: Rect = (75, 125, 115, 55);

pub const BACKGROUND: Rgb565 = Rgb565::BLACK;

fn fill<S: PixelSink>(canvas: &mut Canvas<S>, (x, y, w, h): Rect) {
    canvas.fill_rect(x, y, w, h, BACKGROUND);
}

/// Value cell clear rectangle for `field`.
pub fn value_rect(field: SensorField) -> Rect {
    (
        VALUE_CLEAR_X,
        VALUE_CLEAR_Y[field.index()],
        VALUE_CLEAR_W,
        VALUE_CLEAR_H,
    )
}

/// Blank `region`.
pub fn clear<S: PixelSink>(canvas: &mut Canvas<S>, region: Region) {
    match region {
        Region::None => {}
        Region::FullSurface => canvas.fill_screen(BACKGROUND),
        Region::ClockFace => fill(canvas, CLOCK_FACE_RECT),
        Region::ClockMonth => {
            fill(canvas, MONTH_RECT);
            fill(canvas, HOUR_RECT);
        }
        Region::ClockDay => {
            fill(canvas, DAY_RECT);
            fill(canvas, HOUR_RECT);
        }
        Region::ClockHour => fill(canvas, HOUR_RECT),
        Region::ClockMinute => fill(canvas, MINUTE_RECT),
        Region::SensorPanel => {
            sensor_frame(canvas, BACKGROUND, BACKGROUND);
            fill(canvas, SENSOR_VALUES_RECT);
        }
        Region::SensorValue(field) => fill(canvas, value_rect(field)),
        Region::WarningPanel => {
            warning_banner(canvas, BACKGROUND);
            fill(canvas, WARNING_TEXT_RECT);
        }
    }
}

/// "HH:MM"
pub fn time_text(now: &DateTime) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}", now.hour, now.minute);
    s
}

/// " Mmm dd " with the day right-aligned in three columns.
pub fn date_text(now: &DateTime) -> String<12> {
    let mut s = String::new();
    let _ = write!(s, " {}{:3} ", now.month_abbrev(), now.day);
    s
}

pub fn year_text(now: &DateTime) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{:04}", now.year);
    s
}

/// Paint the clock face. Callers clear the stale sub-region first.
pub fn paint_clock<S: PixelSink>(canvas: &mut Canvas<S>, now: &DateTime) {
    canvas.draw_string(&time_text(now), TIME_ORIGIN.x, TIME_ORIGIN.y, TIME_SCALE, Rgb565::CYAN);
    canvas.draw_string(&date_text(now), DATE_ORIGIN.x, DATE_ORIGIN.y, DATE_SCALE, Rgb565::GREEN);
    canvas.draw_string(",", COMMA_ORIGIN.x, COMMA_ORIGIN.y, DATE_SCALE, Rgb565::GREEN);
    canvas.draw_string(&year_text(now), YEAR_ORIGIN.x, YEAR_ORIGIN.y, DATE_SCALE, Rgb565::MAGENTA);
}

fn sensor_frame<S: PixelSink>(canvas: &mut Canvas<S>, lines: Rgb565, labels: Rgb565) {
    for x in FRAME_COLUMNS {
        canvas.draw_fast_vline(x, 0, FRAME_HEIGHT, lines);
    }
    for y in FRAME_ROWS {
        canvas.draw_fast_hline(FRAME_LEFT, y, FRAME_WIDTH, lines);
    }
    for field in SensorField::ALL {
        canvas.draw_string(field.label(), LABEL_X, ROW_Y[field.index()], SENSOR_SCALE, labels);
    }
}

/// Frame lines and labels. Idempotent; repainted every sensor pass.
pub fn paint_sensor_frame<S: PixelSink>(canvas: &mut Canvas<S>) {
    sensor_frame(canvas, Rgb565::WHITE, Rgb565::YELLOW);
}

/// Clear one value cell and paint `value` into it.
///
/// Values wider than [`VALUE_MAX_CHARS`] would run past the clear
/// rectangle, so they are shown as `########`.
pub fn paint_sensor_value<S: PixelSink>(canvas: &mut Canvas<S>, field: SensorField, value: i32) {
    clear(canvas, Region::SensorValue(field));
    let mut text: String<12> = String::new();
    let _ = write!(text, "{}", value);
    let shown = if text.len() > VALUE_MAX_CHARS { VALUE_OVERFLOW } else { text.as_str() };
    canvas.draw_string(shown, VALUE_X, ROW_Y[field.index()], SENSOR_SCALE, Rgb565::YELLOW);
}

fn warning_banner<S: PixelSink>(canvas: &mut Canvas<S>, color: Rgb565) {
    let [a, b, c] = WARNING_TRIANGLE;
    canvas.draw_triangle(a, b, c, color);
    canvas.draw_string("!", 110, 50, 4, color);
    canvas.draw_string("ALERT", 90, 90, 3, color);
}

pub fn paint_warning<S: PixelSink>(canvas: &mut Canvas<S>) {
    warning_banner(canvas, Rgb565::RED);
    canvas.draw_string("FEVER", 75, 130, 4, Rgb565::RED);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::testing::RecordingSink;

    fn canvas() -> Canvas<RecordingSink> {
        Canvas::with_panel_size(RecordingSink::panel())
    }

    #[test]
    fn clock_text_matches_classic_layout() {
        let now = DateTime::new(2024, 2, 9, 7, 5);
        assert_eq!(time_text(&now).as_str(), "07:05");
        assert_eq!(date_text(&now).as_str(), " Feb  9 ");
        assert_eq!(year_text(&now).as_str(), "2024");
    }

    #[test]
    fn minute_clear_leaves_hours_alone() {
        let mut c = canvas();
        clear(&mut c, Region::ClockMinute);
        assert!(c.sink().touched(130, 70, 70, 47));
        assert!(!c.sink().touched(40, 70, 90, 47));
        assert!(!c.sink().touched(0, 130, 240, 30));
    }

    #[test]
    fn month_clear_covers_date_and_time() {
        let mut c = canvas();
        clear(&mut c, Region::ClockMonth);
        assert!(c.sink().touched(10, 130, 110, 25));
        assert!(c.sink().touched(40, 70, 160, 47));
        assert!(!c.sink().touched(150, 130, 64, 24));
    }

    #[test]
    fn value_paint_stays_inside_its_row() {
        let mut c = canvas();
        paint_sensor_value(&mut c, SensorField::BloodOxygen, 98);
        assert!(c.sink().touched(148, 70, 20, 16));
        assert!(!c.sink().touched(0, 0, 240, 55));
        assert!(!c.sink().touched(0, 90, 240, 230));
    }

    #[test]
    fn widest_value_fits_its_clear_rectangle() {
        let end = VALUE_X + VALUE_MAX_CHARS as i32 * crate::canvas::glyph_advance(i32::from(SENSOR_SCALE));
        assert!(end <= VALUE_CLEAR_X + VALUE_CLEAR_W);
    }

    #[test]
    fn shrinking_value_leaves_no_stale_pixels() {
        let mut c = canvas();
        for wide in [123_456_789, i32::MIN] {
            paint_sensor_value(&mut c, SensorField::HeartRate, wide);
            paint_sensor_value(&mut c, SensorField::HeartRate, 5);
            assert!(!c.sink().touched(VALUE_CLEAR_X + VALUE_CLEAR_W, 0, 240, 320));
            let stale = (VALUE_X + 12..240)
                .flat_map(|x| (15..50).map(move |y| (x, y)))
                .any(|(x, y)| c.sink().at(x, y) == Some(Rgb565::YELLOW));
            assert!(!stale);
        }
    }

    #[test]
    fn overflow_marker_only_replaces_too_wide_values() {
        let row = ROW_Y[SensorField::StepCount.index()];
        for (value, shown) in [(-1_234_567, "-1234567"), (1_000_000_000, "########")] {
            let mut painted = canvas();
            paint_sensor_value(&mut painted, SensorField::StepCount, value);
            let mut expected = canvas();
            clear(&mut expected, Region::SensorValue(SensorField::StepCount));
            expected.draw_string(shown, VALUE_X, row, SENSOR_SCALE, Rgb565::YELLOW);
            assert_eq!(painted.sink().frame, expected.sink().frame);
        }
    }

    #[test]
    fn warning_clear_blackens_everything_painted() {
        let mut c = canvas();
        paint_warning(&mut c);
        clear(&mut c, Region::WarningPanel);
        let lit = c.sink().frame.iter().filter(|p| **p == Some(Rgb565::RED)).count();
        assert_eq!(lit, 0);
    }

    #[test]
    fn sensor_panel_clear_blackens_frame_and_values() {
        let mut c = canvas();
        paint_sensor_frame(&mut c);
        for field in SensorField::ALL {
            paint_sensor_value(&mut c, field, 12345);
        }
        clear(&mut c, Region::SensorPanel);
        let lit = c
            .sink()
            .frame
            .iter()
            .filter(|p| matches!(p, Some(color) if *color != BACKGROUND))
            .count();
        assert_eq!(lit, 0);
    }
}
