/*!
# Drawing Surface

The capability glyphs draw through. A surface keeps a stateful integer
translation and an alpha stack; every primitive is interpreted relative to
the current translation. Text measurement is split out as [`TextMetrics`]
so layout can size text without a surface at hand.

[`RecordingSurface`] keeps every primitive in absolute coordinates and is
what the tests draw into.
*/

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREY: Color = Color::rgb(128, 128, 128);
    pub const FEATURE: Color = Color::rgb(42, 111, 239);
    pub const DENSITY: Color = Color::rgb(229, 57, 53);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Font {
    pub size: i32,
    pub bold: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

pub trait TextMetrics {
    fn text_width(&self, text: &str, font: &Font) -> i32;
    fn text_height(&self, font: &Font) -> i32;
}

/// Text `y` is the top of the text box, not the baseline.
pub trait Surface: TextMetrics {
    fn translate(&mut self, dx: i32, dy: i32);
    fn translation(&self) -> (i32, i32);
    fn push_alpha(&mut self, alpha: f32);
    fn pop_alpha(&mut self);
    fn set_color(&mut self, color: Color);

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32);
    fn draw_polygon(&mut self, points: &[Point]);
    fn fill_polygon(&mut self, points: &[Point]);
    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &Font);
}

/// Monospace approximation: every character is `3/5` of the font size
/// wide, lines are `6/5` of it tall.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetrics;

impl TextMetrics for FixedMetrics {
    fn text_width(&self, text: &str, font: &Font) -> i32 {
        let char_width = (font.size * 3 / 5).max(1) + i32::from(font.bold);
        text.chars().count() as i32 * char_width
    }

    fn text_height(&self, font: &Font) -> i32 {
        font.size + font.size / 5
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        filled: bool,
        color: Color,
        alpha: f32,
    },
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        alpha: f32,
    },
    Polygon {
        points: Vec<Point>,
        filled: bool,
        color: Color,
        alpha: f32,
    },
    Oval {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        filled: bool,
        color: Color,
        alpha: f32,
    },
    Text {
        text: String,
        x: i32,
        y: i32,
        bold: bool,
        color: Color,
        alpha: f32,
    },
}

/// Surface that records primitives in absolute coordinates.
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
    translation: (i32, i32),
    alpha: Vec<f32>,
    color: Color,
    metrics: Box<dyn TextMetrics>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(FixedMetrics)
    }
}

impl RecordingSurface {
    pub fn new(metrics: impl TextMetrics + 'static) -> Self {
        Self {
            ops: Vec::new(),
            translation: (0, 0),
            alpha: Vec::new(),
            color: Color::BLACK,
            metrics: Box::new(metrics),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Every text drawn, with its absolute position.
    pub fn texts(&self) -> Vec<(&str, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, x, y, .. } => Some((text.as_str(), *x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Filled rectangles as `(x, y, width, height)`.
    pub fn filled_rects(&self) -> Vec<(i32, i32, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Rect {
                    x,
                    y,
                    width,
                    height,
                    filled: true,
                    ..
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(i32, i32, i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { x1, y1, x2, y2, .. } => Some((*x1, *y1, *x2, *y2)),
                _ => None,
            })
            .collect()
    }

    fn current_alpha(&self) -> f32 {
        self.alpha.iter().product()
    }

    fn absolute(&self, x: i32, y: i32) -> (i32, i32) {
        (x + self.translation.0, y + self.translation.1)
    }

    fn rect_op(&self, x: i32, y: i32, width: i32, height: i32, filled: bool) -> DrawOp {
        let (x, y) = self.absolute(x, y);
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            filled,
            color: self.color,
            alpha: self.current_alpha(),
        }
    }

    fn oval_op(&self, x: i32, y: i32, width: i32, height: i32, filled: bool) -> DrawOp {
        let (x, y) = self.absolute(x, y);
        DrawOp::Oval {
            x,
            y,
            width,
            height,
            filled,
            color: self.color,
            alpha: self.current_alpha(),
        }
    }

    fn polygon_op(&self, points: &[Point], filled: bool) -> DrawOp {
        DrawOp::Polygon {
            points: points
                .iter()
                .map(|p| {
                    let (x, y) = self.absolute(p.x, p.y);
                    Point::new(x, y)
                })
                .collect(),
            filled,
            color: self.color,
            alpha: self.current_alpha(),
        }
    }
}

impl TextMetrics for RecordingSurface {
    fn text_width(&self, text: &str, font: &Font) -> i32 {
        self.metrics.text_width(text, font)
    }

    fn text_height(&self, font: &Font) -> i32 {
        self.metrics.text_height(font)
    }
}

impl Surface for RecordingSurface {
    fn translate(&mut self, dx: i32, dy: i32) {
        self.translation.0 += dx;
        self.translation.1 += dy;
    }

    fn translation(&self) -> (i32, i32) {
        self.translation
    }

    fn push_alpha(&mut self, alpha: f32) {
        self.alpha.push(alpha);
    }

    fn pop_alpha(&mut self) {
        self.alpha.pop();
    }

    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let op = self.rect_op(x, y, width, height, false);
        self.ops.push(op);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let op = self.rect_op(x, y, width, height, true);
        self.ops.push(op);
    }

    fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        let (x1, y1) = self.absolute(x1, y1);
        let (x2, y2) = self.absolute(x2, y2);
        self.ops.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color: self.color,
            alpha: self.current_alpha(),
        });
    }

    fn draw_polygon(&mut self, points: &[Point]) {
        let op = self.polygon_op(points, false);
        self.ops.push(op);
    }

    fn fill_polygon(&mut self, points: &[Point]) {
        let op = self.polygon_op(points, true);
        self.ops.push(op);
    }

    fn draw_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let op = self.oval_op(x, y, width, height, false);
        self.ops.push(op);
    }

    fn fill_oval(&mut self, x: i32, y: i32, width: i32, height: i32) {
        let op = self.oval_op(x, y, width, height, true);
        self.ops.push(op);
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font: &Font) {
        let (x, y) = self.absolute(x, y);
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            bold: font.bold,
            color: self.color,
            alpha: self.current_alpha(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_metrics() {
        let font = Font { size: 10, bold: false };
        assert_eq!(FixedMetrics.text_width("abcd", &font), 24);
        assert_eq!(FixedMetrics.text_height(&font), 12);
        let bold = Font { size: 10, bold: true };
        assert_eq!(FixedMetrics.text_width("abcd", &bold), 28);
    }

    #[test]
    fn test_recording_applies_translation() {
        let mut surface = RecordingSurface::default();
        surface.translate(10, 5);
        surface.fill_rect(1, 2, 3, 4);
        surface.translate(-10, -5);
        surface.draw_line(0, 0, 5, 5);

        assert_eq!(surface.filled_rects(), vec![(11, 7, 3, 4)]);
        assert_eq!(surface.lines(), vec![(0, 0, 5, 5)]);
        assert_eq!(surface.translation(), (0, 0));
    }

    #[test]
    fn test_alpha_stack_multiplies() {
        let mut surface = RecordingSurface::default();
        surface.push_alpha(0.5);
        surface.push_alpha(0.5);
        surface.fill_oval(0, 0, 2, 2);
        surface.pop_alpha();
        surface.pop_alpha();
        surface.fill_oval(0, 0, 2, 2);

        let alphas: Vec<f32> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Oval { alpha, .. } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas, vec![0.25, 1.0]);
    }
}
