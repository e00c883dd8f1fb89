//! Leaf glyphs
//!
//! Fixed-size primitives. Apart from [`BorderGlyph`] none of them has
//! children, so there is nothing to build.

use crate::canvas::Canvas;
use crate::glyph::{Alignable, Glyph, GlyphAttrs};
use crate::surface::{Color, Font, Surface};
use seqview_core::Alignment;

/// A single line of text, measured when created.
#[derive(Debug, Clone)]
pub struct TextGlyph {
    attrs: GlyphAttrs,
    text: String,
    font: Font,
    width: i32,
    height: i32,
    color: Color,
    alignment: Alignment,
}

impl TextGlyph {
    pub fn new(canvas: &Canvas, text: impl Into<String>, bold: bool) -> Self {
        let text = text.into();
        let font = canvas.font(bold);
        let width = canvas.metrics().text_width(&text, &font);
        let height = canvas.metrics().text_height(&font);
        Self {
            attrs: GlyphAttrs::default(),
            text,
            font,
            width,
            height,
            color: Color::BLACK,
            alignment: Alignment::Left,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Alignable for TextGlyph {
    fn alignment(&self) -> Alignment {
        self.alignment
    }

    fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = alignment;
    }
}

impl Glyph for TextGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn content_width(&self) -> i32 {
        self.width
    }

    fn content_height(&self) -> i32 {
        self.height
    }

    fn as_alignable_mut(&mut self) -> Option<&mut dyn Alignable> {
        Some(self)
    }

    /// Right-aligned text ends at the origin.
    fn paint(&self, surface: &mut dyn Surface) {
        let x = match self.alignment {
            Alignment::Left => 0,
            Alignment::Right => -self.width,
        };
        surface.set_color(self.color);
        surface.draw_text(&self.text, x, 0, &self.font);
    }
}

#[derive(Debug, Clone)]
pub struct RectGlyph {
    attrs: GlyphAttrs,
    width: i32,
    height: i32,
    color: Color,
    filled: bool,
}

impl RectGlyph {
    pub fn filled(width: i32, height: i32, color: Color) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            width,
            height,
            color,
            filled: true,
        }
    }

    pub fn outline(width: i32, height: i32, color: Color) -> Self {
        Self {
            filled: false,
            ..Self::filled(width, height, color)
        }
    }
}

impl Glyph for RectGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn content_width(&self) -> i32 {
        self.width
    }

    fn content_height(&self) -> i32 {
        self.height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        surface.set_color(self.color);
        if self.filled {
            surface.fill_rect(0, 0, self.width, self.height);
        } else {
            surface.draw_rect(0, 0, self.width, self.height);
        }
    }
}

/// Horizontal line through the vertical middle of its box.
#[derive(Debug, Clone)]
pub struct LineGlyph {
    attrs: GlyphAttrs,
    width: i32,
    height: i32,
    color: Color,
}

impl LineGlyph {
    pub fn new(width: i32, height: i32, color: Color) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            width,
            height,
            color,
        }
    }
}

impl Glyph for LineGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn content_width(&self) -> i32 {
        self.width
    }

    fn content_height(&self) -> i32 {
        self.height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let mid = self.height / 2;
        surface.set_color(self.color);
        surface.draw_line(0, mid, self.width, mid);
    }
}

#[derive(Debug, Clone)]
pub struct SpacerGlyph {
    attrs: GlyphAttrs,
    width: i32,
    height: i32,
}

impl SpacerGlyph {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            width,
            height,
        }
    }
}

impl Glyph for SpacerGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn content_width(&self) -> i32 {
        self.width
    }

    fn content_height(&self) -> i32 {
        self.height
    }

    fn paint(&self, _surface: &mut dyn Surface) {}
}

/// Outline drawn around a single child, inset by `padding`.
pub struct BorderGlyph {
    attrs: GlyphAttrs,
    child: Box<dyn Glyph>,
    padding: i32,
    color: Color,
}

impl BorderGlyph {
    pub fn new(child: Box<dyn Glyph>, padding: i32, color: Color) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            child,
            padding,
            color,
        }
    }

    pub fn child(&self) -> &dyn Glyph {
        self.child.as_ref()
    }
}

impl Glyph for BorderGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.child.build();
    }

    fn is_built(&self) -> bool {
        self.child.is_built()
    }

    fn content_width(&self) -> i32 {
        self.child.width() + 2 * self.padding
    }

    fn content_height(&self) -> i32 {
        self.child.height() + 2 * self.padding
    }

    fn paint(&self, surface: &mut dyn Surface) {
        surface.set_color(self.color);
        surface.draw_rect(0, 0, self.content_width(), self.content_height());
        surface.translate(self.padding, self.padding);
        self.child.draw(surface);
        surface.translate(-self.padding, -self.padding);
    }
}

/// Chevron joining two segments: rises over the first half of the gap and
/// falls over the second.
#[derive(Debug, Clone)]
pub struct IntronGlyph {
    attrs: GlyphAttrs,
    first_half: i32,
    second_half: i32,
    height: i32,
    color: Color,
}

impl IntronGlyph {
    pub fn new(first_half: i32, second_half: i32, height: i32, color: Color) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            first_half,
            second_half,
            height,
            color,
        }
    }
}

impl Glyph for IntronGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn content_width(&self) -> i32 {
        self.first_half + self.second_half
    }

    fn content_height(&self) -> i32 {
        self.height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        if self.content_width() == 0 {
            return;
        }
        let mid = self.height / 2;
        let apex = self.first_half;
        surface.set_color(self.color);
        surface.draw_line(0, mid, apex, 0);
        surface.draw_line(apex, 0, apex + self.second_half, mid);
    }
}

/// One histogram bar, bottom-aligned in a box of the maximum bar height.
#[derive(Debug, Clone)]
pub struct BarGlyph {
    attrs: GlyphAttrs,
    width: i32,
    bar_height: i32,
    max_height: i32,
    color: Color,
}

impl BarGlyph {
    pub fn new(width: i32, bar_height: i32, max_height: i32, color: Color) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            width,
            bar_height: bar_height.min(max_height),
            max_height,
            color,
        }
    }

    pub fn bar_height(&self) -> i32 {
        self.bar_height
    }
}

impl Glyph for BarGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn content_width(&self) -> i32 {
        self.width
    }

    fn content_height(&self) -> i32 {
        self.max_height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        if self.bar_height <= 0 || self.width <= 0 {
            return;
        }
        surface.set_color(self.color);
        surface.fill_rect(0, self.max_height - self.bar_height, self.width, self.bar_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use seqview_core::LayoutConfig;

    fn canvas() -> crate::canvas::CanvasRef {
        Canvas::for_sequence(1000, 50, LayoutConfig::default()).unwrap()
    }

    #[test]
    fn test_text_alignment_moves_text_left_of_origin() {
        let canvas = canvas();
        let mut text = TextGlyph::new(&canvas, "tRNA", false);
        assert_eq!(text.width(), 24);

        let mut surface = RecordingSurface::default();
        text.draw(&mut surface);
        text.set_alignment(Alignment::Right);
        text.draw(&mut surface);
        assert_eq!(surface.texts(), vec![("tRNA", 0, 0), ("tRNA", -24, 0)]);
        assert_eq!(text.width(), 24);
    }

    #[test]
    fn test_border_pads_child() {
        let border = BorderGlyph::new(RectGlyph::filled(10, 6, Color::BLACK).boxed(), 2, Color::GREY);
        assert_eq!((border.width(), border.height()), (14, 10));

        let mut surface = RecordingSurface::default();
        border.draw(&mut surface);
        assert_eq!(surface.filled_rects(), vec![(2, 2, 10, 6)]);
    }

    #[test]
    fn test_intron_chevron() {
        let intron = IntronGlyph::new(3, 4, 8, Color::BLACK);
        let mut surface = RecordingSurface::default();
        intron.draw(&mut surface);
        assert_eq!(surface.lines(), vec![(0, 4, 3, 0), (3, 0, 7, 4)]);

        let mut empty = RecordingSurface::default();
        IntronGlyph::new(0, 0, 8, Color::BLACK).draw(&mut empty);
        assert!(empty.ops().is_empty());
    }

    #[test]
    fn test_bar_is_bottom_aligned() {
        let bar = BarGlyph::new(5, 4, 16, Color::DENSITY);
        assert_eq!(bar.height(), 16);
        let mut surface = RecordingSurface::default();
        bar.draw(&mut surface);
        assert_eq!(surface.filled_rects(), vec![(0, 12, 5, 4)]);
    }
}
