//! Glyph trait and shared node state
//!
//! A glyph is a node in a single-owner tree. Its size is computed lazily on
//! the first size or draw request and memoized; after that the node is
//! immutable. Drawing wraps the node-specific paint routine in the node's
//! translation and alpha and restores the surface afterwards.

use crate::canvas::Canvas;
use crate::surface::{Color, Font, Surface};
use seqview_core::Alignment;
use std::cell::OnceCell;

/// Memoized build product of a glyph. The closure passed to
/// [`OnceBuilt::get_or_build`] runs at most once.
#[derive(Debug)]
pub struct OnceBuilt<T> {
    cell: OnceCell<T>,
}

impl<T> Default for OnceBuilt<T> {
    fn default() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }
}

impl<T> OnceBuilt<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_build<F: FnOnce() -> T>(&self, build: F) -> &T {
        self.cell.get_or_init(build)
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub fn is_built(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Left-margin caption of a glyph, measured when it is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: Font,
    pub width: i32,
    pub height: i32,
    /// Absolute x of the caption, right-aligned against the margin
    pub x: i32,
}

impl Label {
    fn draw(&self, surface: &mut dyn Surface) {
        let (tx, _) = surface.translation();
        surface.set_color(Color::BLACK);
        surface.draw_text(&self.text, self.x - tx, 0, &self.font);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphAttrs {
    translation: Option<(i32, i32)>,
    alpha: Option<f32>,
    label: Option<Label>,
}

impl GlyphAttrs {
    pub fn translation(&self) -> (i32, i32) {
        self.translation.unwrap_or((0, 0))
    }

    /// Offsets accumulate.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        let (x, y) = self.translation();
        self.translation = Some((x + dx, y + dy));
    }

    pub fn alpha(&self) -> Option<f32> {
        self.alpha
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = Some(alpha.clamp(0.0, 1.0));
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn set_label(&mut self, canvas: &Canvas, text: &str, bold: bool) {
        if text.is_empty() {
            self.label = None;
            return;
        }
        let font = canvas.font(bold);
        let width = canvas.metrics().text_width(text, &font);
        let height = canvas.metrics().text_height(&font);
        let right = canvas.space().left_margin() - canvas.config().feature.label_gap;
        self.label = Some(Label {
            text: text.to_string(),
            font,
            width,
            height,
            x: (right - width).max(0),
        });
    }

    pub fn label_height(&self) -> i32 {
        self.label.as_ref().map_or(0, |l| l.height)
    }
}

/// A glyph that can be drawn on either side of its anchor.
///
/// Only a packer given [`PackParams::max_right`](seqview_core::PackParams::max_right)
/// ever flips one. The built-in diagram adds no alignable children, so it is
/// available to callers assembling their own packed tracks.
pub trait Alignable {
    fn alignment(&self) -> Alignment;
    fn set_alignment(&mut self, alignment: Alignment);
}

pub trait Glyph {
    fn attrs(&self) -> &GlyphAttrs;
    fn attrs_mut(&mut self) -> &mut GlyphAttrs;

    /// Size of the node's own content, excluding its label. Implementations
    /// may assume [`Glyph::build`] already ran.
    fn content_width(&self) -> i32;
    fn content_height(&self) -> i32;

    /// Draw the content with the node's origin at the surface origin.
    fn paint(&self, surface: &mut dyn Surface);

    /// Populate lazily built state. Must be idempotent.
    fn build(&self) {}

    fn is_built(&self) -> bool {
        true
    }

    fn as_alignable_mut(&mut self) -> Option<&mut dyn Alignable> {
        None
    }

    fn width(&self) -> i32 {
        self.build();
        self.content_width()
    }

    /// The caption sits beside the content, so it only grows the height
    /// when it is taller.
    fn height(&self) -> i32 {
        self.build();
        self.content_height().max(self.attrs().label_height())
    }

    fn draw(&self, surface: &mut dyn Surface) {
        self.build();
        let attrs = self.attrs();
        let (dx, dy) = attrs.translation();
        surface.translate(dx, dy);
        if let Some(alpha) = attrs.alpha() {
            surface.push_alpha(alpha);
        }
        if let Some(label) = attrs.label() {
            label.draw(surface);
        }

        self.paint(surface);

        if attrs.alpha().is_some() {
            surface.pop_alpha();
        }
        surface.translate(-dx, -dy);
    }

    fn with_translation(mut self, dx: i32, dy: i32) -> Self
    where
        Self: Sized,
    {
        self.attrs_mut().translate(dx, dy);
        self
    }

    fn with_alpha(mut self, alpha: f32) -> Self
    where
        Self: Sized,
    {
        self.attrs_mut().set_alpha(alpha);
        self
    }

    fn with_label(mut self, canvas: &Canvas, text: &str, bold: bool) -> Self
    where
        Self: Sized,
    {
        self.attrs_mut().set_label(canvas, text, bold);
        self
    }

    fn boxed(self) -> Box<dyn Glyph>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::RectGlyph;
    use crate::surface::RecordingSurface;
    use seqview_core::LayoutConfig;

    #[test]
    fn test_once_built_runs_once() {
        let built = OnceBuilt::new();
        let mut calls = 0;
        assert_eq!(*built.get_or_build(|| { calls += 1; 7 }), 7);
        assert_eq!(*built.get_or_build(|| 8), 7);
        assert_eq!(calls, 1);
        assert!(built.is_built());
    }

    #[test]
    fn test_translation_accumulates() {
        let mut attrs = GlyphAttrs::default();
        attrs.translate(3, 4);
        attrs.translate(-1, 1);
        assert_eq!(attrs.translation(), (2, 5));
    }

    #[test]
    fn test_draw_restores_surface_state() {
        let rect = RectGlyph::filled(5, 5, Color::BLACK)
            .with_translation(10, 20)
            .with_alpha(0.5);
        let mut surface = RecordingSurface::default();
        surface.translate(1, 1);
        rect.draw(&mut surface);
        assert_eq!(surface.translation(), (1, 1));
        assert_eq!(surface.filled_rects(), vec![(11, 21, 5, 5)]);
    }

    #[test]
    fn test_label_aligns_to_left_margin() {
        let canvas = Canvas::for_sequence(1000, 50, LayoutConfig::default()).unwrap();
        let rect = RectGlyph::filled(5, 30, Color::BLACK)
            .with_translation(40, 7)
            .with_label(&canvas, "Genes", true);

        let mut surface = RecordingSurface::default();
        surface.translate(100, 0);
        rect.draw(&mut surface);

        // margin 100, gap 4, "Genes" in bold is 5 * 7 px
        assert_eq!(surface.texts(), vec![("Genes", 61, 7)]);
        assert_eq!(rect.height(), 30);
    }

    #[test]
    fn test_empty_label_is_dropped() {
        let canvas = Canvas::for_sequence(1000, 50, LayoutConfig::default()).unwrap();
        let rect = RectGlyph::filled(5, 5, Color::BLACK).with_label(&canvas, "", false);
        assert!(rect.attrs().label().is_none());
    }
}
