//! Shared drawing context
//!
//! One canvas per diagram. Every glyph keeps a handle to it and reads the
//! coordinate space, style constants and text metrics through it. Windows
//! move between draws, so the space sits behind a `RefCell`.

use crate::surface::{FixedMetrics, Font, TextMetrics};
use seqview_core::{CoordinateSpace, GenomicPos, LayoutConfig, Result, Window, WindowKind};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

pub type CanvasRef = Rc<Canvas>;

pub struct Canvas {
    space: RefCell<CoordinateSpace>,
    config: LayoutConfig,
    metrics: Box<dyn TextMetrics>,
}

impl Canvas {
    pub fn new(
        space: CoordinateSpace,
        config: LayoutConfig,
        metrics: impl TextMetrics + 'static,
    ) -> CanvasRef {
        Rc::new(Self {
            space: RefCell::new(space),
            config,
            metrics: Box::new(metrics),
        })
    }

    /// Canvas over `sequence_length` bases with the given configuration and
    /// monospace text metrics.
    pub fn for_sequence(
        sequence_length: GenomicPos,
        columns: i32,
        config: LayoutConfig,
    ) -> Result<CanvasRef> {
        let space = CoordinateSpace::new(sequence_length, columns, &config.canvas)?;
        Ok(Self::new(space, config, FixedMetrics))
    }

    pub fn space(&self) -> Ref<'_, CoordinateSpace> {
        self.space.borrow()
    }

    /// Move a zoomable window. Glyphs already built keep their layout;
    /// rebuild the tree to pick up the change.
    pub fn set_window(&self, kind: WindowKind, window: Window) -> Result<()> {
        self.space.borrow_mut().set_window(kind, window)
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    pub fn font(&self, bold: bool) -> Font {
        Font {
            size: self.config.text.font_size,
            bold,
        }
    }

    pub fn text_width(&self, text: &str, bold: bool) -> i32 {
        self.metrics.text_width(text, &self.font(bold))
    }

    pub fn text_height(&self, bold: bool) -> i32 {
        self.metrics.text_height(&self.font(bold))
    }
}
