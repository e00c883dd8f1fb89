//! Rulers and scale bars

use crate::canvas::CanvasRef;
use crate::glyph::{Glyph, GlyphAttrs, OnceBuilt};
use crate::surface::{Color, Surface};
use seqview_core::scale::{format_bp, ruler_ticks, scale_bar, Ticks};
use seqview_core::{GenomicPos, WindowKind};

/// Minimum free pixels between two tick labels.
const LABEL_GAP: i32 = 4;

struct RulerLayout {
    ticks: Ticks,
    /// `(x, text)` of every tick label that fits without overlapping
    labels: Vec<(i32, String)>,
    width: i32,
    height: i32,
}

/// Baseline across the panel with a tick at every multiple of a nice step
/// and the position written under it.
pub struct RulerGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    kind: WindowKind,
    layout: OnceBuilt<RulerLayout>,
}

impl RulerGlyph {
    pub fn new(canvas: CanvasRef, kind: WindowKind) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            kind,
            layout: OnceBuilt::new(),
        }
    }

    pub fn step(&self) -> GenomicPos {
        self.layout().ticks.step
    }

    pub fn tick_positions(&self) -> Vec<GenomicPos> {
        self.layout().ticks.ticks.iter().map(|t| t.position).collect()
    }

    fn layout(&self) -> &RulerLayout {
        self.layout.get_or_build(|| {
            let style = &self.canvas.config().ruler;
            let space = self.canvas.space();
            let ticks = ruler_ticks(&space, self.kind, style.min_tick_spacing);
            let width = space.panel_width();

            let mut labels = Vec::with_capacity(ticks.ticks.len());
            let mut free_from = i32::MIN;
            for tick in &ticks.ticks {
                let text = tick.position.to_string();
                let text_width = self.canvas.text_width(&text, false);
                let x = (tick.x - text_width / 2).min(width - text_width).max(0);
                if x < free_from {
                    continue;
                }
                free_from = x + text_width + LABEL_GAP;
                labels.push((x, text));
            }

            RulerLayout {
                ticks,
                labels,
                width,
                height: style.tick_height + self.canvas.text_height(false),
            }
        })
    }
}

impl Glyph for RulerGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.layout();
    }

    fn is_built(&self) -> bool {
        self.layout.is_built()
    }

    fn content_width(&self) -> i32 {
        self.layout().width
    }

    fn content_height(&self) -> i32 {
        self.layout().height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let layout = self.layout();
        let tick_height = self.canvas.config().ruler.tick_height;
        let font = self.canvas.font(false);

        surface.set_color(Color::BLACK);
        surface.draw_line(0, 0, layout.width, 0);
        for tick in &layout.ticks.ticks {
            surface.draw_line(tick.x, 0, tick.x, tick_height);
        }
        for (x, text) in &layout.labels {
            surface.draw_text(text, *x, tick_height, &font);
        }
    }
}

struct ScaleBarLayout {
    pixels: i32,
    label: String,
    width: i32,
    height: i32,
}

/// Bar spanning a round number of bases with its length written after it.
pub struct ScaleBarGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    kind: WindowKind,
    layout: OnceBuilt<ScaleBarLayout>,
}

impl ScaleBarGlyph {
    pub fn new(canvas: CanvasRef, kind: WindowKind) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            kind,
            layout: OnceBuilt::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.layout().label
    }

    pub fn bar_width(&self) -> i32 {
        self.layout().pixels
    }

    fn layout(&self) -> &ScaleBarLayout {
        self.layout.get_or_build(|| {
            let style = &self.canvas.config().ruler;
            let (bases, pixels) =
                scale_bar(&self.canvas.space(), self.kind, style.scale_bar_fraction);
            let label = format_bp(bases as f64);
            let text_width = self.canvas.text_width(&label, false);
            ScaleBarLayout {
                pixels,
                width: pixels + LABEL_GAP + text_width,
                height: (2 * style.tick_height).max(self.canvas.text_height(false)),
                label,
            }
        })
    }
}

impl Glyph for ScaleBarGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.layout();
    }

    fn is_built(&self) -> bool {
        self.layout.is_built()
    }

    fn content_width(&self) -> i32 {
        self.layout().width
    }

    fn content_height(&self) -> i32 {
        self.layout().height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let layout = self.layout();
        let tick = self.canvas.config().ruler.tick_height;
        let mid = layout.height / 2;

        surface.set_color(Color::BLACK);
        surface.draw_line(0, mid, layout.pixels, mid);
        surface.draw_line(0, mid - tick, 0, mid + tick);
        surface.draw_line(layout.pixels, mid - tick, layout.pixels, mid + tick);
        surface.draw_text(&layout.label, layout.pixels + LABEL_GAP, 0, &self.canvas.font(false));
    }
}
