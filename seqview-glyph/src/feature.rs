//! Feature glyphs
//!
//! A feature is drawn as its optional label over a row of segment boxes
//! joined by intron chevrons. Segments that jump backwards along the
//! sequence are packed separately inside a bordered box under that row.
//! [`FeatureTrackGlyph`] packs whole features into rows.

use crate::canvas::{Canvas, CanvasRef};
use crate::composite::CompositeGlyph;
use crate::glyph::{Glyph, GlyphAttrs, OnceBuilt};
use crate::leaf::{BorderGlyph, IntronGlyph, TextGlyph};
use crate::packed::RowPackGlyph;
use crate::surface::{Color, Point, Surface};
use seqview_core::{build_segments, Feature, PackParams, Segment, SegmentLayout, WindowKind};

/// One merged run of feature parts: a box with optional direction arrows
/// and stubs pointing at parts that live on another sequence.
#[derive(Debug, Clone)]
pub struct SegmentGlyph {
    attrs: GlyphAttrs,
    segment: Segment,
    width: i32,
    height: i32,
    arrow_width: i32,
    stub_width: i32,
    color: Color,
}

impl SegmentGlyph {
    pub fn new(canvas: &Canvas, segment: Segment, kind: WindowKind) -> Self {
        let style = &canvas.config().feature;
        let width = canvas
            .space()
            .range_width(segment.begin, segment.end, kind, true);
        Self {
            attrs: GlyphAttrs::default(),
            segment,
            width,
            height: style.segment_height,
            arrow_width: style.arrow_width,
            stub_width: style.remote_stub_width,
            color: Color::FEATURE,
        }
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Arrows actually drawn as `(left, right)`. Both are dropped when they
    /// would not fit inside the box together.
    pub fn arrows(&self) -> (bool, bool) {
        let left = self.segment.show_left_arrow;
        let right = self.segment.show_right_arrow;
        let needed = self.arrow_width * (i32::from(left) + i32::from(right));
        if needed > self.width {
            (false, false)
        } else {
            (left, right)
        }
    }
}

impl Glyph for SegmentGlyph {
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
        let (left, right) = self.arrows();
        let (w, h, aw) = (self.width, self.height, self.arrow_width);
        let mid = h / 2;
        let body_begin = if left { aw } else { 0 };
        let body_end = if right { w - aw } else { w };

        surface.set_color(self.color);
        if body_end > body_begin {
            surface.fill_rect(body_begin, 0, body_end - body_begin, h);
        }
        if left {
            surface.fill_polygon(&[Point::new(0, mid), Point::new(aw, 0), Point::new(aw, h)]);
        }
        if right {
            surface.fill_polygon(&[Point::new(w, mid), Point::new(w - aw, 0), Point::new(w - aw, h)]);
        }

        surface.set_color(Color::GREY);
        if self.segment.prev_remote {
            dotted(surface, -self.stub_width, self.stub_width, mid);
        }
        if self.segment.next_remote {
            dotted(surface, w, self.stub_width, mid);
        }
    }
}

/// One-pixel dashes every other pixel from `x` over `length` pixels.
fn dotted(surface: &mut dyn Surface, x: i32, length: i32, y: i32) {
    for dash in (0..length).step_by(2) {
        surface.draw_line(x + dash, y, x + dash + 1, y);
    }
}

/// A whole feature. Its origin is the leftmost pixel it draws, see
/// [`FeatureGlyph::anchor`].
pub struct FeatureGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    feature: Feature,
    kind: WindowKind,
    layout: OnceBuilt<SegmentLayout>,
    body: OnceBuilt<CompositeGlyph>,
}

impl FeatureGlyph {
    pub fn new(canvas: CanvasRef, feature: Feature, kind: WindowKind) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            feature,
            kind,
            layout: OnceBuilt::new(),
            body: OnceBuilt::new(),
        }
    }

    pub fn feature(&self) -> &Feature {
        &self.feature
    }

    pub fn segments(&self) -> &SegmentLayout {
        self.layout.get_or_build(|| {
            build_segments(
                &self.feature.locations,
                &self.canvas.space(),
                self.kind,
                self.canvas.config().feature.min_intron_width,
            )
        })
    }

    pub fn non_linear_count(&self) -> usize {
        self.segments().non_linear_count
    }

    /// Panel x of the first placeable base; `None` when every part is
    /// remote.
    pub fn first_base_x(&self) -> Option<i32> {
        let first = self.segments().linear().next()?;
        Some(self.canvas.space().to_x(first.begin, self.kind))
    }

    /// Panel x of the left edge of the box around rearranged parts.
    fn box_left(&self) -> Option<i32> {
        let space = self.canvas.space();
        let left = self
            .segments()
            .non_linear()
            .map(|s| space.to_x(s.begin, self.kind))
            .min()?;
        Some(left - self.canvas.config().feature.border_padding)
    }

    /// Panel x of the leftmost pixel drawn: the first placeable base, or the
    /// rearranged box when it reaches further left.
    pub fn anchor(&self) -> Option<i32> {
        let first = self.first_base_x()?;
        Some(self.box_left().map_or(first, |left| left.min(first)))
    }

    fn body(&self) -> &CompositeGlyph {
        self.body.get_or_build(|| self.assemble())
    }

    fn assemble(&self) -> CompositeGlyph {
        let mut column = CompositeGlyph::column();
        let layout = self.segments();
        let (Some(first), Some(anchor)) = (self.first_base_x(), self.anchor()) else {
            return column;
        };
        let canvas = &self.canvas;
        let style = &canvas.config().feature;
        let shift = first - anchor;

        if let Some(label) = self.feature.label.as_deref().filter(|l| !l.is_empty()) {
            column.push(TextGlyph::new(canvas, label, false).with_translation(shift, 0));
        }

        let mut row = CompositeGlyph::row();
        for (index, segment) in layout.linear().enumerate() {
            if index > 0 {
                row.push(IntronGlyph::new(
                    segment.intron.first_half,
                    segment.intron.second_half,
                    style.segment_height,
                    Color::GREY,
                ));
            }
            row.push(SegmentGlyph::new(canvas, *segment, self.kind));
        }
        column.push(row.with_translation(shift, 0));

        if let Some(box_left) = self.box_left() {
            let padding = style.border_padding;
            let params = PackParams::from_config(&canvas.config().rows)
                .sort_by_anchor(false)
                .scan_from_last_row(true);
            let mut rearranged = RowPackGlyph::new(canvas.clone(), params);
            let space = canvas.space();
            for segment in layout.non_linear() {
                let left = space.to_x(segment.begin, self.kind);
                rearranged.add(
                    SegmentGlyph::new(canvas, *segment, self.kind).boxed(),
                    left - (box_left + padding),
                    false,
                );
            }
            let border = BorderGlyph::new(rearranged.boxed(), padding, Color::GREY)
                .with_translation(box_left - anchor, 0);
            column.push(border);
        }

        log::debug!(
            "Feature {:?}: {} segments at x={}",
            self.feature.label,
            layout.segments.len(),
            anchor
        );
        column
    }
}

impl Glyph for FeatureGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.body().build();
    }

    fn is_built(&self) -> bool {
        self.body.get().map_or(false, |b| b.is_built())
    }

    /// Right edge of the furthest child. The label, the linear row and the
    /// rearranged box are each shifted right of the origin.
    fn content_width(&self) -> i32 {
        self.body()
            .children()
            .iter()
            .map(|child| child.attrs().translation().0 + child.width())
            .max()
            .unwrap_or(0)
    }

    fn content_height(&self) -> i32 {
        self.body().height()
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.body().draw(surface);
    }
}

/// Features of one window packed into rows by their first base.
pub struct FeatureTrackGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    features: Vec<Feature>,
    kind: WindowKind,
    rows: OnceBuilt<RowPackGlyph>,
}

impl FeatureTrackGlyph {
    pub fn new(canvas: CanvasRef, features: Vec<Feature>, kind: WindowKind) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            features,
            kind,
            rows: OnceBuilt::new(),
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.rows().hidden_count()
    }

    pub fn rows_used(&self) -> usize {
        self.rows().rows_used()
    }

    pub fn visible_count(&self) -> usize {
        self.rows().visible_count()
    }

    fn rows(&self) -> &RowPackGlyph {
        self.rows.get_or_build(|| {
            let mut packer = RowPackGlyph::from_canvas(self.canvas.clone());
            let window = self.canvas.space().window(self.kind);
            let mut skipped = 0;
            for feature in &self.features {
                let in_window = feature
                    .extent()
                    .map_or(false, |(begin, end)| window.overlaps(begin, end));
                if !in_window {
                    skipped += 1;
                    continue;
                }
                let glyph = FeatureGlyph::new(self.canvas.clone(), feature.clone(), self.kind);
                match glyph.anchor() {
                    Some(anchor) => packer.add(glyph.boxed(), anchor, false),
                    None => skipped += 1,
                }
            }
            if skipped > 0 {
                log::debug!("{} features outside the {:?} window", skipped, self.kind);
            }
            packer
        })
    }
}

impl Glyph for FeatureTrackGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.rows().build();
    }

    fn is_built(&self) -> bool {
        self.rows.get().map_or(false, |r| r.is_built())
    }

    fn content_width(&self) -> i32 {
        self.rows().width()
    }

    fn content_height(&self) -> i32 {
        self.rows().height()
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.rows().draw(surface);
    }
}
