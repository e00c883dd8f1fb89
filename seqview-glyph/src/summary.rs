//! Overview density strip

use crate::canvas::CanvasRef;
use crate::composite::CompositeGlyph;
use crate::glyph::{Glyph, GlyphAttrs, OnceBuilt};
use crate::leaf::{BarGlyph, SpacerGlyph};
use crate::surface::{Color, Surface};
use seqview_core::{DensityHistogram, Feature};

/// Histogram of feature coverage over the whole sequence, drawn as a row
/// of bars in overview pixels.
pub struct FeatureSummaryGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    features: Vec<Feature>,
    histogram: OnceBuilt<DensityHistogram>,
    strip: OnceBuilt<CompositeGlyph>,
}

impl FeatureSummaryGlyph {
    pub fn new(canvas: CanvasRef, features: Vec<Feature>) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            features,
            histogram: OnceBuilt::new(),
            strip: OnceBuilt::new(),
        }
    }

    pub fn histogram(&self) -> &DensityHistogram {
        self.histogram.get_or_build(|| {
            let length = self.canvas.space().sequence_length();
            let mut histogram = DensityHistogram::new(length, self.canvas.config().summary.bins);
            histogram.add_features(self.features.iter().map(|f| f.locations.as_slice()));
            histogram
        })
    }

    fn strip(&self) -> &CompositeGlyph {
        self.strip.get_or_build(|| {
            let style = &self.canvas.config().summary;
            let histogram = self.histogram();
            let space = self.canvas.space();
            let mut row = CompositeGlyph::row();
            for run in histogram.runs(style) {
                let (begin, end) = histogram.run_span(&run);
                let width = space.overview_x(end) - space.overview_x(begin);
                if run.height > 0 {
                    row.push(BarGlyph::new(width, run.height, style.max_height, Color::DENSITY));
                } else {
                    row.push(SpacerGlyph::new(width, style.max_height));
                }
            }
            row
        })
    }
}

impl Glyph for FeatureSummaryGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.strip().build();
    }

    fn is_built(&self) -> bool {
        self.strip.get().map_or(false, |s| s.is_built())
    }

    fn content_width(&self) -> i32 {
        self.strip().width()
    }

    fn content_height(&self) -> i32 {
        self.strip().height()
    }

    fn paint(&self, surface: &mut dyn Surface) {
        self.strip().draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::surface::RecordingSurface;
    use seqview_core::{LayoutConfig, Strand, SubLocation};

    fn canvas(bins: usize) -> CanvasRef {
        let mut config = LayoutConfig::default();
        config.summary.bins = bins;
        Canvas::for_sequence(1000, 50, config).unwrap()
    }

    #[test]
    fn test_strip_spans_panel() {
        let canvas = canvas(10);
        let features = vec![Feature::new(vec![SubLocation::new(150, 250, Strand::Forward)])];
        let summary = FeatureSummaryGlyph::new(canvas, features);

        assert_eq!(&summary.histogram().counts()[1..3], &[1, 1]);
        assert_eq!(summary.width(), 500);
        assert_eq!(summary.height(), 16);

        let mut surface = RecordingSurface::default();
        summary.draw(&mut surface);
        assert_eq!(surface.filled_rects(), vec![(50, 14, 100, 2)]);
    }

    #[test]
    fn test_no_features_draws_nothing() {
        let summary = FeatureSummaryGlyph::new(canvas(270), Vec::new());
        let mut surface = RecordingSurface::default();
        summary.draw(&mut surface);
        assert!(surface.ops().is_empty());
        assert_eq!(summary.width(), 500);
    }
}
