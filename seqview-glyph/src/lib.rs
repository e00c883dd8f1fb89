//! SeqView Glyph Library
//!
//! Drawable node tree for linear genome diagrams, built on the layouts of
//! `seqview-core`. Glyphs size themselves lazily, are immutable once built
//! and draw through the [`Surface`] capability.

pub mod surface;
pub mod canvas;
pub mod glyph;
pub mod composite;
pub mod leaf;
pub mod packed;
pub mod feature;
pub mod summary;
pub mod ruler;
pub mod translation;
pub mod diagram;

pub use surface::{Color, DrawOp, FixedMetrics, Font, Point, RecordingSurface, Surface, TextMetrics};
pub use canvas::{Canvas, CanvasRef};
pub use glyph::{Alignable, Glyph, GlyphAttrs, OnceBuilt};
pub use composite::{Arrangement, CompositeGlyph};
pub use leaf::{BarGlyph, BorderGlyph, IntronGlyph, LineGlyph, RectGlyph, SpacerGlyph, TextGlyph};
pub use packed::RowPackGlyph;
pub use feature::{FeatureGlyph, FeatureTrackGlyph, SegmentGlyph};
pub use summary::FeatureSummaryGlyph;
pub use ruler::{RulerGlyph, ScaleBarGlyph};
pub use translation::TranslationGlyph;
pub use diagram::{LinearDiagram, Sections, Translation};
