//! Whole-diagram assembly
//!
//! Stacks the three views of a sequence: the overview density strip, the
//! feature window with its packed feature track, and the base-pair window
//! with translations. Each section is captioned in the left margin.

use crate::canvas::CanvasRef;
use crate::composite::{Arrangement, CompositeGlyph};
use crate::feature::FeatureTrackGlyph;
use crate::glyph::Glyph;
use crate::leaf::SpacerGlyph;
use crate::ruler::{RulerGlyph, ScaleBarGlyph};
use crate::summary::FeatureSummaryGlyph;
use crate::translation::TranslationGlyph;
use seqview_core::{Feature, SubLocation, WindowKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub location: SubLocation,
    pub amino_acids: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub overview: bool,
    pub features: bool,
    pub sequence: bool,
}

impl Default for Sections {
    fn default() -> Self {
        Self {
            overview: true,
            features: true,
            sequence: true,
        }
    }
}

pub struct LinearDiagram {
    canvas: CanvasRef,
    features: Vec<Feature>,
    translations: Vec<Translation>,
    sections: Sections,
}

impl LinearDiagram {
    pub fn new(canvas: CanvasRef) -> Self {
        Self {
            canvas,
            features: Vec::new(),
            translations: Vec::new(),
            sections: Sections::default(),
        }
    }

    pub fn with_features(mut self, features: Vec<Feature>) -> Self {
        self.features = features;
        self
    }

    pub fn with_translation(mut self, location: SubLocation, amino_acids: impl Into<String>) -> Self {
        self.translations.push(Translation {
            location,
            amino_acids: amino_acids.into(),
        });
        self
    }

    pub fn with_sections(mut self, sections: Sections) -> Self {
        self.sections = sections;
        self
    }

    /// Root glyph of the diagram, shifted right by the canvas left margin.
    /// Nothing is laid out until it is first measured or drawn.
    pub fn into_glyph(self) -> CompositeGlyph {
        let left_margin = self.canvas.space().left_margin();
        CompositeGlyph::lazy(Arrangement::Column, move |children| {
            let spacing = 4 * self.canvas.config().rows.row_spacing;
            let sections = self.build_sections();
            let count = sections.len();
            for (index, section) in sections.into_iter().enumerate() {
                children.push(section.boxed());
                if index + 1 < count {
                    children.push(SpacerGlyph::new(0, spacing).boxed());
                }
            }
        })
        .with_translation(left_margin, 0)
    }

    fn build_sections(&self) -> Vec<CompositeGlyph> {
        let canvas = &self.canvas;
        let mut sections = Vec::new();

        if self.sections.overview {
            let mut overview = CompositeGlyph::column();
            overview.push(
                FeatureSummaryGlyph::new(canvas.clone(), self.features.clone())
                    .with_label(canvas, "Overview", true),
            );
            overview.push(RulerGlyph::new(canvas.clone(), WindowKind::Overview));
            sections.push(overview);
        }

        if self.sections.features {
            let mut features = CompositeGlyph::column();
            features.push(
                RulerGlyph::new(canvas.clone(), WindowKind::Feature)
                    .with_label(canvas, "Features", true),
            );
            features.push(FeatureTrackGlyph::new(
                canvas.clone(),
                self.features.clone(),
                WindowKind::Feature,
            ));
            features.push(ScaleBarGlyph::new(canvas.clone(), WindowKind::Feature));
            sections.push(features);
        }

        if self.sections.sequence {
            let mut sequence = CompositeGlyph::column();
            sequence.push(
                RulerGlyph::new(canvas.clone(), WindowKind::BasePair)
                    .with_label(canvas, "Sequence", true),
            );
            for translation in &self.translations {
                sequence.push(TranslationGlyph::new(
                    canvas.clone(),
                    translation.location,
                    translation.amino_acids.clone(),
                    WindowKind::BasePair,
                ));
            }
            sections.push(sequence);
        }

        log::debug!("Diagram with {} sections", sections.len());
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::surface::{RecordingSurface, Surface};
    use seqview_core::{LayoutConfig, Strand};

    #[test]
    fn test_section_captions_sit_in_margin() {
        let canvas = Canvas::for_sequence(1000, 50, LayoutConfig::default()).unwrap();
        let diagram = LinearDiagram::new(canvas).into_glyph();

        let mut surface = RecordingSurface::default();
        diagram.draw(&mut surface);
        assert_eq!(surface.translation(), (0, 0));

        let captions: Vec<(&str, i32)> = surface
            .texts()
            .into_iter()
            .filter(|(text, _, _)| text.chars().all(char::is_alphabetic))
            .map(|(text, x, _)| (text, x))
            .collect();
        // bold captions are 7 px per character, right-aligned at 96
        assert_eq!(
            captions,
            vec![("Overview", 40), ("Features", 40), ("Sequence", 40)]
        );
    }

    #[test]
    fn test_sections_can_be_disabled() {
        let canvas = Canvas::for_sequence(1000, 50, LayoutConfig::default()).unwrap();
        let only_sequence = Sections {
            overview: false,
            features: false,
            sequence: true,
        };
        let diagram = LinearDiagram::new(canvas.clone())
            .with_sections(only_sequence)
            .with_translation(SubLocation::new(1, 9, Strand::Forward), "MKL")
            .into_glyph();

        let ruler_height = 4 + canvas.text_height(false);
        assert_eq!(diagram.height(), ruler_height + canvas.text_height(false));
        assert_eq!(diagram.len(), 1);
    }
}
