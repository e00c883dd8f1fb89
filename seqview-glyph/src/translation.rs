//! Amino-acid translation track
//!
//! One letter per codon, centred over the codon's pixels. Forward
//! translations read from the location's begin, reverse ones from its end.
//! Where a codon is narrower than a letter the track falls back to a thin
//! bar so coverage stays visible when zoomed out.

use crate::canvas::CanvasRef;
use crate::glyph::{Glyph, GlyphAttrs, OnceBuilt};
use crate::surface::{Color, Surface};
use seqview_core::{GenomicPos, SubLocation, WindowKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Codon {
    x: i32,
    width: i32,
    letter: char,
}

struct TranslationLayout {
    codons: Vec<Codon>,
    width: i32,
    height: i32,
}

pub struct TranslationGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    kind: WindowKind,
    location: SubLocation,
    amino_acids: String,
    layout: OnceBuilt<TranslationLayout>,
}

impl TranslationGlyph {
    pub fn new(
        canvas: CanvasRef,
        location: SubLocation,
        amino_acids: impl Into<String>,
        kind: WindowKind,
    ) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            kind,
            location,
            amino_acids: amino_acids.into(),
            layout: OnceBuilt::new(),
        }
    }

    /// Number of codons overlapping the window.
    pub fn visible_codons(&self) -> usize {
        self.layout().codons.len()
    }

    /// Bases of the `index`th codon, or `None` past the location.
    fn codon_span(&self, index: usize) -> Option<(GenomicPos, GenomicPos)> {
        let offset = 3 * index as GenomicPos;
        let (begin, end) = if self.location.is_complement() {
            (self.location.end - offset - 2, self.location.end - offset)
        } else {
            (self.location.begin + offset, self.location.begin + offset + 2)
        };
        (begin >= self.location.begin && end <= self.location.end).then_some((begin, end))
    }

    fn layout(&self) -> &TranslationLayout {
        self.layout.get_or_build(|| {
            let space = self.canvas.space();
            let window = space.window(self.kind);
            let mut codons = Vec::new();
            for (index, letter) in self.amino_acids.chars().enumerate() {
                let Some((begin, end)) = self.codon_span(index) else {
                    break;
                };
                if !window.overlaps(begin, end) {
                    continue;
                }
                codons.push(Codon {
                    x: space.to_x(begin, self.kind),
                    width: space.range_width(begin, end, self.kind, true),
                    letter,
                });
            }
            log::debug!(
                "Translation of {} residues, {} in the {:?} window",
                self.amino_acids.len(),
                codons.len(),
                self.kind
            );
            TranslationLayout {
                codons,
                width: space.panel_width(),
                height: self.canvas.text_height(false),
            }
        })
    }
}

impl Glyph for TranslationGlyph {
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
        let font = self.canvas.font(false);
        let mut buffer = [0u8; 4];
        surface.set_color(Color::BLACK);
        for codon in &layout.codons {
            let letter: &str = codon.letter.encode_utf8(&mut buffer);
            let letter_width = surface.text_width(letter, &font);
            if letter_width <= codon.width {
                let x = codon.x + (codon.width - letter_width) / 2;
                surface.draw_text(letter, x, 0, &font);
            } else {
                surface.fill_rect(codon.x, layout.height / 2 - 1, codon.width, 2);
            }
        }
    }
}
