//! Row-packed composite
//!
//! Children are anchored at a pixel x and packed into a bounded number of
//! rows on build. Children that fit nowhere are dropped and replaced by a
//! one-line "N features not displayed" note under the rows.

use crate::canvas::CanvasRef;
use crate::glyph::{Glyph, GlyphAttrs, OnceBuilt};
use crate::leaf::TextGlyph;
use crate::surface::{Color, Surface};
use seqview_core::{pack_rows, PackItem, PackParams, RowPacking};
use std::cell::RefCell;

struct Entry {
    child: Box<dyn Glyph>,
    anchor: i32,
    alignable: bool,
}

struct Packed {
    /// Visible children in placement order, with their offsets
    visible: Vec<(Box<dyn Glyph>, i32, i32)>,
    packing: RowPacking,
    overflow: Option<TextGlyph>,
    width: i32,
    height: i32,
}

pub struct RowPackGlyph {
    attrs: GlyphAttrs,
    canvas: CanvasRef,
    params: PackParams,
    pending: RefCell<Vec<Entry>>,
    built: OnceBuilt<Packed>,
}

impl RowPackGlyph {
    pub fn new(canvas: CanvasRef, params: PackParams) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            canvas,
            params,
            pending: RefCell::new(Vec::new()),
            built: OnceBuilt::new(),
        }
    }

    /// Packer configured from the canvas row settings.
    pub fn from_canvas(canvas: CanvasRef) -> Self {
        let params = PackParams::from_config(&canvas.config().rows);
        Self::new(canvas, params)
    }

    pub fn params(&self) -> &PackParams {
        &self.params
    }

    /// Add a child anchored at pixel `anchor`. Alignable children may be
    /// flipped to end at their anchor when they do not fit after it, which
    /// only happens when the params set a `max_right` limit.
    pub fn add(&mut self, child: Box<dyn Glyph>, anchor: i32, alignable: bool) {
        if self.built.is_built() {
            log::warn!("Child added to an already packed row set; ignored");
            return;
        }
        self.pending.get_mut().push(Entry {
            child,
            anchor,
            alignable,
        });
    }

    pub fn packing(&self) -> &RowPacking {
        &self.packed().packing
    }

    pub fn hidden_count(&self) -> usize {
        self.packing().hidden_count
    }

    pub fn rows_used(&self) -> usize {
        self.packing().rows_used()
    }

    pub fn visible_count(&self) -> usize {
        self.packed().visible.len()
    }

    /// Offset of each visible child, in placement order.
    pub fn visible_offsets(&self) -> Vec<(i32, i32)> {
        self.packed().visible.iter().map(|&(_, x, y)| (x, y)).collect()
    }

    fn packed(&self) -> &Packed {
        self.built.get_or_build(|| self.pack())
    }

    fn pack(&self) -> Packed {
        let entries = std::mem::take(&mut *self.pending.borrow_mut());
        let items: Vec<PackItem> = entries
            .iter()
            .map(|entry| {
                let item = PackItem::new(entry.anchor, entry.child.width(), entry.child.height());
                if entry.alignable {
                    item.alignable()
                } else {
                    item
                }
            })
            .collect();
        let packing = pack_rows(&items, &self.params);

        let mut slots: Vec<Option<Entry>> = entries.into_iter().map(Some).collect();
        let mut visible = Vec::with_capacity(packing.visible_count());
        let mut width = 0;
        for &index in &packing.order {
            let (Some(placement), Some(entry)) = (packing.placements[index], slots[index].take())
            else {
                continue;
            };
            let mut child = entry.child;
            // alignable children position themselves around the anchor
            let x = match child.as_alignable_mut() {
                Some(alignable) => {
                    alignable.set_alignment(placement.alignment);
                    entry.anchor
                }
                None => placement.x,
            };
            width = width.max(placement.x + items[index].width);
            visible.push((child, x, placement.y));
        }

        let mut height = packing.rows_height;
        let overflow = packing.hidden_label().map(|text| {
            log::warn!("{}", text);
            let glyph = TextGlyph::new(&self.canvas, text, false).with_color(Color::GREY);
            height += glyph.height();
            glyph
        });
        if let Some(glyph) = &overflow {
            width = width.max(glyph.width());
        }

        Packed {
            visible,
            packing,
            overflow,
            width: width.max(0),
            height,
        }
    }
}

impl Glyph for RowPackGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.packed();
    }

    fn is_built(&self) -> bool {
        self.built.is_built()
    }

    fn content_width(&self) -> i32 {
        self.packed().width
    }

    fn content_height(&self) -> i32 {
        self.packed().height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let packed = self.packed();
        for (child, x, y) in &packed.visible {
            surface.translate(*x, *y);
            child.draw(surface);
            surface.translate(-*x, -*y);
        }
        if let Some(overflow) = &packed.overflow {
            let y = packed.packing.rows_height;
            surface.translate(0, y);
            overflow.draw(surface);
            surface.translate(0, -y);
        }
    }
}
