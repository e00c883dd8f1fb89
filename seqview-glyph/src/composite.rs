//! Composite glyphs
//!
//! A composite owns its children and lays them out in one of three ways:
//! freely (children position themselves through their own translation), in
//! a row (each child starts where the previous one ended) or in a column.
//! Children are either pushed before the first size request or produced by
//! a one-shot builder closure at that moment.

use crate::glyph::{Glyph, GlyphAttrs, OnceBuilt};
use crate::surface::Surface;
use std::cell::RefCell;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Arrangement {
    #[default]
    Free,
    Row,
    Column,
}

type BuildFn = Box<dyn FnOnce(&mut Vec<Box<dyn Glyph>>)>;

struct Built {
    children: Vec<Box<dyn Glyph>>,
    /// Automatic offset of each child, on top of its own translation
    offsets: Vec<(i32, i32)>,
    width: i32,
    height: i32,
}

pub struct CompositeGlyph {
    attrs: GlyphAttrs,
    arrangement: Arrangement,
    pending: RefCell<Vec<Box<dyn Glyph>>>,
    builder: RefCell<Option<BuildFn>>,
    built: OnceBuilt<Built>,
}

impl fmt::Debug for CompositeGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeGlyph")
            .field("arrangement", &self.arrangement)
            .field("built", &self.built.is_built())
            .finish()
    }
}

impl CompositeGlyph {
    pub fn new(arrangement: Arrangement) -> Self {
        Self {
            attrs: GlyphAttrs::default(),
            arrangement,
            pending: RefCell::new(Vec::new()),
            builder: RefCell::new(None),
            built: OnceBuilt::new(),
        }
    }

    pub fn free() -> Self {
        Self::new(Arrangement::Free)
    }

    pub fn row() -> Self {
        Self::new(Arrangement::Row)
    }

    pub fn column() -> Self {
        Self::new(Arrangement::Column)
    }

    /// Composite whose children are produced by `build` on first use.
    /// Children pushed before that come first.
    pub fn lazy<F>(arrangement: Arrangement, build: F) -> Self
    where
        F: FnOnce(&mut Vec<Box<dyn Glyph>>) + 'static,
    {
        let glyph = Self::new(arrangement);
        *glyph.builder.borrow_mut() = Some(Box::new(build));
        glyph
    }

    pub fn arrangement(&self) -> Arrangement {
        self.arrangement
    }

    pub fn push(&mut self, child: impl Glyph + 'static) {
        self.push_boxed(Box::new(child));
    }

    /// Ignored once the composite is built.
    pub fn push_boxed(&mut self, child: Box<dyn Glyph>) {
        if self.built.is_built() {
            log::warn!("Child pushed into an already built {:?} composite; ignored", self.arrangement);
            return;
        }
        self.pending.get_mut().push(child);
    }

    pub fn children(&self) -> &[Box<dyn Glyph>] {
        &self.built().children
    }

    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }

    /// Automatic offset given to child `index` by the arrangement.
    pub fn child_offset(&self, index: usize) -> Option<(i32, i32)> {
        self.built().offsets.get(index).copied()
    }

    fn built(&self) -> &Built {
        self.built.get_or_build(|| {
            let mut children = std::mem::take(&mut *self.pending.borrow_mut());
            if let Some(build) = self.builder.borrow_mut().take() {
                build(&mut children);
            }
            arrange(self.arrangement, children)
        })
    }
}

fn arrange(arrangement: Arrangement, children: Vec<Box<dyn Glyph>>) -> Built {
    let mut offsets = Vec::with_capacity(children.len());
    let mut width = 0;
    let mut height = 0;

    for child in &children {
        let (w, h) = (child.width(), child.height());
        match arrangement {
            Arrangement::Free => {
                offsets.push((0, 0));
                width = width.max(w);
                height = height.max(h);
            }
            Arrangement::Row => {
                offsets.push((width, 0));
                width += w;
                height = height.max(h);
            }
            Arrangement::Column => {
                offsets.push((0, height));
                width = width.max(w);
                height += h;
            }
        }
    }

    Built {
        children,
        offsets,
        width,
        height,
    }
}

impl Glyph for CompositeGlyph {
    fn attrs(&self) -> &GlyphAttrs {
        &self.attrs
    }

    fn attrs_mut(&mut self) -> &mut GlyphAttrs {
        &mut self.attrs
    }

    fn build(&self) {
        self.built();
    }

    fn is_built(&self) -> bool {
        self.built.is_built()
    }

    fn content_width(&self) -> i32 {
        self.built().width
    }

    fn content_height(&self) -> i32 {
        self.built().height
    }

    fn paint(&self, surface: &mut dyn Surface) {
        let built = self.built();
        for (child, &(dx, dy)) in built.children.iter().zip(&built.offsets) {
            surface.translate(dx, dy);
            child.draw(surface);
            surface.translate(-dx, -dy);
        }
    }
}
