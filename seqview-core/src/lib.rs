//! SeqView Core Library
//!
//! Coordinate mapping, row packing, feature segmentation and density binning
//! for linear genome-annotation diagrams. Nothing here draws; the glyph
//! crate turns these layouts into a drawable tree.

pub mod types;
pub mod error;
pub mod config;
pub mod coords;
pub mod packing;
pub mod segments;
pub mod histogram;
pub mod scale;

// Re-export commonly used types and functions
pub use types::{Feature, GenomicPos, Strand, SubLocation, Window};
pub use error::{Result, SeqviewError};
pub use config::LayoutConfig;
pub use coords::{CoordinateSpace, WindowKind};
pub use packing::{pack_rows, Alignment, PackItem, PackParams, Placement, RowPacking};
pub use segments::{build_segments, IntronWidth, Segment, SegmentLayout};
pub use histogram::{bar_height, BarRun, DensityHistogram};

/// Version information for the seqview core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
