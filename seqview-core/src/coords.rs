//! Coordinate space: sequence positions to panel pixels
//!
//! A diagram shows one sequence through three windows that share the same
//! pixel panel: the overview (always the whole sequence), a zoomable feature
//! window and a zoomable base-pair window. All conversions round half up on
//! the exact rational value, so results never depend on float error.

use crate::config::CanvasConfig;
use crate::error::{Result, SeqviewError};
use crate::types::{GenomicPos, Window};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowKind {
    Overview,
    Feature,
    BasePair,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateSpace {
    sequence_length: GenomicPos,
    feature_window: Window,
    base_pair_window: Window,
    column_width: i32,
    columns: i32,
    left_margin: i32,
    right_margin: i32,
}

impl CoordinateSpace {
    /// Both zoomable windows start out covering the whole sequence, except
    /// that the base-pair window shows at most one base per column.
    pub fn new(sequence_length: GenomicPos, columns: i32, canvas: &CanvasConfig) -> Result<Self> {
        if sequence_length < 1 {
            return Err(SeqviewError::invalid_sequence_length(sequence_length));
        }
        if columns < 1 || canvas.column_width < 1 {
            return Err(SeqviewError::invalid_columns(format!(
                "{} columns of {} px",
                columns, canvas.column_width
            )));
        }

        let base_pair_end = sequence_length.min(columns as GenomicPos);
        Ok(Self {
            sequence_length,
            feature_window: Window::new(1, sequence_length),
            base_pair_window: Window::new(1, base_pair_end),
            column_width: canvas.column_width,
            columns,
            left_margin: canvas.left_margin,
            right_margin: canvas.right_margin,
        })
    }

    pub fn sequence_length(&self) -> GenomicPos {
        self.sequence_length
    }

    pub fn columns(&self) -> i32 {
        self.columns
    }

    pub fn column_width(&self) -> i32 {
        self.column_width
    }

    pub fn left_margin(&self) -> i32 {
        self.left_margin
    }

    pub fn right_margin(&self) -> i32 {
        self.right_margin
    }

    pub fn panel_width(&self) -> i32 {
        self.columns * self.column_width
    }

    pub fn total_width(&self) -> i32 {
        self.left_margin + self.panel_width() + self.right_margin
    }

    pub fn window(&self, kind: WindowKind) -> Window {
        match kind {
            WindowKind::Overview => Window::new(1, self.sequence_length),
            WindowKind::Feature => self.feature_window,
            WindowKind::BasePair => self.base_pair_window,
        }
    }

    /// Move a zoomable window. The overview is fixed to the whole sequence.
    pub fn set_window(&mut self, kind: WindowKind, window: Window) -> Result<()> {
        if window.end < window.begin {
            return Err(SeqviewError::invalid_window(
                window.begin,
                window.end,
                "end precedes begin",
            ));
        }
        if window.begin < 1 || window.end > self.sequence_length {
            return Err(SeqviewError::invalid_window(
                window.begin,
                window.end,
                format!("outside sequence 1..{}", self.sequence_length),
            ));
        }

        match kind {
            WindowKind::Overview => {
                return Err(SeqviewError::invalid_window(
                    window.begin,
                    window.end,
                    "the overview window always spans the whole sequence",
                ))
            }
            WindowKind::Feature => self.feature_window = window,
            WindowKind::BasePair => self.base_pair_window = window,
        }
        log::debug!("{:?} window moved to {}..{}", kind, window.begin, window.end);
        Ok(())
    }

    pub fn clamp(&self, pos: GenomicPos, kind: WindowKind) -> GenomicPos {
        let window = self.window(kind);
        if pos < window.begin {
            window.begin
        } else if pos > window.end {
            window.end
        } else {
            pos
        }
    }

    /// Left pixel of `pos` inside the panel.
    pub fn to_x(&self, pos: GenomicPos, kind: WindowKind) -> i32 {
        let window = self.window(kind);
        let offset = self.clamp(pos, kind) - window.begin;
        self.scale(offset, window.len())
    }

    /// Pixel width of the inclusive range `begin..=end` after clamping both
    /// ends. The difference is taken on exact values and rounded once.
    pub fn range_width(
        &self,
        begin: GenomicPos,
        end: GenomicPos,
        kind: WindowKind,
        floor_at_one: bool,
    ) -> i32 {
        let window = self.window(kind);
        let span = self.clamp(end, kind) + 1 - self.clamp(begin, kind);
        let width = self.scale(span, window.len());
        if floor_at_one {
            width.max(1)
        } else {
            width
        }
    }

    /// Pixel distance from `begin` to `end`; zero or negative once the
    /// positions overlap.
    pub fn distance(&self, begin: GenomicPos, end: GenomicPos, kind: WindowKind) -> i32 {
        let window = self.window(kind);
        let span = self.clamp(end, kind) - self.clamp(begin, kind);
        self.scale(span, window.len())
    }

    /// Overview pixel of `pos`, unclamped.
    pub fn overview_x(&self, pos: GenomicPos) -> i32 {
        self.scale(pos, self.sequence_length)
    }

    /// First position drawn at or right of pixel `x`.
    pub fn position_at(&self, x: i32, kind: WindowKind) -> GenomicPos {
        let window = self.window(kind);
        let panel = self.panel_width() as i128;
        let offset = (x as i128 * window.len() as i128).div_euclid(panel);
        self.clamp(window.begin + offset as GenomicPos, kind)
    }

    pub fn bases_per_pixel(&self, kind: WindowKind) -> f64 {
        self.window(kind).len() as f64 / self.panel_width() as f64
    }

    fn scale(&self, bases: GenomicPos, window_len: GenomicPos) -> i32 {
        round_half_up(bases as i128 * self.panel_width() as i128, window_len as i128) as i32
    }
}

/// `round(num / den)` with halves going toward positive infinity. `den > 0`.
pub fn round_half_up(num: i128, den: i128) -> i64 {
    (2 * num + den).div_euclid(2 * den) as i64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn windowed_space() -> impl Strategy<Value = (CoordinateSpace, WindowKind)> {
        (1i64..100_000, 1i32..200, 1i32..20, any::<bool>()).prop_flat_map(
            |(length, columns, column_width, zoomed)| {
                (Just((length, columns, column_width, zoomed)), 1..=length, 1..=length)
            },
        )
        .prop_map(|((length, columns, column_width, zoomed), a, b)| {
            let canvas = CanvasConfig {
                column_width,
                ..CanvasConfig::default()
            };
            let mut s = CoordinateSpace::new(length, columns, &canvas).unwrap();
            let kind = if zoomed { WindowKind::Feature } else { WindowKind::Overview };
            if zoomed {
                s.set_window(kind, Window::new(a.min(b), a.max(b))).unwrap();
            }
            (s, kind)
        })
    }

    proptest! {
        #[test]
        fn window_begin_maps_to_zero((s, kind) in windowed_space()) {
            let begin = s.window(kind).begin;
            prop_assert_eq!(s.to_x(begin, kind), 0);
        }

        #[test]
        fn floored_range_width_is_positive((s, kind) in windowed_space(), b in -10i64..200_000, e in -10i64..200_000) {
            prop_assert!(s.range_width(b, e, kind, true) >= 1);
        }

        #[test]
        fn to_x_stays_inside_panel((s, kind) in windowed_space(), pos in -10i64..200_000) {
            let x = s.to_x(pos, kind);
            prop_assert!(x >= 0 && x <= s.panel_width());
        }
    }
}
