//! Ruler ticks and scale-bar lengths

use crate::coords::{round_half_up, CoordinateSpace, WindowKind};
use crate::types::GenomicPos;

/// Format a base-pair length in human-friendly units
pub fn format_bp(bp: f64) -> String {
    if bp >= 1e9 {
        format!("{:.2} Gb", bp / 1e9)
    } else if bp >= 1e6 {
        format!("{:.2} Mb", bp / 1e6)
    } else if bp >= 1e3 {
        format!("{:.2} kb", bp / 1e3)
    } else {
        format!("{:.0} bp", bp)
    }
}

/// Smallest 1, 2 or 5 × 10^k that is at least `x`
pub fn nice_round_length(x: f64) -> f64 {
    if x <= 1.0 {
        return 1.0;
    }
    let base = 10f64.powf(x.log10().floor());
    let mant = x / base;
    let nice = if mant <= 1.0 {
        1.0
    } else if mant <= 2.0 {
        2.0
    } else if mant <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub position: GenomicPos,
    pub x: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticks {
    pub step: GenomicPos,
    pub ticks: Vec<Tick>,
}

/// Ticks at every multiple of a nice step inside the window, spaced at
/// least `min_spacing` pixels apart.
pub fn ruler_ticks(space: &CoordinateSpace, kind: WindowKind, min_spacing: i32) -> Ticks {
    let window = space.window(kind);
    let bases = space.bases_per_pixel(kind) * min_spacing.max(1) as f64;
    let step = (nice_round_length(bases.ceil()) as GenomicPos).max(1);

    let mut position = (window.begin + step - 1) / step * step;
    let mut ticks = Vec::new();
    while position <= window.end {
        ticks.push(Tick {
            position,
            x: space.to_x(position, kind),
        });
        position += step;
    }

    Ticks { step, ticks }
}

/// A nice number of bases close to `fraction` of the panel, with its
/// pixel length. Never longer than the window.
pub fn scale_bar(space: &CoordinateSpace, kind: WindowKind, fraction: f64) -> (GenomicPos, i32) {
    let window = space.window(kind);
    let target = space.panel_width() as f64 * fraction * space.bases_per_pixel(kind);
    let mut bases = nice_round_length(target) as GenomicPos;
    while bases > window.len() && bases > 1 {
        bases = previous_nice(bases);
    }
    let pixels = round_half_up(
        bases as i128 * space.panel_width() as i128,
        window.len() as i128,
    ) as i32;
    (bases, pixels)
}

fn previous_nice(bases: GenomicPos) -> GenomicPos {
    let magnitude = 10i64.pow((bases as f64).log10().floor() as u32);
    match bases / magnitude {
        5 => 2 * magnitude,
        2 => magnitude,
        _ => (magnitude / 2).max(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use crate::types::Window;

    fn space(length: GenomicPos) -> CoordinateSpace {
        CoordinateSpace::new(length, 50, &CanvasConfig::default()).unwrap()
    }

    #[test]
    fn test_format_bp() {
        assert_eq!(format_bp(500.0), "500 bp");
        assert_eq!(format_bp(2500.0), "2.50 kb");
        assert_eq!(format_bp(3_000_000.0), "3.00 Mb");
        assert_eq!(format_bp(1.5e9), "1.50 Gb");
    }

    #[test]
    fn test_nice_round_length() {
        assert_eq!(nice_round_length(0.3), 1.0);
        assert_eq!(nice_round_length(1.4), 2.0);
        assert_eq!(nice_round_length(2.0), 2.0);
        assert_eq!(nice_round_length(37.0), 50.0);
        assert_eq!(nice_round_length(510.0), 1000.0);
    }

    #[test]
    fn test_ruler_ticks_respect_spacing() {
        // 10_000 bases over 500 px: 20 bases per pixel
        let s = space(10_000);
        let ticks = ruler_ticks(&s, WindowKind::Overview, 60);
        assert_eq!(ticks.step, 2000);
        let positions: Vec<GenomicPos> = ticks.ticks.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![2000, 4000, 6000, 8000, 10_000]);
        for pair in ticks.ticks.windows(2) {
            assert!(pair[1].x - pair[0].x >= 60);
        }
    }

    #[test]
    fn test_ruler_ticks_in_zoomed_window() {
        let mut s = space(10_000);
        s.set_window(WindowKind::BasePair, Window::new(95, 144)).unwrap();
        let ticks = ruler_ticks(&s, WindowKind::BasePair, 60);
        assert_eq!(ticks.step, 10);
        assert_eq!(ticks.ticks.first().map(|t| t.position), Some(100));
        assert_eq!(ticks.ticks.first().map(|t| t.x), Some(50));
    }

    #[test]
    fn test_scale_bar_fits_window() {
        let s = space(10_000);
        let (bases, pixels) = scale_bar(&s, WindowKind::Overview, 0.2);
        assert_eq!(bases, 2000);
        assert_eq!(pixels, 100);

        let tiny = space(3);
        let (bases, _) = scale_bar(&tiny, WindowKind::Overview, 0.9);
        assert!(bases <= 3);
    }
}
