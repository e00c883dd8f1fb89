//! Feature density histogram
//!
//! Bins feature coverage over the whole sequence into a fixed number of
//! buckets for the overview strip. A feature adds at most one to any bin,
//! however many of its parts fall there.

use crate::config::SummaryConfig;
use crate::types::{GenomicPos, SubLocation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityHistogram {
    sequence_length: GenomicPos,
    bin_size: GenomicPos,
    bins: Vec<u32>,
}

/// Consecutive bins drawn as one bar of the same height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRun {
    pub first_bin: usize,
    pub last_bin: usize,
    /// Zero for empty space
    pub height: i32,
}

impl DensityHistogram {
    /// Uses `min(requested_bins, sequence_length)` bins, so each bin covers
    /// at least one base. A non-positive length gives an empty histogram.
    pub fn new(sequence_length: GenomicPos, requested_bins: usize) -> Self {
        let bin_count = (requested_bins as GenomicPos).min(sequence_length.max(0));
        let bin_size = if bin_count > 0 {
            sequence_length / bin_count
        } else {
            0
        };
        Self {
            sequence_length,
            bin_size,
            bins: vec![0; bin_count as usize],
        }
    }

    pub fn sequence_length(&self) -> GenomicPos {
        self.sequence_length
    }

    pub fn bin_size(&self) -> GenomicPos {
        self.bin_size
    }

    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    pub fn counts(&self) -> &[u32] {
        &self.bins
    }

    pub fn is_empty(&self) -> bool {
        self.bins.iter().all(|&c| c == 0)
    }

    fn bin_of(&self, pos: GenomicPos) -> usize {
        let last = self.bins.len() as GenomicPos - 1;
        pos.div_euclid(self.bin_size).clamp(0, last) as usize
    }

    fn bin_span(&self, begin: GenomicPos, end: GenomicPos) -> (usize, usize) {
        let start_bin = self.bin_of(begin);
        let end_bin = self.bin_of(end);
        if start_bin > end_bin {
            (end_bin, start_bin)
        } else {
            (start_bin, end_bin)
        }
    }

    /// Count a single-interval feature.
    pub fn add_interval(&mut self, begin: GenomicPos, end: GenomicPos) {
        if self.bins.is_empty() {
            return;
        }
        let (start_bin, end_bin) = self.bin_span(begin, end);
        for bin in &mut self.bins[start_bin..=end_bin] {
            *bin = bin.saturating_add(1);
        }
    }

    /// Count one feature. Remote parts are ignored; a feature with several
    /// parts marks every bin it touches and then adds one per marked bin.
    pub fn add_feature(&mut self, locations: &[SubLocation]) {
        if self.bins.is_empty() {
            return;
        }

        let local: Vec<&SubLocation> = locations.iter().filter(|l| !l.remote).collect();
        match local.as_slice() {
            [] => {}
            [only] => self.add_interval(only.begin, only.end),
            parts => {
                let mut mask = vec![false; self.bins.len()];
                for part in parts {
                    let (start_bin, end_bin) = self.bin_span(part.begin, part.end);
                    mask[start_bin..=end_bin].iter_mut().for_each(|m| *m = true);
                }
                for (bin, marked) in self.bins.iter_mut().zip(&mask) {
                    if *marked {
                        *bin = bin.saturating_add(1);
                    }
                }
            }
        }
    }

    pub fn add_features<'a, I>(&mut self, features: I)
    where
        I: IntoIterator<Item = &'a [SubLocation]>,
    {
        for locations in features {
            self.add_feature(locations);
        }
    }

    /// First and one-past-last base of `run`. The last bin absorbs the
    /// remainder of the sequence.
    pub fn run_span(&self, run: &BarRun) -> (GenomicPos, GenomicPos) {
        let begin = run.first_bin as GenomicPos * self.bin_size;
        let end = if run.last_bin + 1 == self.bins.len() {
            self.sequence_length
        } else {
            (run.last_bin as GenomicPos + 1) * self.bin_size
        };
        (begin, end)
    }

    /// Merge consecutive bins of identical bar height.
    pub fn runs(&self, style: &SummaryConfig) -> Vec<BarRun> {
        let mut runs: Vec<BarRun> = Vec::new();
        for (index, &count) in self.bins.iter().enumerate() {
            let height = bar_height(count, style);
            match runs.last_mut() {
                Some(run) if run.height == height => run.last_bin = index,
                _ => runs.push(BarRun {
                    first_bin: index,
                    last_bin: index,
                    height,
                }),
            }
        }
        runs
    }
}

/// Bar height for a bin count; zero means no bar.
pub fn bar_height(count: u32, style: &SummaryConfig) -> i32 {
    if count == 0 {
        return 0;
    }
    let steps = (count - 1).min(i32::MAX as u32) as i32;
    style
        .min_height
        .saturating_add(steps.saturating_mul(style.height_increment))
        .clamp(style.min_height, style.max_height)
}
