use serde::{Deserialize, Serialize};

/// 1-based sequence position. Signed so that gap distances can go negative
/// once locations overlap.
pub type GenomicPos = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn is_complement(self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl Default for Strand {
    fn default() -> Self {
        Strand::Forward
    }
}

impl From<bool> for Strand {
    fn from(forward: bool) -> Self {
        if forward {
            Strand::Forward
        } else {
            Strand::Reverse
        }
    }
}

impl From<Strand> for bool {
    fn from(strand: Strand) -> Self {
        matches!(strand, Strand::Forward)
    }
}

impl From<char> for Strand {
    fn from(c: char) -> Self {
        match c {
            '-' => Strand::Reverse,
            _ => Strand::Forward,
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

/// Inclusive interval of positions mapped onto a pixel panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub begin: GenomicPos,
    pub end: GenomicPos,
}

impl Window {
    pub fn new(begin: GenomicPos, end: GenomicPos) -> Self {
        Self { begin, end }
    }

    /// Number of bases covered, `end - begin + 1`.
    pub fn len(&self) -> GenomicPos {
        self.end - self.begin + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.begin
    }

    pub fn contains(&self, pos: GenomicPos) -> bool {
        pos >= self.begin && pos <= self.end
    }

    pub fn overlaps(&self, begin: GenomicPos, end: GenomicPos) -> bool {
        begin <= self.end && self.begin <= end
    }
}

/// One part of a feature location. Remote parts point into another entry
/// and cannot be placed on this sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubLocation {
    pub begin: GenomicPos,
    pub end: GenomicPos,
    #[serde(default)]
    pub strand: Strand,
    #[serde(default)]
    pub remote: bool,
}

impl SubLocation {
    pub fn new(begin: GenomicPos, end: GenomicPos, strand: Strand) -> Self {
        Self {
            begin,
            end,
            strand,
            remote: false,
        }
    }

    pub fn remote(begin: GenomicPos, end: GenomicPos, strand: Strand) -> Self {
        Self {
            begin,
            end,
            strand,
            remote: true,
        }
    }

    pub fn is_complement(&self) -> bool {
        self.strand.is_complement()
    }
}

/// Layout input for one annotated feature.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    pub locations: Vec<SubLocation>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Feature {
    pub fn new(locations: Vec<SubLocation>) -> Self {
        Self {
            locations,
            label: None,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn local_locations(&self) -> impl Iterator<Item = &SubLocation> {
        self.locations.iter().filter(|l| !l.remote)
    }

    /// Begin of the first placeable part.
    pub fn first_begin(&self) -> Option<GenomicPos> {
        self.local_locations().next().map(|l| l.begin)
    }

    /// Smallest begin and largest end over placeable parts.
    pub fn extent(&self) -> Option<(GenomicPos, GenomicPos)> {
        self.local_locations().fold(None, |acc, l| match acc {
            None => Some((l.begin, l.end)),
            Some((b, e)) => Some((b.min(l.begin), e.max(l.end))),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_len_and_contains() {
        let w = Window::new(100, 199);
        assert_eq!(w.len(), 100);
        assert!(w.contains(100));
        assert!(w.contains(199));
        assert!(!w.contains(200));
        assert!(w.overlaps(150, 300));
        assert!(!w.overlaps(200, 300));
    }

    #[test]
    fn test_strand_conversions() {
        assert_eq!(Strand::from('-'), Strand::Reverse);
        assert_eq!(Strand::from('+'), Strand::Forward);
        assert_eq!(char::from(Strand::Reverse), '-');
        assert!(bool::from(Strand::Forward));
    }

    #[test]
    fn test_feature_extent_skips_remote() {
        let feature = Feature::new(vec![
            SubLocation::remote(1, 5000, Strand::Forward),
            SubLocation::new(300, 400, Strand::Forward),
            SubLocation::new(100, 200, Strand::Forward),
        ]);
        assert_eq!(feature.first_begin(), Some(300));
        assert_eq!(feature.extent(), Some((100, 400)));
    }

    #[test]
    fn test_feature_without_local_parts() {
        let feature = Feature::new(vec![SubLocation::remote(1, 10, Strand::Reverse)]);
        assert_eq!(feature.first_begin(), None);
        assert_eq!(feature.extent(), None);
    }
}
