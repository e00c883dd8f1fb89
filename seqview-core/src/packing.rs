//! Row packing
//!
//! Places anchored items into a bounded number of rows so that items sharing
//! a row never overlap. Items that fit nowhere are hidden and counted; the
//! row capacity is never exceeded.

use crate::config::RowConfig;
use serde::{Deserialize, Serialize};

/// Which side of its anchor an item is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// Item starts at the anchor
    #[default]
    Left,
    /// Item ends at the anchor
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackItem {
    /// Desired left edge in the parent's coordinates
    pub anchor: i32,
    pub width: i32,
    pub height: i32,
    /// Item may be flipped to end at its anchor instead
    pub alignable: bool,
}

impl PackItem {
    pub fn new(anchor: i32, width: i32, height: i32) -> Self {
        Self {
            anchor,
            width,
            height,
            alignable: false,
        }
    }

    pub fn alignable(mut self) -> Self {
        self.alignable = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackParams {
    pub max_rows: usize,
    pub left_glyph_margin: i32,
    pub row_spacing: i32,
    pub sort_by_anchor: bool,
    /// Overlap is allowed: every item goes to the first scanned row
    pub contiguous: bool,
    /// Start scanning at the deepest row used so far instead of row 0
    pub scan_from_last_row: bool,
    /// Right limit for left-aligned items. When set, an item running past it
    /// is tried right-aligned (if alignable) and then on later rows.
    ///
    /// Opt-in: `from_config` and `Default` leave it `None`, and no packer in
    /// this workspace sets it. Without a limit the right-fit test can only
    /// pass when the left-fit test already has, so nothing is flipped.
    pub max_right: Option<i32>,
}

impl Default for PackParams {
    fn default() -> Self {
        Self::from_config(&RowConfig::default())
    }
}

impl PackParams {
    pub fn from_config(rows: &RowConfig) -> Self {
        Self {
            max_rows: rows.max_rows,
            left_glyph_margin: rows.left_glyph_margin,
            row_spacing: rows.row_spacing,
            sort_by_anchor: true,
            contiguous: false,
            scan_from_last_row: false,
            max_right: None,
        }
    }

    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = max_rows;
        self
    }

    pub fn sort_by_anchor(mut self, sort: bool) -> Self {
        self.sort_by_anchor = sort;
        self
    }

    pub fn contiguous(mut self, contiguous: bool) -> Self {
        self.contiguous = contiguous;
        self
    }

    pub fn scan_from_last_row(mut self, scan: bool) -> Self {
        self.scan_from_last_row = scan;
        self
    }

    pub fn with_max_right(mut self, max_right: i32) -> Self {
        self.max_right = Some(max_right);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub row: usize,
    pub alignment: Alignment,
    /// Left edge of the drawn item
    pub x: i32,
    /// Top of the item's row
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowPacking {
    /// One entry per input item, in input order; `None` means hidden
    pub placements: Vec<Option<Placement>>,
    /// Input indices in the order they were placed
    pub order: Vec<usize>,
    pub row_tops: Vec<i32>,
    pub row_heights: Vec<i32>,
    pub hidden_count: usize,
    /// Height of all used rows including row spacing
    pub rows_height: i32,
}

impl RowPacking {
    pub fn rows_used(&self) -> usize {
        self.row_heights.len()
    }

    pub fn visible_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_some()).count()
    }

    pub fn visible_in_row(&self, row: usize) -> usize {
        self.placements
            .iter()
            .flatten()
            .filter(|p| p.row == row)
            .count()
    }

    /// Text of the overflow line, if anything was hidden.
    pub fn hidden_label(&self) -> Option<String> {
        if self.hidden_count > 0 {
            Some(format!("{} features not displayed", self.hidden_count))
        } else {
            None
        }
    }
}

pub fn pack_rows(items: &[PackItem], params: &PackParams) -> RowPacking {
    let mut order: Vec<usize> = (0..items.len()).collect();
    if params.sort_by_anchor {
        // stable: equal anchors keep input order
        order.sort_by_key(|&i| items[i].anchor);
    }

    let rows = params.max_rows;
    let mut row_right = vec![0i32; rows];
    let mut row_height = vec![0i32; rows];
    let mut row_used = vec![false; rows];
    let mut last_used_row = 0usize;
    let mut placed: Vec<Option<(usize, Alignment)>> = vec![None; items.len()];
    let mut hidden_count = 0usize;

    for &index in &order {
        let item = &items[index];
        let start_row = if params.scan_from_last_row { last_used_row } else { 0 };

        let mut found = None;
        for row in start_row..rows {
            if let Some(alignment) = fit_in_row(item, row_right[row], params) {
                found = Some((row, alignment));
                break;
            }
        }

        match found {
            Some((row, alignment)) => {
                row_right[row] = match (alignment, params.max_right) {
                    (Alignment::Right, Some(_)) => item.anchor,
                    _ => item.anchor + item.width,
                };
                row_height[row] = row_height[row].max(item.height);
                row_used[row] = true;
                last_used_row = last_used_row.max(row);
                placed[index] = Some((row, alignment));
            }
            None => hidden_count += 1,
        }
    }

    let rows_used = row_used.iter().rposition(|&used| used).map_or(0, |r| r + 1);
    let mut row_tops = Vec::with_capacity(rows_used);
    let mut top = 0;
    for height in &row_height[..rows_used] {
        row_tops.push(top);
        top += height + params.row_spacing;
    }

    let placements = placed
        .iter()
        .enumerate()
        .map(|(index, p)| {
            p.map(|(row, alignment)| {
                let item = &items[index];
                let x = match alignment {
                    Alignment::Left => item.anchor,
                    Alignment::Right => item.anchor - item.width,
                };
                Placement {
                    row,
                    alignment,
                    x,
                    y: row_tops[row],
                }
            })
        })
        .collect();

    if hidden_count > 0 {
        log::debug!(
            "Row packing hid {} of {} items ({} rows)",
            hidden_count,
            items.len(),
            rows
        );
    }

    RowPacking {
        placements,
        order,
        row_tops,
        row_heights: row_height[..rows_used].to_vec(),
        hidden_count,
        rows_height: top,
    }
}

fn fit_in_row(item: &PackItem, right_edge: i32, params: &PackParams) -> Option<Alignment> {
    if params.contiguous {
        return Some(Alignment::Left);
    }

    let occupied = right_edge > 0;
    let margin = if occupied { params.left_glyph_margin } else { 0 };
    let within_limit = params
        .max_right
        .map_or(true, |limit| item.anchor + item.width <= limit);

    if right_edge + margin <= item.anchor && within_limit {
        return Some(Alignment::Left);
    }
    if item.alignable {
        let fits_right = if occupied {
            right_edge + margin <= item.anchor - item.width
        } else {
            item.anchor >= item.width
        };
        if fits_right {
            return Some(Alignment::Right);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(max_rows: usize) -> PackParams {
        PackParams {
            max_rows,
            left_glyph_margin: 0,
            row_spacing: 0,
            sort_by_anchor: true,
            contiguous: false,
            scan_from_last_row: false,
            max_right: None,
        }
    }

    #[test]
    fn test_overflow_scenario() {
        let items = vec![
            PackItem::new(0, 60, 10),
            PackItem::new(50, 60, 10),
            PackItem::new(50, 60, 10),
        ];
        let packing = pack_rows(&items, &params(2));

        assert_eq!(packing.placements[0].map(|p| p.row), Some(0));
        assert_eq!(packing.placements[1].map(|p| p.row), Some(1));
        assert_eq!(packing.placements[2], None);
        assert_eq!(packing.hidden_count, 1);
        assert_eq!(packing.rows_used(), 2);
        assert_eq!(packing.hidden_label().as_deref(), Some("1 features not displayed"));
    }

    #[test]
    fn test_margin_applies_only_to_occupied_rows() {
        let mut p = params(3);
        p.left_glyph_margin = 5;
        let items = vec![PackItem::new(0, 10, 4), PackItem::new(14, 10, 4), PackItem::new(15, 10, 4)];
        let packing = pack_rows(&items, &p);

        // 10 + 5 > 14 pushes the second item down; the third fits behind the first
        assert_eq!(packing.placements[1].map(|p| p.row), Some(1));
        assert_eq!(packing.placements[2].map(|p| p.row), Some(0));
    }

    #[test]
    fn test_row_tops_accumulate_heights_and_spacing() {
        let mut p = params(3);
        p.row_spacing = 3;
        let items = vec![PackItem::new(0, 50, 12), PackItem::new(10, 50, 7), PackItem::new(20, 50, 9)];
        let packing = pack_rows(&items, &p);

        assert_eq!(packing.row_tops, vec![0, 15, 25]);
        assert_eq!(packing.rows_height, 12 + 3 + 7 + 3 + 9 + 3);
        assert_eq!(packing.placements[2].map(|p| p.y), Some(25));
    }

    #[test]
    fn test_equal_anchors_keep_input_order() {
        let items = vec![PackItem::new(5, 10, 1), PackItem::new(0, 10, 1), PackItem::new(5, 10, 1)];
        let packing = pack_rows(&items, &params(4));
        assert_eq!(packing.order, vec![1, 0, 2]);
        assert_eq!(packing.placements[0].map(|p| p.row), Some(1));
        assert_eq!(packing.placements[2].map(|p| p.row), Some(2));
    }

    #[test]
    fn test_unsorted_scan_from_last_row() {
        let mut p = params(3);
        p.sort_by_anchor = false;
        p.scan_from_last_row = true;
        let items = vec![PackItem::new(100, 20, 5), PackItem::new(0, 20, 5), PackItem::new(200, 20, 5)];
        let packing = pack_rows(&items, &p);

        assert_eq!(packing.order, vec![0, 1, 2]);
        assert_eq!(packing.placements[0].map(|p| p.row), Some(0));
        // anchor 0 is left of row 0's right edge
        assert_eq!(packing.placements[1].map(|p| p.row), Some(1));
        // row 0 would fit but scanning resumes at row 1
        assert_eq!(packing.placements[2].map(|p| p.row), Some(1));
    }

    #[test]
    fn test_contiguous_stacks_on_one_row() {
        let p = params(3).contiguous(true);
        let items = vec![PackItem::new(0, 50, 5), PackItem::new(10, 50, 5), PackItem::new(20, 50, 8)];
        let packing = pack_rows(&items, &p);

        assert_eq!(packing.visible_in_row(0), 3);
        assert_eq!(packing.rows_used(), 1);
        assert_eq!(packing.row_heights, vec![8]);
    }

    #[test]
    fn test_alignable_item_flips_at_right_limit() {
        let p = params(2).with_max_right(100);
        let items = vec![PackItem::new(0, 20, 5), PackItem::new(95, 30, 5).alignable()];
        let packing = pack_rows(&items, &p);

        let label = packing.placements[1].unwrap();
        assert_eq!(label.row, 0);
        assert_eq!(label.alignment, Alignment::Right);
        assert_eq!(label.x, 65);
    }

    #[test]
    fn test_alignable_item_stays_left_without_limit() {
        let p = PackParams::from_config(&RowConfig::default());
        assert_eq!(p.max_right, None);
        let items = vec![PackItem::new(0, 20, 5), PackItem::new(95, 30, 5).alignable()];
        let packing = pack_rows(&items, &p);

        let label = packing.placements[1].unwrap();
        assert_eq!(label.alignment, Alignment::Left);
        assert_eq!(label.x, 95);
    }

    #[test]
    fn test_non_alignable_item_moves_down_at_right_limit() {
        let p = params(2).with_max_right(100);
        let items = vec![PackItem::new(0, 20, 5), PackItem::new(95, 30, 5)];
        let packing = pack_rows(&items, &p);
        assert_eq!(packing.placements[1], None);
        assert_eq!(packing.hidden_count, 1);
    }

    #[test]
    fn test_zero_capacity_hides_everything() {
        let items = vec![PackItem::new(0, 5, 5), PackItem::new(10, 5, 5)];
        let packing = pack_rows(&items, &params(0));
        assert_eq!(packing.hidden_count, 2);
        assert_eq!(packing.rows_used(), 0);
        assert_eq!(packing.rows_height, 0);
    }

    #[test]
    fn test_empty_input() {
        let packing = pack_rows(&[], &PackParams::default());
        assert_eq!(packing.visible_count(), 0);
        assert_eq!(packing.hidden_label(), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn items() -> impl Strategy<Value = Vec<PackItem>> {
        proptest::collection::vec(
            (0i32..500, 1i32..80, 1i32..20, any::<bool>()).prop_map(|(anchor, width, height, alignable)| {
                PackItem {
                    anchor,
                    width,
                    height,
                    alignable,
                }
            }),
            0..60,
        )
    }

    proptest! {
        #[test]
        fn every_item_is_placed_or_counted(items in items(), rows in 0usize..12, scan in any::<bool>(), sort in any::<bool>()) {
            let p = PackParams::default().with_max_rows(rows).scan_from_last_row(scan).sort_by_anchor(sort);
            let packing = pack_rows(&items, &p);
            let per_row: usize = (0..packing.rows_used()).map(|r| packing.visible_in_row(r)).sum();
            prop_assert!(packing.rows_used() <= rows);
            prop_assert_eq!(packing.hidden_count + per_row, items.len());
        }

        #[test]
        fn items_sharing_a_row_never_overlap(items in items(), rows in 1usize..12) {
            let p = PackParams::default().with_max_rows(rows).with_max_right(600);
            let packing = pack_rows(&items, &p);
            for row in 0..packing.rows_used() {
                let mut spans: Vec<(i32, i32)> = packing.placements.iter().enumerate()
                    .filter_map(|(i, pl)| pl.filter(|pl| pl.row == row).map(|pl| (pl.x, pl.x + items[i].width)))
                    .collect();
                spans.sort();
                for pair in spans.windows(2) {
                    prop_assert!(pair[0].1 <= pair[1].0);
                }
            }
        }
    }
}
