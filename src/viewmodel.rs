use crate::format::{format_label, substation_info, voltage_level_info};
use crate::index::{ExplorerIndex, Row};
use crate::opt::ExplorerOpt;
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify))]
#[serde(rename_all = "camelCase")]
pub enum RowKind {
    Substation,
    VoltageLevel,
}

/// RowView is what a virtualized list needs to draw one row.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[cfg_attr(target_arch = "wasm32", derive(tsify::Tsify), tsify(into_wasm_abi))]
#[serde(rename_all = "camelCase")]
pub struct RowView {
    /// Stable row key: the substation id for headers,
    /// `<substation id>/<voltage level id>` otherwise.
    pub key: String,
    pub kind: RowKind,

    /// Substation id, for both row kinds.
    pub substation_id: String,
    /// Voltage level id, voltage level rows only.
    pub voltage_level_id: Option<String>,

    /// Primary text.
    pub label: String,
    /// Secondary text (country or nominal voltage).
    pub secondary: String,

    /// Offset of the row from the top of the list.
    pub top: f64,
    pub height: f64,
}

/// ListViewModel adapts an [`ExplorerIndex`] to a virtualized list with
/// fixed header and item heights. It makes no filtering or ordering
/// decision of its own.
pub struct ListViewModel<'a> {
    index: &'a ExplorerIndex,
    use_name: bool,
    item_height: f64,
    header_height: f64,
    overscan: usize,

    // Top of each substation header, ascending.
    tops: Vec<f64>,
    total_height: f64,
}

impl<'a> ListViewModel<'a> {
    pub fn new(index: &'a ExplorerIndex, opt: &ExplorerOpt) -> Self {
        let (ih, hh) = (opt.item_height, opt.header_height);

        // Tops accumulate in display order so that row_top and
        // row_at_offset see the same rounded values.
        let offsets = index.offsets();
        let mut tops = Vec::with_capacity(offsets.len());
        let mut y = 0.0;
        for (k, &o) in offsets.iter().enumerate() {
            tops.push(y);
            let next = offsets.get(k + 1).map_or(index.row_count(), |&next| next);
            y = y + hh + (next - o - 1) as f64 * ih;
        }
        let total_height = y;

        Self {
            index,
            use_name: index.use_name(),
            item_height: ih,
            header_height: hh,
            overscan: opt.overscan,
            tops,
            total_height,
        }
    }

    pub fn row_count(&self) -> usize {
        self.index.row_count()
    }

    pub fn total_height(&self) -> f64 {
        self.total_height
    }

    pub fn row_height(&self, index: usize) -> Option<f64> {
        self.index.row_at(index).map(|row| self.height_of(&row))
    }

    /// Offset of a row from the top of the list.
    pub fn row_top(&self, index: usize) -> Option<f64> {
        if index >= self.row_count() {
            return None;
        }
        let k = self.index.entry_of(index);
        Some(self.top_in(k, index - self.index.offsets()[k]))
    }

    /// Row displayed at vertical offset `y`, clamped to the list bounds.
    /// Returns `None` for an empty list.
    pub fn row_at_offset(&self, y: f64) -> Option<usize> {
        if self.tops.is_empty() {
            return None;
        }
        let y = y.max(0.0);
        let k = self.tops.partition_point(|&t| t <= y).max(1) - 1;
        let first = self.index.offsets()[k];
        let last = self
            .index
            .offsets()
            .get(k + 1)
            .map_or(self.row_count(), |&next| next)
            - 1;
        if last == first {
            return Some(first);
        }

        // Estimate, clamped to the substation's rows before any usize math.
        let n = (y - self.tops[k] - self.header_height) / self.item_height;
        let mut row = if n < 0.0 {
            first
        } else {
            first + 1 + n.floor().min((last - first - 1) as f64) as usize
        };

        // The estimate may be off by rounding: settle on the exact tops.
        while row > first && self.top_in(k, row - first) > y {
            row -= 1;
        }
        while row < last && self.top_in(k, row + 1 - first) <= y {
            row += 1;
        }
        Some(row)
    }

    /// Rows intersecting the viewport, widened by the overscan.
    pub fn visible_range(&self, scroll_top: f64, viewport_height: f64) -> Range<usize> {
        let first = match self.row_at_offset(scroll_top) {
            Some(first) => first,
            None => return 0..0,
        };
        let bottom = scroll_top.max(0.0) + viewport_height.max(0.0);
        let last = if bottom >= self.total_height {
            self.row_count() - 1
        } else {
            // A row starting exactly at the bottom edge is not visible.
            let mut last = self.row_at_offset(bottom).unwrap_or(first);
            if last > first && self.row_top(last) == Some(bottom) {
                last -= 1;
            }
            last
        };

        let start = first.saturating_sub(self.overscan);
        let end = (last + 1).saturating_add(self.overscan).min(self.row_count());
        start..end
    }

    pub fn row(&self, index: usize) -> Option<RowView> {
        let row = self.index.row_at(index)?;
        let top = self.row_top(index)?;
        let height = self.height_of(&row);

        let view = match row {
            Row::Substation(s) => RowView {
                key: s.id.clone(),
                kind: RowKind::Substation,
                substation_id: s.id.clone(),
                voltage_level_id: None,
                label: format_label(s, self.use_name),
                secondary: substation_info(s),
                top,
                height,
            },
            Row::VoltageLevel(s, vl) => RowView {
                key: format!("{}/{}", s.id, vl.id),
                kind: RowKind::VoltageLevel,
                substation_id: s.id.clone(),
                voltage_level_id: Some(vl.id.clone()),
                label: format_label(vl, self.use_name),
                secondary: voltage_level_info(vl),
                top,
                height,
            },
        };
        Some(view)
    }

    /// Row views of the visible range.
    pub fn window(&self, scroll_top: f64, viewport_height: f64) -> Vec<RowView> {
        self.visible_range(scroll_top, viewport_height)
            .filter_map(|i| self.row(i))
            .collect()
    }

    // Top of the n-th row of the k-th substation, header being n = 0.
    fn top_in(&self, k: usize, n: usize) -> f64 {
        match n {
            0 => self.tops[k],
            n => self.tops[k] + self.header_height + (n - 1) as f64 * self.item_height,
        }
    }

    fn height_of(&self, row: &Row) -> f64 {
        if row.is_header() {
            self.header_height
        } else {
            self.item_height
        }
    }
}
