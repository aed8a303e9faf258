use tracing::trace;

use crate::ui::viewport::column_width_calculator::header_width;

/// Horizontal scroll direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// A column in the visible slice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleColumn {
    /// Index in the dataset's column order
    pub index: usize,
    pub name: String,
    pub width: u16,
}

/// Horizontal scroll state over a fixed number of columns.
///
/// The offset always lies in `[0, max(0, column_count - 1)]`. The visible
/// slice starts at the offset and runs to the last column, without wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnWindow {
    column_count: usize,
    offset: usize,
}

impl ColumnWindow {
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count,
            offset: 0,
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Largest valid offset
    pub fn max_offset(&self) -> usize {
        self.column_count.saturating_sub(1)
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// Move the offset by one column. Returns false when already at the edge.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        let before = self.offset;
        match direction {
            ScrollDirection::Left => self.offset = self.offset.saturating_sub(1),
            ScrollDirection::Right => {
                if self.offset < self.max_offset() {
                    self.offset += 1;
                }
            }
        }
        trace!(target: "scroll", "{:?}: offset {} -> {}", direction, before, self.offset);
        before != self.offset
    }

    /// Column indices in the visible slice
    pub fn visible_range(&self) -> std::ops::Range<usize> {
        self.offset.min(self.column_count)..self.column_count
    }

    /// Visible columns with their display widths
    pub fn visible_columns(&self, names: &[String]) -> Vec<VisibleColumn> {
        self.visible_range()
            .filter_map(|index| {
                names.get(index).map(|name| VisibleColumn {
                    index,
                    name: name.clone(),
                    width: header_width(name),
                })
            })
            .collect()
    }
}
