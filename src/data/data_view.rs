use std::sync::Arc;

use crate::data::datatable::{Dataset, Row};

/// An order-preserving subsequence of a Dataset's rows.
///
/// Holds indices into the shared, immutable source instead of copying rows,
/// so cloning a view (for a view-state snapshot) is cheap.
#[derive(Debug, Clone)]
pub struct FilteredView {
    /// The underlying immutable data source
    source: Arc<Dataset>,

    /// Source row indices that are visible, strictly increasing
    visible_rows: Arc<[usize]>,
}

impl FilteredView {
    /// Create a view showing every row of the dataset
    pub fn new(source: Arc<Dataset>) -> Self {
        let visible_rows: Arc<[usize]> = (0..source.row_count()).collect();
        Self {
            source,
            visible_rows,
        }
    }

    /// Create a view from row indices.
    ///
    /// Indices are sorted and deduplicated, and out-of-range indices dropped,
    /// so the result is always a true subsequence of the source.
    pub fn with_rows(source: Arc<Dataset>, mut rows: Vec<usize>) -> Self {
        let row_count = source.row_count();
        rows.retain(|&idx| idx < row_count);
        rows.sort_unstable();
        rows.dedup();
        Self {
            source,
            visible_rows: rows.into(),
        }
    }

    /// Get the number of visible rows
    pub fn row_count(&self) -> usize {
        self.visible_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible_rows.is_empty()
    }

    /// Get a visible row by its position in the view
    pub fn get_row(&self, index: usize) -> Option<&Row> {
        let source_idx = *self.visible_rows.get(index)?;
        self.source.get_row(source_idx)
    }

    /// Iterate visible rows in order
    pub fn rows(&self) -> impl Iterator<Item = &Row> + '_ {
        self.visible_rows
            .iter()
            .filter_map(move |&idx| self.source.get_row(idx))
    }

    /// Visible rows in `start..start + count`, clipped to the view
    pub fn slice(&self, start: usize, count: usize) -> Vec<&Row> {
        let start = start.min(self.row_count());
        let end = start.saturating_add(count).min(self.row_count());
        (start..end).filter_map(|i| self.get_row(i)).collect()
    }

    /// Get the source Dataset
    pub fn source(&self) -> &Arc<Dataset> {
        &self.source
    }

    /// Get visible source row indices
    pub fn visible_row_indices(&self) -> &[usize] {
        &self.visible_rows
    }

    /// True when every source row is visible
    pub fn is_unfiltered(&self) -> bool {
        self.visible_rows.len() == self.source.row_count()
    }
}

/// Two views are equal when they select the same rows of the same source
impl PartialEq for FilteredView {
    fn eq(&self, other: &Self) -> bool {
        (Arc::ptr_eq(&self.source, &other.source) || self.source == other.source)
            && self.visible_rows == other.visible_rows
    }
}

impl Eq for FilteredView {}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Arc<Dataset> {
        let columns = vec!["id".to_string(), "name".to_string()];
        let rows = (0..10)
            .map(|i| vec![i.to_string(), format!("name{}", i)])
            .collect();
        Arc::new(Dataset::new("t", columns, rows))
    }

    #[test]
    fn test_new_view_shows_all_rows() {
        let view = FilteredView::new(dataset());
        assert_eq!(view.row_count(), 10);
        assert!(view.is_unfiltered());
        assert_eq!(view.get_row(3).map(|r| r[0].as_str()), Some("3"));
    }

    #[test]
    fn test_with_rows_keeps_source_order() {
        let view = FilteredView::with_rows(dataset(), vec![7, 2, 2, 42, 5]);
        assert_eq!(view.visible_row_indices(), &[2, 5, 7]);
        let ids: Vec<&str> = view.rows().map(|r| r[0].as_str()).collect();
        assert_eq!(ids, vec!["2", "5", "7"]);
    }

    #[test]
    fn test_slice_is_clipped() {
        let view = FilteredView::new(dataset());
        assert_eq!(view.slice(8, 5).len(), 2);
        assert!(view.slice(20, 5).is_empty());
    }

    #[test]
    fn test_equality_by_selected_rows() {
        let ds = dataset();
        let a = FilteredView::with_rows(ds.clone(), vec![1, 2]);
        let b = FilteredView::with_rows(ds.clone(), vec![2, 1]);
        let c = FilteredView::with_rows(ds, vec![1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
