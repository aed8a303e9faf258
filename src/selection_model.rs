/// Bounded cursor over a list of `len` items.
///
/// The cursor is `None` exactly when the list is empty; otherwise it always
/// lies in `[0, len - 1]`. Used for the row cursor in the filtered view and
/// for the table list.
///
/// `top` is the first row of the on-screen window. It only moves when the
/// cursor would otherwise leave the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionModel {
    len: usize,
    cursor: Option<usize>,
    top: usize,
}

impl SelectionModel {
    /// Cursor at the first item, or inactive when `len` is 0
    pub fn new(len: usize) -> Self {
        Self {
            len,
            cursor: if len > 0 { Some(0) } else { None },
            top: 0,
        }
    }

    #[inline]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// First row of the on-screen window
    #[inline]
    pub fn top(&self) -> usize {
        self.top
    }

    /// Move the window just far enough to keep the cursor among `height` rows
    pub fn scroll_into_view(&mut self, height: usize) {
        let top = window_start(self.top, self.cursor, height);
        self.top = top.min(self.len.saturating_sub(height.max(1)));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Replace the list length and reset the cursor to the first item
    pub fn reset(&mut self, len: usize) {
        *self = Self::new(len);
    }

    /// Replace the list length, keeping the cursor but clamping it into range
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.cursor = match (self.cursor, len) {
            (_, 0) => None,
            (Some(c), _) => Some(c.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    /// Move to an absolute position, clamped into range
    pub fn set_cursor(&mut self, index: usize) {
        if self.len > 0 {
            self.cursor = Some(index.min(self.len - 1));
        }
    }

    pub fn move_up(&mut self) {
        self.move_up_by(1);
    }

    pub fn move_down(&mut self) {
        self.move_down_by(1);
    }

    pub fn move_up_by(&mut self, count: usize) {
        if let Some(c) = self.cursor {
            self.cursor = Some(c.saturating_sub(count));
        }
    }

    pub fn move_down_by(&mut self, count: usize) {
        if let Some(c) = self.cursor {
            self.set_cursor(c.saturating_add(count));
        }
    }

    pub fn home(&mut self) {
        self.set_cursor(0);
    }

    pub fn end(&mut self) {
        if self.len > 0 {
            self.set_cursor(self.len - 1);
        }
    }
}

/// Smallest shift of a window starting at `top` that keeps `cursor` inside
/// `height` rows
pub fn window_start(top: usize, cursor: Option<usize>, height: usize) -> usize {
    let height = height.max(1);
    match cursor {
        None => 0,
        Some(c) if c < top => c,
        Some(c) if c >= top + height => c + 1 - height,
        Some(_) => top,
    }
}

/// Point-in-time column -> value projection of one row.
///
/// A copy, not a view: later dataset changes do not affect it. Field order
/// follows the source column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailSnapshot {
    table: String,
    row_index: usize,
    fields: Vec<(String, String)>,
}

impl DetailSnapshot {
    /// Project `columns[i] -> row[i]` for `i < min(columns.len(), row.len())`.
    ///
    /// Cells missing from a short row are omitted. A repeated column name
    /// keeps its first position and takes the later value.
    pub fn capture(table: &str, row_index: usize, columns: &[String], row: &[String]) -> Self {
        let mut fields: Vec<(String, String)> = Vec::with_capacity(columns.len().min(row.len()));
        for (name, value) in columns.iter().zip(row.iter()) {
            match fields.iter_mut().find(|(existing, _)| existing == name) {
                Some(field) => field.1 = value.clone(),
                None => fields.push((name.clone(), value.clone())),
            }
        }
        Self {
            table: table.to_string(),
            row_index,
            fields,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Index of the row within the filtered view at capture time
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Width of the longest field name, for label alignment
    pub fn max_name_width(&self) -> usize {
        self.fields
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_empty() {
        assert_eq!(SelectionModel::new(3).cursor(), Some(0));
        let empty = SelectionModel::new(0);
        assert_eq!(empty.cursor(), None);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_movement_is_clamped() {
        let mut sel = SelectionModel::new(3);
        sel.move_up();
        assert_eq!(sel.cursor(), Some(0));
        sel.move_down_by(10);
        assert_eq!(sel.cursor(), Some(2));
        sel.move_down();
        assert_eq!(sel.cursor(), Some(2));
        sel.move_up_by(5);
        assert_eq!(sel.cursor(), Some(0));
        sel.end();
        assert_eq!(sel.cursor(), Some(2));
        sel.home();
        assert_eq!(sel.cursor(), Some(0));
    }

    #[test]
    fn test_resize_reclamps() {
        let mut sel = SelectionModel::new(10);
        sel.set_cursor(8);
        sel.resize(4);
        assert_eq!(sel.cursor(), Some(3));
        sel.resize(0);
        assert_eq!(sel.cursor(), None);
        sel.resize(2);
        assert_eq!(sel.cursor(), Some(0));
    }

    #[test]
    fn test_inactive_cursor_ignores_moves() {
        let mut sel = SelectionModel::new(0);
        sel.move_down();
        sel.end();
        sel.set_cursor(4);
        assert_eq!(sel.cursor(), None);
    }

    #[test]
    fn test_cursor_stays_in_bounds_for_all_sizes() {
        for len in 0..6 {
            let mut sel = SelectionModel::new(len);
            for step in 0..20 {
                match step % 4 {
                    0 => sel.move_down_by(step),
                    1 => sel.move_up(),
                    2 => sel.resize((len + step) % 7),
                    _ => sel.end(),
                }
                match sel.cursor() {
                    Some(c) => assert!(c < sel.len()),
                    None => assert_eq!(sel.len(), 0),
                }
            }
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_detail_snapshot_projection() {
        let columns = strings(&["id", "name", "email"]);
        let snap = DetailSnapshot::capture("users", 2, &columns, &strings(&["3", "Carol", "NULL"]));
        assert_eq!(snap.len(), 3);
        assert_eq!(snap.get("name"), Some("Carol"));
        assert_eq!(snap.get("email"), Some("NULL"));
        assert_eq!(snap.row_index(), 2);
        assert_eq!(snap.table(), "users");
        assert_eq!(snap.max_name_width(), 5);
    }

    #[test]
    fn test_detail_snapshot_short_row_omits_cells() {
        let columns = strings(&["id", "name", "email"]);
        let snap = DetailSnapshot::capture("users", 0, &columns, &strings(&["1"]));
        assert_eq!(snap.fields(), &[("id".to_string(), "1".to_string())]);
        assert_eq!(snap.get("name"), None);
    }

    #[test]
    fn test_detail_snapshot_duplicate_columns() {
        let columns = strings(&["id", "id"]);
        let snap = DetailSnapshot::capture("t", 0, &columns, &strings(&["1", "2"]));
        assert_eq!(snap.fields(), &[("id".to_string(), "2".to_string())]);
    }

    #[test]
    fn test_window_moves_only_when_cursor_leaves_it() {
        let mut sel = SelectionModel::new(50);
        sel.set_cursor(30);
        sel.scroll_into_view(10);
        assert_eq!(sel.top(), 21);

        // Moving up inside the window leaves it in place
        sel.move_up_by(5);
        sel.scroll_into_view(10);
        assert_eq!(sel.top(), 21);

        sel.move_up_by(4);
        sel.scroll_into_view(10);
        assert_eq!(sel.top(), 21);

        // One past the top edge drags it along
        sel.move_up();
        sel.scroll_into_view(10);
        assert_eq!(sel.top(), 20);

        sel.move_down_by(9);
        sel.scroll_into_view(10);
        assert_eq!(sel.top(), 20);

        sel.reset(3);
        assert_eq!(sel.top(), 0);
    }

    #[test]
    fn test_window_start_without_cursor() {
        assert_eq!(window_start(7, None, 10), 0);
        assert_eq!(window_start(0, Some(4), 0), 4);
    }
}
