use pg_explorer::data::datatable::Dataset;
use pg_explorer::search_filter::filter_rows;
use pg_explorer::selection_model::SelectionModel;
use pg_explorer::ui::viewport::{ColumnWindow, ScrollDirection};
use std::sync::Arc;

/// Deterministic datasets of varying shape, including empty ones
fn datasets() -> Vec<Arc<Dataset>> {
    let words = ["Alice", "bob", "CAROL", "dave", "NULL", "", "Ali Baba", "ALI"];
    (0..6)
        .map(|n| {
            let rows = (0..n * 7)
                .map(|i| {
                    vec![
                        i.to_string(),
                        words[i % words.len()].to_string(),
                        words[(i * 3 + 1) % words.len()].to_string(),
                    ]
                })
                .collect();
            Arc::new(Dataset::new(
                format!("t{}", n),
                vec!["id".to_string(), "a".to_string(), "b".to_string()],
                rows,
            ))
        })
        .collect()
}

const QUERIES: [&str; 8] = ["", "ali", "ALI", "o", "null", "1", "zzz", " "];

#[test]
fn test_filter_is_idempotent() {
    for dataset in datasets() {
        for query in QUERIES {
            let first = filter_rows(&dataset, query);
            let second = filter_rows(&dataset, query);
            assert_eq!(first, second, "query {:?} on {}", query, dataset);
        }
    }
}

#[test]
fn test_empty_query_is_full_dataset() {
    for dataset in datasets() {
        let view = filter_rows(&dataset, "");
        let expected: Vec<usize> = (0..dataset.row_count()).collect();
        assert_eq!(view.visible_row_indices(), expected.as_slice());
        assert!(view.is_unfiltered());
    }
}

#[test]
fn test_filter_is_ordered_subsequence() {
    for dataset in datasets() {
        for query in QUERIES {
            let view = filter_rows(&dataset, query);
            let indices = view.visible_row_indices();
            assert!(indices.windows(2).all(|w| w[0] < w[1]));
            assert!(indices.iter().all(|&i| i < dataset.row_count()));

            // Every kept row matches, every dropped row does not
            let needle = query.to_lowercase();
            for (i, row) in dataset.rows().iter().enumerate() {
                let matches = row.iter().any(|c| c.to_lowercase().contains(&needle));
                assert_eq!(indices.contains(&i), matches, "row {} query {:?}", i, query);
            }
        }
    }
}

#[test]
fn test_case_insensitive_queries_agree() {
    for dataset in datasets() {
        assert_eq!(filter_rows(&dataset, "ali"), filter_rows(&dataset, "ALI"));
    }
}

#[test]
fn test_scroll_offset_always_in_range() {
    for count in 0..8usize {
        let mut window = ColumnWindow::new(count);
        for step in 0..40usize {
            let direction = if (step / 3) % 2 == 0 {
                ScrollDirection::Right
            } else {
                ScrollDirection::Left
            };
            window.scroll(direction);
            assert!(window.offset() <= count.saturating_sub(1));
        }

        window.reset();
        assert!(!window.scroll(ScrollDirection::Left));
        for _ in 0..count {
            window.scroll(ScrollDirection::Right);
        }
        assert_eq!(window.offset(), count.saturating_sub(1));
        assert!(!window.scroll(ScrollDirection::Right));
    }
}

#[test]
fn test_cursor_reclamped_when_view_changes() {
    for dataset in datasets() {
        let full = filter_rows(&dataset, "");
        let mut selection = SelectionModel::new(full.row_count());
        selection.end();

        for query in QUERIES {
            let view = filter_rows(&dataset, query);
            selection.resize(view.row_count());
            match selection.cursor() {
                Some(c) => assert!(c < view.row_count()),
                None => assert!(view.is_empty()),
            }
            selection.end();
        }
    }
}
