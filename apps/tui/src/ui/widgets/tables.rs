use std::ops::Range;

/// Rows of a `total`-row table to draw in `height` rows so that `selected`
/// stays on screen. The window only moves once the selection leaves it.
pub fn visible_rows(total: usize, height: usize, selected: usize) -> Range<usize> {
    if total <= height {
        return 0..total;
    }
    let selected = selected.min(total - 1);
    let start = (selected + 1).saturating_sub(height);
    start..start + height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_tables_show_every_row() {
        assert_eq!(visible_rows(5, 10, 4), 0..5);
    }

    #[test]
    fn window_follows_the_selection() {
        assert_eq!(visible_rows(20, 5, 2), 0..5);
        assert_eq!(visible_rows(20, 5, 5), 1..6);
        assert_eq!(visible_rows(20, 5, 19), 15..20);
        assert_eq!(visible_rows(20, 5, 40), 15..20);
    }

    #[test]
    fn zero_height_shows_nothing() {
        assert!(visible_rows(3, 0, 1).is_empty());
    }
}
