use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// A centred overlay covering the given share of `area`, never shorter than
/// `min_height` rows while `area` allows it.
pub fn popup_area(area: Rect, percent_x: u16, percent_y: u16, min_height: u16) -> Rect {
    let share = u32::from(area.height) * u32::from(percent_y) / 100;
    let height = u16::try_from(share)
        .unwrap_or(area.height)
        .max(min_height)
        .min(area.height);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .areas(row);
    popup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centred_and_respects_the_minimum() {
        let screen = Rect::new(0, 0, 100, 40);
        let popup = popup_area(screen, 60, 20, 5);
        assert_eq!((popup.width, popup.height), (60, 8));
        assert_eq!(popup.x, 20);

        let tall = popup_area(screen, 60, 5, 5);
        assert_eq!(tall.height, 5);

        let tiny = popup_area(Rect::new(0, 0, 20, 3), 50, 50, 5);
        assert_eq!(tiny.height, 3);
    }
}
