//! Screen implementations. Each screen is a top-level Component.

pub mod dashboard;
pub mod detail;
pub mod heroes;

use std::time::Duration;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use heroes_core::{Hero, HeroService};

use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

/// Create every screen component.
pub fn create_screens(
    service: &HeroService,
    search_debounce: Duration,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Dashboard,
            Box::new(dashboard::DashboardScreen::new(
                service.clone(),
                search_debounce,
            )),
        ),
        (
            ScreenId::Heroes,
            Box::new(heroes::HeroesScreen::new(service.clone())),
        ),
        (
            ScreenId::Detail,
            Box::new(detail::DetailScreen::new(service.clone())),
        ),
    ]
}

// ── Shared rendering helpers ────────────────────────────────────────

/// Rounded panel with a styled title.
fn panel(title: String, focused: bool) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(focused))
}

/// One hero as a list row: id badge then name.
fn hero_line(hero: &Hero, highlighted: bool) -> Line<'static> {
    let marker = if highlighted { "▸ " } else { "  " };
    let name_style = if highlighted {
        theme::table_selected()
    } else {
        theme::table_row()
    };
    Line::from(vec![
        Span::styled(marker, theme::border_focused()),
        Span::styled(format!("{:<6}", hero.id), Style::default().fg(theme::CORAL)),
        Span::styled(hero.name.clone(), name_style),
    ])
}

/// Window of `len` rows that keeps `cursor` visible in `height` lines.
fn visible_range(len: usize, cursor: usize, height: usize) -> std::ops::Range<usize> {
    if height == 0 {
        return 0..0;
    }
    let start = cursor.saturating_sub(height - 1);
    start..len.min(start + height)
}

/// Labelled single-line text field (label row plus bordered value box).
fn render_input_field(frame: &mut Frame, area: Rect, label: &str, value: &str, active: bool) {
    if area.height < 4 {
        return;
    }

    let label_style = if active {
        Style::default().fg(theme::NEON_CYAN)
    } else {
        Style::default().fg(theme::DIM_WHITE)
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_owned(), label_style)),
        Rect::new(area.x, area.y, area.width, 1),
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(active));
    let field = Rect::new(area.x, area.y + 1, area.width, 3);
    let inner = block.inner(field);
    frame.render_widget(block, field);

    let mut spans = vec![Span::styled(value.to_owned(), theme::table_row())];
    if active {
        spans.push(Span::styled("█", Style::default().fg(theme::ELECTRIC_PURPLE)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

/// Key hint line from (key, description) pairs.
fn hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in pairs {
        spans.push(Span::styled(format!(" {key} "), theme::key_hint_key()));
        spans.push(Span::styled((*desc).to_owned(), theme::key_hint()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_range_follows_cursor() {
        assert_eq!(visible_range(10, 0, 4), 0..4);
        assert_eq!(visible_range(10, 3, 4), 0..4);
        assert_eq!(visible_range(10, 4, 4), 1..5);
        assert_eq!(visible_range(10, 9, 4), 6..10);
        assert_eq!(visible_range(2, 0, 4), 0..2);
        assert_eq!(visible_range(5, 2, 0), 0..0);
    }
}
