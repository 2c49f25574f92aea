//! Heroes screen: the full collection with add, delete, and open.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::UnboundedSender;

use heroes_core::{HeroService, HeroesPresenter};

use crate::action::Action;
use crate::component::Component;
use crate::effect;
use crate::screen::Route;
use crate::theme;

pub struct HeroesScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    presenter: HeroesPresenter,
    cursor: usize,
    /// Name being typed for a new hero; `Some` while the add field is open.
    new_name: Option<String>,
    loading: bool,
}

impl HeroesScreen {
    pub fn new(service: HeroService) -> Self {
        Self {
            focused: false,
            action_tx: None,
            presenter: HeroesPresenter::new(service),
            cursor: 0,
            new_name: None,
            loading: false,
        }
    }

    fn move_cursor(&mut self, to: usize) {
        let len = self.presenter.heroes().len();
        self.cursor = to.min(len.saturating_sub(1));
        let hero = self.presenter.heroes().get(self.cursor).cloned();
        self.presenter.select(hero);
    }

    fn submit_new_hero(&mut self) {
        let Some(name) = self.new_name.take() else {
            return;
        };
        let Some(tx) = self.action_tx.as_ref() else {
            return;
        };
        if let Some(add) = self.presenter.add(&name) {
            effect::spawn(tx, add, Action::HeroAdded);
        }
    }

    fn delete_selected(&mut self) {
        let Some(hero) = self.presenter.selected().cloned() else {
            return;
        };
        effect::detach(self.presenter.delete(&hero));
        self.move_cursor(self.cursor);
    }

    fn handle_name_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => self.new_name = None,
            KeyCode::Enter => self.submit_new_hero(),
            KeyCode::Backspace => {
                if let Some(name) = self.new_name.as_mut() {
                    name.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(name) = self.new_name.as_mut() {
                    name.push(c);
                }
            }
            _ => {}
        }
        None
    }
}

impl Component for HeroesScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn activate(&mut self, _route: Route) -> Result<()> {
        self.new_name = None;
        if let Some(tx) = self.action_tx.as_ref() {
            self.loading = true;
            effect::spawn(tx, self.presenter.load(), Action::HeroesLoaded);
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.new_name.is_some() {
            return Ok(self.handle_name_input(key));
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_cursor(self.cursor + 1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_cursor(self.cursor.saturating_sub(1));
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.move_cursor(0);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.move_cursor(usize::MAX);
                None
            }
            KeyCode::Char('a') => {
                self.new_name = Some(String::new());
                None
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                self.delete_selected();
                None
            }
            KeyCode::Enter => self
                .presenter
                .selected()
                .map(|hero| Action::OpenDetail(hero.id)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::HeroesLoaded(heroes) => {
                self.presenter.apply_loaded(heroes.clone());
                self.loading = false;
                self.move_cursor(self.cursor);
            }
            Action::HeroAdded(Some(hero)) => {
                self.presenter.apply_added(hero.clone());
                self.move_cursor(usize::MAX);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let heroes = self.presenter.heroes();
        let block = super::panel(format!(" My Heroes ({}) ", heroes.len()), self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_height = if self.new_name.is_some() { 4 } else { 0 };
        let layout = Layout::vertical([
            Constraint::Min(1),               // list
            Constraint::Length(input_height), // add field
            Constraint::Length(1),            // hints
        ])
        .split(inner);

        let list_area = layout[0];
        let mut lines = vec![Line::from(vec![
            Span::styled("  ID    ", theme::table_header()),
            Span::styled("Name", theme::table_header()),
        ])];

        if heroes.is_empty() {
            let text = if self.loading {
                "  Loading heroes..."
            } else {
                "  No heroes."
            };
            lines.push(Line::from(Span::styled(
                text,
                Style::default().fg(theme::BORDER_GRAY),
            )));
        } else {
            let height = usize::from(list_area.height).saturating_sub(1);
            let selected = self.presenter.selected();
            for hero in heroes
                .get(super::visible_range(heroes.len(), self.cursor, height))
                .unwrap_or_default()
            {
                lines.push(super::hero_line(hero, selected == Some(hero)));
            }
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        if let Some(name) = &self.new_name {
            super::render_input_field(frame, layout[1], "Hero name:", name, true);
        }

        let hint_line = if self.new_name.is_some() {
            super::hints(&[("Enter", "add"), ("Esc", "cancel")])
        } else {
            super::hints(&[
                ("j/k", "move"),
                ("Enter", "open"),
                ("a", "add"),
                ("d", "delete"),
            ])
        };
        frame.render_widget(Paragraph::new(hint_line), layout[2]);
    }

    fn captures_input(&self) -> bool {
        self.new_name.is_some()
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use heroes_core::{Hero, HeroId, MessageLog, ServiceConfig};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    fn screen() -> HeroesScreen {
        let config = ServiceConfig::new("http://127.0.0.1:1".parse().unwrap());
        let service = HeroService::new(&config, MessageLog::new()).unwrap();
        let mut screen = HeroesScreen::new(service);
        let (tx, _rx) = mpsc::unbounded_channel();
        screen.init(tx).unwrap();
        screen
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded(screen: &mut HeroesScreen) {
        let heroes = vec![Hero::new(11, "Mr. Nice"), Hero::new(12, "Narco")];
        screen.update(&Action::HeroesLoaded(heroes)).unwrap();
    }

    #[test]
    fn add_field_captures_typing_until_cancelled() {
        let mut s = screen();
        s.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        assert!(s.captures_input());

        for c in "qz".chars() {
            s.handle_key_event(key(KeyCode::Char(c))).unwrap();
        }
        s.handle_key_event(key(KeyCode::Backspace)).unwrap();
        assert_eq!(s.new_name.as_deref(), Some("q"));

        s.handle_key_event(key(KeyCode::Esc)).unwrap();
        assert!(!s.captures_input());
    }

    #[test]
    fn blank_name_closes_field_without_adding() {
        let mut s = screen();
        s.handle_key_event(key(KeyCode::Char('a'))).unwrap();
        s.handle_key_event(key(KeyCode::Char(' '))).unwrap();
        s.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert!(!s.captures_input());
        assert!(s.presenter.heroes().is_empty());
    }

    #[test]
    fn enter_opens_selected_hero() {
        let mut s = screen();
        loaded(&mut s);
        s.handle_key_event(key(KeyCode::Char('j'))).unwrap();

        let action = s.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert!(matches!(action, Some(Action::OpenDetail(HeroId(12)))));
    }

    #[test]
    fn added_hero_is_appended_and_selected() {
        let mut s = screen();
        loaded(&mut s);

        s.update(&Action::HeroAdded(Some(Hero::new(42, "Zorro"))))
            .unwrap();

        assert_eq!(s.presenter.heroes().len(), 3);
        assert_eq!(s.presenter.selected(), Some(&Hero::new(42, "Zorro")));
    }

    #[tokio::test]
    async fn delete_removes_selected_row_immediately() {
        let mut s = screen();
        loaded(&mut s);

        s.handle_key_event(key(KeyCode::Char('d'))).unwrap();

        assert_eq!(s.presenter.heroes(), &[Hero::new(12, "Narco")]);
        assert_eq!(s.presenter.selected(), Some(&Hero::new(12, "Narco")));
    }
}
