//! Detail screen: edit one hero's name, save, or go back.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use heroes_core::{DetailState, HeroDetailPresenter, HeroId, HeroService};

use crate::action::Action;
use crate::component::Component;
use crate::effect;
use crate::navigator::ActionNavigator;
use crate::screen::Route;
use crate::theme;

pub struct DetailScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    service: HeroService,
    /// Rebuilt on every activation, so each visit starts clean.
    presenter: Option<HeroDetailPresenter<ActionNavigator>>,
    route_id: Option<HeroId>,
    error: Option<String>,
}

impl DetailScreen {
    pub fn new(service: HeroService) -> Self {
        Self {
            focused: false,
            action_tx: None,
            service,
            presenter: None,
            route_id: None,
            error: None,
        }
    }

    fn edit_name(&mut self, edit: impl FnOnce(&mut String)) {
        if let Some(hero) = self.presenter.as_mut().and_then(HeroDetailPresenter::hero_mut) {
            edit(&mut hero.name);
        }
    }

    fn save(&mut self) {
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };
        if presenter.state() == DetailState::Loaded {
            effect::detach(presenter.save());
        }
    }

    fn render_body(&self, frame: &mut Frame, area: Rect) {
        let muted = Style::default().fg(theme::BORDER_GRAY);

        if let Some(error) = &self.error {
            let line = Line::from(Span::styled(
                format!("  {error}"),
                Style::default().fg(theme::ERROR_RED),
            ));
            frame.render_widget(Paragraph::new(line), area);
            return;
        }

        let Some(presenter) = &self.presenter else {
            return;
        };

        match (presenter.state(), presenter.hero()) {
            (DetailState::Uninitialized | DetailState::Loading, _) => {
                let line = Line::from(Span::styled(
                    "  Loading hero...",
                    Style::default().fg(theme::ELECTRIC_YELLOW),
                ));
                frame.render_widget(Paragraph::new(line), area);
            }
            (_, None) => {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled("  Hero not found.", muted))),
                    area,
                );
            }
            (state, Some(hero)) => {
                let layout = Layout::vertical([
                    Constraint::Length(2), // id
                    Constraint::Length(4), // name field
                    Constraint::Min(0),
                ])
                .split(area);

                let id_line = Line::from(vec![
                    Span::styled("  id: ", Style::default().fg(theme::DIM_WHITE)),
                    Span::styled(hero.id.to_string(), Style::default().fg(theme::CORAL)),
                ]);
                frame.render_widget(Paragraph::new(id_line), layout[0]);

                super::render_input_field(
                    frame,
                    layout[1],
                    "name:",
                    &hero.name,
                    state == DetailState::Loaded,
                );

                if state == DetailState::Saving {
                    frame.render_widget(
                        Paragraph::new(Line::from(Span::styled("  Saving...", muted))),
                        layout[2],
                    );
                }
            }
        }
    }
}

impl Component for DetailScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn activate(&mut self, route: Route) -> Result<()> {
        let Some(tx) = self.action_tx.as_ref() else {
            return Ok(());
        };

        let mut presenter =
            HeroDetailPresenter::new(self.service.clone(), ActionNavigator::new(tx.clone()));
        self.error = None;
        self.route_id = None;

        if let Route::Detail(id) = route {
            self.route_id = Some(id);
            effect::spawn(tx, presenter.load_id(id), move |hero| {
                Action::DetailLoaded { id, hero }
            });
        } else {
            warn!(?route, "detail screen activated without a hero id");
            self.error = Some("no hero selected".into());
        }

        self.presenter = Some(presenter);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Esc => match &self.presenter {
                Some(presenter) => presenter.go_back(),
                None => return Ok(Some(Action::GoBack)),
            },
            KeyCode::Enter => self.save(),
            KeyCode::Backspace => self.edit_name(|name| {
                name.pop();
            }),
            KeyCode::Char(c) => self.edit_name(|name| name.push(c)),
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::DetailLoaded { id, hero } = action {
            // Results from an earlier visit are ignored
            if self.route_id != Some(*id) {
                return Ok(None);
            }
            if let Some(presenter) = self.presenter.as_mut() {
                if presenter.state() == DetailState::Loading {
                    presenter.apply_loaded(hero.clone());
                }
            }
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let title = self
            .presenter
            .as_ref()
            .and_then(HeroDetailPresenter::hero)
            .map_or_else(
                || " Hero Details ".to_owned(),
                |hero| format!(" {} Details ", hero.name.to_uppercase()),
            );
        let block = super::panel(title, self.focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
        self.render_body(frame, layout[0]);
        frame.render_widget(
            Paragraph::new(super::hints(&[("Enter", "save"), ("Esc", "back")])),
            layout[1],
        );
    }

    fn captures_input(&self) -> bool {
        true
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crossterm::event::KeyModifiers;
    use heroes_core::{Hero, MessageLog, ServiceConfig};
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;

    use super::*;

    fn screen() -> (DetailScreen, mpsc::UnboundedReceiver<Action>) {
        let config = ServiceConfig::new("http://127.0.0.1:1".parse().unwrap());
        let service = HeroService::new(&config, MessageLog::new()).unwrap();
        let mut screen = DetailScreen::new(service);
        let (tx, rx) = mpsc::unbounded_channel();
        screen.init(tx).unwrap();
        (screen, rx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn loaded_hero_is_editable() {
        let (mut s, _rx) = screen();
        s.activate(Route::Detail(HeroId(7))).unwrap();
        s.update(&Action::DetailLoaded {
            id: HeroId(7),
            hero: Some(Hero::new(7, "Echo")),
        })
        .unwrap();

        s.handle_key_event(key(KeyCode::Backspace)).unwrap();
        s.handle_key_event(key(KeyCode::Char('0'))).unwrap();

        let hero = s.presenter.as_ref().and_then(HeroDetailPresenter::hero);
        assert_eq!(hero, Some(&Hero::new(7, "Ech0")));
    }

    #[tokio::test]
    async fn stale_load_from_earlier_visit_is_ignored() {
        let (mut s, _rx) = screen();
        s.activate(Route::Detail(HeroId(8))).unwrap();

        s.update(&Action::DetailLoaded {
            id: HeroId(7),
            hero: Some(Hero::new(7, "Echo")),
        })
        .unwrap();

        let presenter = s.presenter.as_ref().unwrap();
        assert_eq!(presenter.state(), DetailState::Loading);
        assert!(presenter.hero().is_none());
    }

    #[tokio::test]
    async fn escape_navigates_back() {
        let (mut s, mut rx) = screen();
        s.activate(Route::Detail(HeroId(7))).unwrap();

        s.handle_key_event(key(KeyCode::Esc)).unwrap();

        assert!(matches!(rx.recv().await, Some(Action::GoBack)));
    }

    #[test]
    fn route_without_id_shows_error() {
        let (mut s, _rx) = screen();
        s.activate(Route::Heroes).unwrap();
        assert!(s.error.is_some());
    }
}
