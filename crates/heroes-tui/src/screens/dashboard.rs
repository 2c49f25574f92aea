//! Dashboard screen: top heroes plus the hero search box.

use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::UnboundedSender;

use heroes_core::{DashboardPresenter, Hero, HeroSearchPresenter, HeroService};

use crate::action::Action;
use crate::component::Component;
use crate::effect;
use crate::screen::Route;
use crate::theme;

pub struct DashboardScreen {
    focused: bool,
    action_tx: Option<UnboundedSender<Action>>,
    presenter: DashboardPresenter,
    search: HeroSearchPresenter,
    cursor: usize,
    /// Whether keys go to the search box.
    searching: bool,
    search_cursor: usize,
}

impl DashboardScreen {
    pub fn new(service: HeroService, search_debounce: Duration) -> Self {
        Self {
            focused: false,
            action_tx: None,
            presenter: DashboardPresenter::new(service.clone()),
            search: HeroSearchPresenter::with_debounce(service, search_debounce),
            cursor: 0,
            searching: false,
            search_cursor: 0,
        }
    }

    /// Feed a new search term through the debounce.
    fn search_input(&mut self, term: String) {
        let Some(tx) = self.action_tx.as_ref() else {
            return;
        };
        effect::spawn(tx, self.search.input(term), Action::SearchSettled);
    }

    fn open(hero: Option<&Hero>) -> Option<Action> {
        hero.map(|hero| Action::OpenDetail(hero.id))
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.searching = false;
                None
            }
            KeyCode::Enter => Self::open(self.search.results().get(self.search_cursor)),
            KeyCode::Down => {
                let last = self.search.results().len().saturating_sub(1);
                self.search_cursor = (self.search_cursor + 1).min(last);
                None
            }
            KeyCode::Up => {
                self.search_cursor = self.search_cursor.saturating_sub(1);
                None
            }
            KeyCode::Backspace => {
                let mut term = self.search.term().to_owned();
                term.pop();
                self.search_input(term);
                None
            }
            KeyCode::Char(c) => {
                let mut term = self.search.term().to_owned();
                term.push(c);
                self.search_input(term);
                None
            }
            _ => None,
        }
    }

    fn render_top_heroes(&self, frame: &mut Frame, area: Rect) {
        let block = super::panel(" Top Heroes ".into(), self.focused && !self.searching);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let top = self.presenter.top_heroes();
        let lines: Vec<Line> = if top.is_empty() {
            vec![Line::from(Span::styled(
                "  No heroes to show.",
                Style::default().fg(theme::BORDER_GRAY),
            ))]
        } else {
            top.iter()
                .enumerate()
                .map(|(i, hero)| super::hero_line(hero, !self.searching && i == self.cursor))
                .collect()
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let block = super::panel(" Hero Search ".into(), self.focused && self.searching);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).split(inner);
        super::render_input_field(
            frame,
            layout[0],
            "Search:",
            self.search.term(),
            self.searching,
        );

        let results = self.search.results();
        let height = usize::from(layout[1].height);
        let lines: Vec<Line> = results
            .get(super::visible_range(results.len(), self.search_cursor, height))
            .unwrap_or_default()
            .iter()
            .map(|hero| {
                let highlighted = self.searching
                    && results.get(self.search_cursor).is_some_and(|h| h == hero);
                super::hero_line(hero, highlighted)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), layout[1]);
    }
}

impl Component for DashboardScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn activate(&mut self, _route: Route) -> Result<()> {
        self.searching = false;
        if let Some(tx) = self.action_tx.as_ref() {
            effect::spawn(tx, self.presenter.load(), Action::DashboardLoaded);
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.searching {
            return Ok(self.handle_search_key(key));
        }

        let last = self.presenter.top_heroes().len().saturating_sub(1);
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.cursor = (self.cursor + 1).min(last);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Char('/') => {
                self.searching = true;
                None
            }
            KeyCode::Enter => Self::open(self.presenter.top_heroes().get(self.cursor)),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DashboardLoaded(heroes) => {
                self.presenter.apply_loaded(heroes.clone());
                let last = self.presenter.top_heroes().len().saturating_sub(1);
                self.cursor = self.cursor.min(last);
            }
            Action::SearchSettled(tick) => {
                if let (Some(search), Some(tx)) =
                    (self.search.settle(tick.clone()), self.action_tx.as_ref())
                {
                    effect::spawn(tx, search, Action::SearchFinished);
                }
            }
            Action::SearchFinished(results) => {
                if self.search.apply_results(results.clone()) {
                    self.search_cursor = 0;
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(7), // top heroes
            Constraint::Min(6),    // search
            Constraint::Length(1), // hints
        ])
        .split(area);

        self.render_top_heroes(frame, layout[0]);
        self.render_search(frame, layout[1]);

        let hint_line = if self.searching {
            super::hints(&[("↑/↓", "move"), ("Enter", "open"), ("Esc", "done")])
        } else {
            super::hints(&[("j/k", "move"), ("Enter", "open"), ("/", "search")])
        };
        frame.render_widget(Paragraph::new(hint_line), layout[2]);
    }

    fn captures_input(&self) -> bool {
        self.searching
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
