//! Application core: event loop, navigation, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use heroes_core::{HeroService, MessageLog};

use crate::action::Action;
use crate::component::Component;
use crate::event::{Event, Events};
use crate::screen::{History, Route, ScreenId};
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const FRAME_RATE: Duration = Duration::from_millis(33);

/// Height of the message log panel, borders included.
const MESSAGES_HEIGHT: u16 = 7;

/// Top-level application state and event loop.
pub struct App {
    /// Where we are and how we got here.
    history: History,
    /// All screen components, keyed by ScreenId.
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    /// Notification sink shared with the service.
    message_log: MessageLog,
    /// Latest message snapshot, pushed by the message bridge.
    messages: Arc<Vec<String>>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    pub fn new(service: HeroService, message_log: MessageLog, search_debounce: Duration) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let screens: HashMap<ScreenId, Box<dyn Component>> =
            create_screens(&service, search_debounce)
                .into_iter()
                .collect();

        Self {
            history: History::new(Route::Dashboard),
            screens,
            running: true,
            help_visible: false,
            message_log,
            messages: Arc::new(Vec::new()),
            action_tx,
            action_rx,
        }
    }

    /// Initialize all screen components with the action sender, then
    /// land on the start route.
    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        self.activate(self.history.current())
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.init_screens()?;

        let mut events = Events::start(&self.message_log, FRAME_RATE);

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Redraw => self.action_tx.send(Action::Render)?,
                Event::Messages(lines) => self.action_tx.send(Action::MessagesUpdated(lines))?,
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        info!("TUI event loop ended");
        Ok(())
    }

    fn active_screen(&self) -> ScreenId {
        self.history.current().screen()
    }

    /// Map a key event to an action. Global keys are handled here unless
    /// the active screen is editing text; everything else is delegated.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.help_visible {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Ok(Some(Action::ToggleHelp)),
                _ => Ok(None),
            };
        }

        let active = self.active_screen();
        let Some(screen) = self.screens.get_mut(&active) else {
            return Ok(None);
        };

        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE, KeyCode::Char('c')) => return Ok(Some(Action::ClearMessages)),

            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = c.to_digit(10).and_then(|d| u8::try_from(d).ok());
                if let Some(target) = n.and_then(ScreenId::from_number) {
                    return Ok(Some(Action::SwitchScreen(target)));
                }
            }

            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(active.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(active.prev())));
            }

            (KeyModifiers::NONE, KeyCode::Esc) => return Ok(Some(Action::GoBack)),

            _ => {}
        }

        screen.handle_key_event(key)
    }

    /// Process a single action: update app state and propagate to components.
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.running = false;
            }

            Action::SwitchScreen(target) => self.navigate(Route::from(*target))?,

            Action::OpenDetail(id) => self.navigate(Route::Detail(*id))?,

            Action::GoBack => {
                if let Some(previous) = self.history.back() {
                    debug!(?previous, "navigating back");
                    self.activate(previous)?;
                }
            }

            Action::ToggleHelp => {
                self.help_visible = !self.help_visible;
            }

            Action::MessagesUpdated(messages) => {
                self.messages = Arc::clone(messages);
            }

            Action::ClearMessages => self.message_log.clear(),

            // Render is handled in the main loop, not here
            Action::Render => {}

            // Effect results go to every screen
            result if result.is_effect_result() => {
                for screen in self.screens.values_mut() {
                    if let Some(follow_up) = screen.update(result)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }

            other => {
                let active = self.active_screen();
                if let Some(screen) = self.screens.get_mut(&active) {
                    if let Some(follow_up) = screen.update(other)? {
                        self.action_tx.send(follow_up)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Push `route` onto the history and land on it.
    fn navigate(&mut self, route: Route) -> Result<()> {
        let from = self.history.current();
        if self.history.push(route) {
            debug!(?from, to = ?route, "navigating");
            self.activate(route)?;
        }
        Ok(())
    }

    /// Focus the route's screen and let it (re)load.
    fn activate(&mut self, route: Route) -> Result<()> {
        let target = route.screen();
        for (id, screen) in &mut self.screens {
            screen.set_focused(*id == target);
        }
        if let Some(screen) = self.screens.get_mut(&target) {
            screen.activate(route)?;
        }
        Ok(())
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Render the full application frame.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Layout: [screen content] [messages] [tab bar] [status bar]
        let layout = Layout::vertical([
            Constraint::Min(1),
            Constraint::Length(MESSAGES_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen()) {
            screen.render(frame, layout[0]);
        }

        self.render_messages(frame, layout[1]);
        self.render_tab_bar(frame, layout[2]);
        self.render_status_bar(frame, layout[3]);

        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    /// Render the message log: newest lines at the bottom.
    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Messages ({}) ", self.messages.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let height = usize::from(inner.height);
        let skip = self.messages.len().saturating_sub(height);
        let lines: Vec<Line> = self
            .messages
            .iter()
            .skip(skip)
            .map(|m| Line::from(Span::styled(format!(" {m}"), theme::message(m))))
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    /// Render the tab bar. Detail has no tab; its parent stays highlighted.
    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let active = self.active_screen();
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == active {
                    theme::tab_active()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(format!(" {} {} ", id.number(), id.label()), style))
            })
            .collect();

        let mut tabs = Tabs::new(titles).divider(Span::styled(" ", theme::key_hint()));
        if let Some(idx) = ScreenId::ALL.iter().position(|&s| s == active) {
            tabs = tabs.select(idx);
        }

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let location = match self.history.current() {
            Route::Detail(id) => format!("Detail #{id}"),
            route => route.screen().label().to_owned(),
        };

        let line = Line::from(vec![
            Span::raw(" "),
            Span::styled(location, Style::default().fg(theme::NEON_CYAN)),
            Span::styled(" │ ? help  c clear  Esc back  q quit", theme::key_hint()),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }

    /// Render the help overlay centered on screen.
    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 50u16.min(area.width.saturating_sub(4));
        let help_height = 18u16.min(area.height.saturating_sub(4));

        let x = area.width.saturating_sub(help_width) / 2;
        let y = area.height.saturating_sub(help_height) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            help_area,
        );

        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let entry = |key: &'static str, desc: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {key:<10}"), theme::key_hint_key()),
                Span::styled(desc, theme::key_hint()),
            ])
        };
        let heading = |text: &'static str| {
            Line::from(Span::styled(
                format!("  {text}"),
                Style::default().fg(theme::NEON_CYAN),
            ))
        };

        let help_text = vec![
            Line::from(""),
            heading("Navigation"),
            entry("1-2", "Jump to screen"),
            entry("Tab", "Next screen"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("Enter", "Open / save"),
            entry("Esc", "Back / cancel"),
            Line::from(""),
            heading("Heroes"),
            entry("a", "Add hero"),
            entry("d", "Delete hero"),
            entry("/", "Search (dashboard)"),
            Line::from(""),
            heading("Global"),
            entry("c", "Clear messages"),
            entry("q", "Quit"),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroes_core::{HeroId, ServiceConfig};
    use pretty_assertions::assert_eq;

    use super::*;

    fn app() -> App {
        let config = ServiceConfig::new("http://127.0.0.1:1".parse().unwrap());
        let messages = MessageLog::new();
        let service = HeroService::new(&config, messages.clone()).unwrap();
        let mut app = App::new(service, messages, Duration::from_millis(1));
        app.init_screens().unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn number_keys_and_back_walk_the_history() {
        let mut app = app();

        let action = app.handle_key_event(key(KeyCode::Char('2'))).unwrap().unwrap();
        app.process_action(&action).unwrap();
        assert_eq!(app.history.current(), Route::Heroes);

        app.process_action(&Action::OpenDetail(HeroId(12))).unwrap();
        assert_eq!(app.active_screen(), ScreenId::Detail);

        app.process_action(&Action::GoBack).unwrap();
        assert_eq!(app.history.current(), Route::Heroes);
        app.process_action(&Action::GoBack).unwrap();
        assert_eq!(app.history.current(), Route::Dashboard);
    }

    #[tokio::test]
    async fn text_entry_shadows_global_keys() {
        let mut app = app();
        app.process_action(&Action::OpenDetail(HeroId(12))).unwrap();

        // Typed into the name field, not a quit
        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(
            app.handle_key_event(ctrl_c).unwrap(),
            Some(Action::Quit)
        ));
    }

    #[tokio::test]
    async fn clear_key_empties_the_message_log() {
        let mut app = app();
        app.message_log.add("fetched heroes");

        let action = app.handle_key_event(key(KeyCode::Char('c'))).unwrap().unwrap();
        app.process_action(&action).unwrap();

        assert!(app.message_log.is_empty());
    }

    #[tokio::test]
    async fn help_overlay_swallows_keys() {
        let mut app = app();
        app.process_action(&Action::ToggleHelp).unwrap();

        assert!(app.handle_key_event(key(KeyCode::Char('q'))).unwrap().is_none());
        let close = app.handle_key_event(key(KeyCode::Esc)).unwrap().unwrap();
        app.process_action(&close).unwrap();
        assert!(!app.help_visible);
    }
}
