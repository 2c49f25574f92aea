//! Raw-mode terminal session.
//!
//! [`Tui::enter`] switches to the alternate screen and hands back the
//! session; dropping it (or panicking anywhere) puts the terminal back.

use std::io::{Stdout, stdout};
use std::path::Path;

use color_eyre::eyre::Result;
use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn enter() -> Result<Self> {
        let session = Self::start();
        if session.is_err() {
            leave();
        }
        session
    }

    fn start() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide)?;

        let mut terminal = Terminal::new(CrosstermBackend::new(out))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        leave();
    }
}

/// Undo [`Tui::start`]. Errors are ignored: this also runs mid-panic.
fn leave() {
    let _ = execute!(stdout(), cursor::Show, LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Install eyre and panic hooks that leave the terminal before reporting
/// and point at the log file. Call before [`Tui::enter`].
pub fn install_hooks(log_file: &Path) -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .panic_section(format!("Log: {}", log_file.display()))
        .into_hooks();
    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        leave();
        panic_hook(info);
    }));
    Ok(())
}
