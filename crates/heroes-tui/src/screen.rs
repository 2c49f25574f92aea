//! Screen identifiers, routes, and the navigation history.

use std::fmt;

use heroes_core::HeroId;

/// Identifies each TUI screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Dashboard, // 1
    Heroes, // 2
    /// Hero detail: not in the tab bar, reached by opening a hero.
    Detail,
}

impl ScreenId {
    /// Tab-bar screens in order.
    pub const ALL: [ScreenId; 2] = [Self::Dashboard, Self::Heroes];

    /// Numeric key for this screen. Detail has no number key.
    pub fn number(self) -> u8 {
        match self {
            Self::Dashboard => 1,
            Self::Heroes => 2,
            Self::Detail => 0,
        }
    }

    /// Screen from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Dashboard),
            2 => Some(Self::Heroes),
            _ => None,
        }
    }

    /// Next tab-bar screen (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous tab-bar screen (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Heroes => "Heroes",
            Self::Detail => "Detail",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ── Routes ──────────────────────────────────────────────────────────

/// A navigable location: a screen plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Heroes,
    Detail(HeroId),
}

impl Route {
    pub fn screen(self) -> ScreenId {
        match self {
            Self::Dashboard => ScreenId::Dashboard,
            Self::Heroes => ScreenId::Heroes,
            Self::Detail(_) => ScreenId::Detail,
        }
    }
}

impl From<ScreenId> for Route {
    /// Detail needs a hero id; without one it falls back to the list.
    fn from(screen: ScreenId) -> Self {
        match screen {
            ScreenId::Dashboard => Self::Dashboard,
            ScreenId::Heroes | ScreenId::Detail => Self::Heroes,
        }
    }
}

// ── History ─────────────────────────────────────────────────────────

/// Current route plus the stack of routes that led to it.
#[derive(Debug, Clone)]
pub struct History {
    current: Route,
    stack: Vec<Route>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            current: start,
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Go to `route`, remembering where we came from. Returns false
    /// (and records nothing) if `route` is already current.
    pub fn push(&mut self, route: Route) -> bool {
        if route == self.current {
            return false;
        }
        self.stack.push(self.current);
        self.current = route;
        true
    }

    /// Return to the previous route. Returns None at the start of history.
    pub fn back(&mut self) -> Option<Route> {
        let previous = self.stack.pop()?;
        self.current = previous;
        Some(previous)
    }
}
