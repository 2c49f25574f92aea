//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use heroes_core::{Hero, HeroId, SearchResults, SearchTick};

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Render,

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    OpenDetail(HeroId),
    GoBack,

    // ── Overlays ──────────────────────────────────────────────────
    ToggleHelp,

    // ── Message log ───────────────────────────────────────────────
    MessagesUpdated(Arc<Vec<String>>),
    ClearMessages,

    // ── Effect results (from spawned presenter effects) ───────────
    HeroesLoaded(Vec<Hero>),
    HeroAdded(Option<Hero>),
    DashboardLoaded(Vec<Hero>),
    SearchSettled(SearchTick),
    SearchFinished(SearchResults),
    DetailLoaded { id: HeroId, hero: Option<Hero> },
}

impl Action {
    /// Results of spawned effects. These go to every screen, not just the
    /// active one, so a result is never lost to a screen switch.
    pub fn is_effect_result(&self) -> bool {
        matches!(
            self,
            Self::HeroesLoaded(_)
                | Self::HeroAdded(_)
                | Self::DashboardLoaded(_)
                | Self::SearchSettled(_)
                | Self::SearchFinished(_)
                | Self::DetailLoaded { .. }
        )
    }
}
