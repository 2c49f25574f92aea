// ── Collection presenter ──
//
// Owns the list of heroes on display. Loads replace the list wholesale,
// creates append, deletes remove locally before the request is sent.

use std::future::Future;

use tracing::debug;

use crate::model::{Hero, HeroRef, NewHero};
use crate::service::HeroService;

/// State and intents of the hero list view.
#[derive(Debug)]
pub struct HeroesPresenter {
    service: HeroService,
    heroes: Vec<Hero>,
    selected: Option<Hero>,
}

impl HeroesPresenter {
    pub fn new(service: HeroService) -> Self {
        Self {
            service,
            heroes: Vec::new(),
            selected: None,
        }
    }

    /// Heroes in display (server response) order.
    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }

    pub fn selected(&self) -> Option<&Hero> {
        self.selected.as_ref()
    }

    /// Mark a hero as selected. Purely presentational.
    pub fn select(&mut self, hero: Option<Hero>) {
        self.selected = hero;
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Effect: fetch the full list. Resolves to an empty list on failure.
    pub fn load(&self) -> impl Future<Output = Vec<Hero>> + Send + use<> {
        let service = self.service.clone();
        async move { service.list().await.unwrap_or_default() }
    }

    /// Replace the list with a loaded one.
    pub fn apply_loaded(&mut self, heroes: Vec<Hero>) {
        self.heroes = heroes;
    }

    /// Load and apply in one step.
    pub async fn initialize(&mut self) {
        let heroes = self.load().await;
        self.apply_loaded(heroes);
    }

    // ── Add ──────────────────────────────────────────────────────────

    /// Effect: create a hero named `name` (trimmed).
    ///
    /// Returns `None` without touching the service when the trimmed name
    /// is empty. The effect resolves to `None` when creation fails.
    pub fn add(&self, name: &str) -> Option<impl Future<Output = Option<Hero>> + Send + use<>> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring add with blank name");
            return None;
        }

        let service = self.service.clone();
        let hero = NewHero::new(name);
        Some(async move { service.create(hero).await.ok() })
    }

    /// Append a freshly created hero to the end of the list.
    pub fn apply_added(&mut self, hero: Hero) {
        self.heroes.push(hero);
    }

    /// Add and apply in one step. Blank names and failed creates leave
    /// the list untouched.
    pub async fn create_hero(&mut self, name: &str) {
        let Some(effect) = self.add(name) else {
            return;
        };
        if let Some(hero) = effect.await {
            self.apply_added(hero);
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Remove `hero` from the list immediately, then return the effect
    /// that deletes it remotely.
    ///
    /// At most one entry (the first equal to `hero`) is removed. The
    /// remote outcome is ignored; a failed delete is not rolled back.
    pub fn delete(&mut self, hero: &Hero) -> impl Future<Output = ()> + Send + use<> {
        if let Some(pos) = self.heroes.iter().position(|h| h == hero) {
            self.heroes.remove(pos);
        }
        if self.selected.as_ref() == Some(hero) {
            self.selected = None;
        }

        let service = self.service.clone();
        let target = HeroRef::from(hero);
        async move {
            let _ = service.delete(target).await;
        }
    }
}
