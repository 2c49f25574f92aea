// ── Single-record presenter ──
//
// Resolves a hero id from a route parameter, loads that hero, lets the
// user edit it in place, and on save pushes it back before navigating
// away. Success and failure converge: save always navigates back.

use std::future::Future;

use tracing::warn;

use crate::error::CoreError;
use crate::model::{Hero, HeroId};
use crate::service::HeroService;

/// The navigation collaborator: whatever owns the history stack.
pub trait Navigator: Send + Sync {
    /// Return to the previous view.
    fn back(&self);
}

/// Lifecycle of the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailState {
    #[default]
    Uninitialized,
    Loading,
    /// Load finished. The hero may still be absent if the read failed.
    Loaded,
    Saving,
}

/// State and intents of the hero detail view.
pub struct HeroDetailPresenter<N> {
    service: HeroService,
    navigator: N,
    state: DetailState,
    hero: Option<Hero>,
}

impl<N> HeroDetailPresenter<N>
where
    N: Navigator + Clone + 'static,
{
    pub fn new(service: HeroService, navigator: N) -> Self {
        Self {
            service,
            navigator,
            state: DetailState::Uninitialized,
            hero: None,
        }
    }

    pub fn state(&self) -> DetailState {
        self.state
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.hero.as_ref()
    }

    /// Mutable access to the hero being edited, for in-place field edits.
    pub fn hero_mut(&mut self) -> Option<&mut Hero> {
        self.hero.as_mut()
    }

    /// Replace the name of the hero being edited. No-op when nothing is loaded.
    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(hero) = self.hero.as_mut() {
            hero.name = name.into();
        }
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Effect: read the hero named by the `id` route parameter.
    ///
    /// A parameter that is not an integer is rejected with
    /// [`CoreError::InvalidId`] before any request, and the state is left
    /// unchanged. The effect resolves to `None` when the read fails.
    pub fn load(
        &mut self,
        route_id: &str,
    ) -> Result<impl Future<Output = Option<Hero>> + Send + use<N>, CoreError> {
        let id: HeroId = route_id.parse().map_err(|_| {
            warn!(route_id, "route parameter is not a hero id");
            CoreError::InvalidId {
                raw: route_id.to_owned(),
            }
        })?;

        Ok(self.load_id(id))
    }

    /// Effect: read a hero whose id is already known.
    pub fn load_id(&mut self, id: HeroId) -> impl Future<Output = Option<Hero>> + Send + use<N> {
        self.state = DetailState::Loading;
        let service = self.service.clone();
        async move { service.get(id).await.ok() }
    }

    /// Store the loaded hero (or its absence).
    pub fn apply_loaded(&mut self, hero: Option<Hero>) {
        self.hero = hero;
        self.state = DetailState::Loaded;
    }

    /// Load and apply in one step.
    pub async fn initialize(&mut self, route_id: &str) -> Result<(), CoreError> {
        let effect = self.load(route_id)?;
        let hero = effect.await;
        self.apply_loaded(hero);
        Ok(())
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn go_back(&self) {
        self.navigator.back();
    }

    /// Effect: push the edited hero back, then navigate back whatever
    /// the outcome.
    ///
    /// When no hero was loaded there is nothing to update and the effect
    /// only navigates.
    pub fn save(&mut self) -> impl Future<Output = ()> + Send + use<N> {
        self.state = DetailState::Saving;

        let service = self.service.clone();
        let navigator = self.navigator.clone();
        let hero = self.hero.clone();
        async move {
            if let Some(hero) = hero {
                let _ = service.update(&hero).await;
            }
            navigator.back();
        }
    }
}

impl<N> std::fmt::Debug for HeroDetailPresenter<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroDetailPresenter")
            .field("state", &self.state)
            .field("hero", &self.hero)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use heroes_api::HeroClient;

    use super::*;
    use crate::messages::MessageLog;

    #[derive(Clone, Default)]
    struct CountingNavigator(Arc<AtomicUsize>);

    impl Navigator for CountingNavigator {
        fn back(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn presenter() -> (HeroDetailPresenter<CountingNavigator>, CountingNavigator, MessageLog) {
        // Nothing listens here
        let client =
            HeroClient::from_reqwest("http://127.0.0.1:1", "api/heroes", Default::default())
                .unwrap();
        let messages = MessageLog::new();
        let nav = CountingNavigator::default();
        let service = HeroService::with_client(client, messages.clone());
        (HeroDetailPresenter::new(service, nav.clone()), nav, messages)
    }

    #[test]
    fn malformed_route_id_is_rejected_without_request() {
        let (mut p, _, messages) = presenter();

        let err = p.load("seven").err().unwrap();

        assert!(matches!(err, CoreError::InvalidId { ref raw } if raw == "seven"));
        assert_eq!(p.state(), DetailState::Uninitialized);
        assert!(messages.is_empty());
    }

    #[test]
    fn empty_route_id_is_rejected() {
        let (mut p, _, _) = presenter();
        assert!(p.load("").is_err());
        assert!(p.load("  ").is_err());
    }

    #[test]
    fn valid_route_id_moves_to_loading() {
        let (mut p, _, _) = presenter();
        let _effect = p.load("7").unwrap();
        assert_eq!(p.state(), DetailState::Loading);
    }

    #[tokio::test]
    async fn known_id_loads_without_parsing() {
        let (mut p, _, messages) = presenter();

        let hero = p.load_id(HeroId(7)).await;

        assert!(hero.is_none());
        assert_eq!(p.state(), DetailState::Loading);
        assert_eq!(messages.len(), 1);
    }

    #[test]
    fn apply_loaded_reaches_loaded_even_without_hero() {
        let (mut p, _, _) = presenter();
        let _effect = p.load("7").unwrap();
        p.apply_loaded(None);
        assert_eq!(p.state(), DetailState::Loaded);
        assert!(p.hero().is_none());
    }

    #[test]
    fn set_name_edits_in_place() {
        let (mut p, _, _) = presenter();
        p.apply_loaded(Some(Hero::new(7, "Echo")));
        p.set_name("Echo Prime");
        assert_eq!(p.hero().unwrap().name, "Echo Prime");

        p.hero_mut().unwrap().name.push('!');
        assert_eq!(p.hero().unwrap(), &Hero::new(7, "Echo Prime!"));
    }

    #[test]
    fn go_back_only_navigates() {
        let (p, nav, messages) = presenter();
        p.go_back();
        assert_eq!(nav.0.load(Ordering::SeqCst), 1);
        assert!(messages.is_empty());
    }

    #[tokio::test]
    async fn save_without_hero_navigates_without_request() {
        let (mut p, nav, messages) = presenter();
        p.apply_loaded(None);

        p.save().await;

        assert_eq!(p.state(), DetailState::Saving);
        assert_eq!(nav.0.load(Ordering::SeqCst), 1);
        assert!(messages.is_empty());
    }
}
