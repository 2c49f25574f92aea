// ── Search-box presenter ──
//
// Debounced, distinct-until-changed, latest-wins search.
//
//   input(term)   -> debounce effect -> SearchTick
//   settle(tick)  -> search effect   -> SearchResults   (None if superseded or repeated)
//   apply_results(results)                               (ignored if stale)
//
// Every keystroke bumps a generation counter and only the newest generation
// is allowed through the debounce. Results are stale once a newer search
// has been issued; more typing alone does not discard a search in flight.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::config::DEFAULT_SEARCH_DEBOUNCE;
use crate::model::Hero;
use crate::service::HeroService;

/// A debounce period that elapsed for one input generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTick {
    generation: u64,
    term: String,
}

impl SearchTick {
    pub fn term(&self) -> &str {
        &self.term
    }
}

/// Results of one issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    generation: u64,
    heroes: Vec<Hero>,
}

impl SearchResults {
    pub fn heroes(&self) -> &[Hero] {
        &self.heroes
    }
}

/// State and intents of the hero search box.
#[derive(Debug)]
pub struct HeroSearchPresenter {
    service: HeroService,
    debounce: Duration,
    generation: u64,
    term: String,
    last_searched: Option<String>,
    /// Generation of the newest search actually issued.
    issued: Option<u64>,
    results: Vec<Hero>,
}

impl HeroSearchPresenter {
    pub fn new(service: HeroService) -> Self {
        Self::with_debounce(service, DEFAULT_SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(service: HeroService, debounce: Duration) -> Self {
        Self {
            service,
            debounce,
            generation: 0,
            term: String::new(),
            last_searched: None,
            issued: None,
            results: Vec::new(),
        }
    }

    /// The term as last typed.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Results of the latest applied search.
    pub fn results(&self) -> &[Hero] {
        &self.results
    }

    /// Effect: record new input and wait out the debounce period.
    pub fn input(&mut self, term: String) -> impl Future<Output = SearchTick> + Send + use<> {
        self.generation += 1;
        self.term = term;

        let tick = SearchTick {
            generation: self.generation,
            term: self.term.clone(),
        };
        let debounce = self.debounce;
        async move {
            tokio::time::sleep(debounce).await;
            tick
        }
    }

    /// Effect: issue the search for a settled tick.
    ///
    /// Returns `None` when newer input arrived during the debounce, or
    /// when the term equals the last one searched. In the latter case the
    /// earlier search stays current and its results still apply.
    pub fn settle(
        &mut self,
        tick: SearchTick,
    ) -> Option<impl Future<Output = SearchResults> + Send + use<>> {
        if tick.generation != self.generation {
            debug!(term = %tick.term, "search input superseded during debounce");
            return None;
        }
        if self.last_searched.as_deref() == Some(tick.term.as_str()) {
            debug!(term = %tick.term, "search term unchanged");
            return None;
        }

        self.last_searched = Some(tick.term.clone());
        self.issued = Some(tick.generation);
        let service = self.service.clone();
        Some(async move {
            let heroes = service.search(&tick.term).await.unwrap_or_default();
            SearchResults {
                generation: tick.generation,
                heroes,
            }
        })
    }

    /// Apply results if they belong to the newest issued search. Returns
    /// whether they were applied.
    pub fn apply_results(&mut self, results: SearchResults) -> bool {
        if self.issued != Some(results.generation) {
            debug!("dropping stale search results");
            return false;
        }
        self.results = results.heroes;
        true
    }

    /// Run the whole pipeline for one term and wait for it.
    pub async fn search(&mut self, term: impl Into<String>) {
        let tick = self.input(term.into()).await;
        if let Some(effect) = self.settle(tick) {
            let results = effect.await;
            self.apply_results(results);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroes_api::HeroClient;

    use super::*;
    use crate::messages::MessageLog;

    fn presenter() -> HeroSearchPresenter {
        // Never contacted by these tests
        let client =
            HeroClient::from_reqwest("http://127.0.0.1:1", "api/heroes", Default::default())
                .unwrap();
        let service = HeroService::with_client(client, MessageLog::new());
        HeroSearchPresenter::with_debounce(service, Duration::from_millis(300))
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_input_does_not_settle() {
        let mut p = presenter();

        let first = p.input("ma".into());
        let second = p.input("mag".into());

        let stale = first.await;
        assert!(p.settle(stale).is_none());

        let fresh = second.await;
        assert_eq!(fresh.term(), "mag");
        assert_eq!(p.term(), "mag");
    }

    #[tokio::test(start_paused = true)]
    async fn debounce_waits_the_configured_period() {
        let mut p = presenter();
        let started = tokio::time::Instant::now();

        let _tick = p.input("ma".into()).await;

        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn results_are_stale_once_a_newer_search_is_issued() {
        let mut p = presenter();

        let old_tick = p.input("   ".into()).await;
        let old_effect = p.settle(old_tick).unwrap();
        let newer_tick = p.input("   x".into()).await;
        let newer_effect = p.settle(newer_tick).unwrap();

        // Blank terms resolve locally, no request
        assert!(!p.apply_results(old_effect.await));
        assert!(p.apply_results(newer_effect.await));
    }

    #[tokio::test(start_paused = true)]
    async fn typing_without_settling_keeps_search_in_flight() {
        let mut p = presenter();

        let tick = p.input(" ".into()).await;
        let effect = p.settle(tick).unwrap();
        let _pending = p.input(" x".into());

        assert!(p.apply_results(effect.await));
    }

    #[tokio::test(start_paused = true)]
    async fn retyped_term_keeps_results_of_search_in_flight() {
        let mut p = presenter();

        let tick = p.input("  ".into()).await;
        let effect = p.settle(tick).unwrap();

        // Typed a character and erased it within the debounce
        let typed = p.input("  x".into());
        let erased = p.input("  ".into());
        assert!(p.settle(typed.await).is_none());
        assert!(p.settle(erased.await).is_none());

        assert!(p.apply_results(effect.await));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_term_is_not_searched_twice() {
        let mut p = presenter();

        let tick = p.input("  ".into()).await;
        let effect = p.settle(tick).unwrap();
        assert!(p.apply_results(effect.await));

        let again = p.input("  ".into()).await;
        assert!(p.settle(again).is_none());
    }
}
