// ── Dashboard presenter ──
//
// Shows a short slice of the collection: positions 1 through 4 of the
// server order (the second to fifth heroes).

use std::future::Future;
use std::ops::Range;

use crate::model::Hero;
use crate::service::HeroService;

/// Positions of the full list shown as top heroes.
pub const TOP_HEROES: Range<usize> = 1..5;

#[derive(Debug)]
pub struct DashboardPresenter {
    service: HeroService,
    heroes: Vec<Hero>,
}

impl DashboardPresenter {
    pub fn new(service: HeroService) -> Self {
        Self {
            service,
            heroes: Vec::new(),
        }
    }

    /// Effect: fetch the full list. Resolves to an empty list on failure.
    pub fn load(&self) -> impl Future<Output = Vec<Hero>> + Send + use<> {
        let service = self.service.clone();
        async move { service.list().await.unwrap_or_default() }
    }

    /// Keep only the top-hero slice of a loaded list.
    pub fn apply_loaded(&mut self, heroes: Vec<Hero>) {
        let end = TOP_HEROES.end.min(heroes.len());
        let start = TOP_HEROES.start.min(end);
        self.heroes = heroes.into_iter().take(end).skip(start).collect();
    }

    pub async fn initialize(&mut self) {
        let heroes = self.load().await;
        self.apply_loaded(heroes);
    }

    pub fn top_heroes(&self) -> &[Hero] {
        &self.heroes
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use heroes_api::HeroClient;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::messages::MessageLog;

    fn presenter() -> DashboardPresenter {
        let client =
            HeroClient::from_reqwest("http://127.0.0.1:1", "api/heroes", Default::default())
                .unwrap();
        DashboardPresenter::new(HeroService::with_client(client, MessageLog::new()))
    }

    fn heroes(n: i64) -> Vec<Hero> {
        (11..11 + n).map(|id| Hero::new(id, format!("Hero {id}"))).collect()
    }

    #[test]
    fn keeps_second_through_fifth() {
        let mut p = presenter();
        p.apply_loaded(heroes(10));

        let ids: Vec<i64> = p.top_heroes().iter().map(|h| h.id.get()).collect();
        assert_eq!(ids, vec![12, 13, 14, 15]);
    }

    #[test]
    fn short_lists_are_clamped() {
        let mut p = presenter();

        p.apply_loaded(heroes(3));
        assert_eq!(p.top_heroes().len(), 2);

        p.apply_loaded(heroes(1));
        assert!(p.top_heroes().is_empty());

        p.apply_loaded(Vec::new());
        assert!(p.top_heroes().is_empty());
    }
}
