// ── Domain model ──
//
// `Hero`, `HeroId`, and `NewHero` are the wire types from heroes-api,
// re-exported unchanged. `HeroRef` is the delete target: a whole record
// or a bare identifier.

pub use heroes_api::types::{Hero, HeroId, NewHero};

/// Something that identifies a hero to delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroRef {
    Hero(Hero),
    Id(HeroId),
}

impl HeroRef {
    pub fn id(&self) -> HeroId {
        match self {
            Self::Hero(hero) => hero.id,
            Self::Id(id) => *id,
        }
    }
}

impl From<Hero> for HeroRef {
    fn from(hero: Hero) -> Self {
        Self::Hero(hero)
    }
}

impl From<&Hero> for HeroRef {
    fn from(hero: &Hero) -> Self {
        Self::Hero(hero.clone())
    }
}

impl From<HeroId> for HeroRef {
    fn from(id: HeroId) -> Self {
        Self::Id(id)
    }
}

impl From<i64> for HeroRef {
    fn from(id: i64) -> Self {
        Self::Id(HeroId(id))
    }
}
