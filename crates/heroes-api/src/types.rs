// Wire types for the hero collection resource.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Server-assigned hero identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(pub i64);

impl HeroId {
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for HeroId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for HeroId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// A persisted hero, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
}

impl Hero {
    pub fn new(id: impl Into<HeroId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Creation payload. Carries no identifier: the service assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    pub name: String,
}

impl NewHero {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hero_id_parses_trimmed_integers() {
        assert_eq!(" 7 ".parse::<HeroId>().unwrap(), HeroId(7));
        assert!("seven".parse::<HeroId>().is_err());
        assert!("".parse::<HeroId>().is_err());
    }

    #[test]
    fn hero_id_is_transparent_on_the_wire() {
        let hero = Hero::new(12, "Narco");
        let json = serde_json::to_value(&hero).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 12, "name": "Narco" }));
    }

    #[test]
    fn new_hero_omits_identifier() {
        let json = serde_json::to_value(NewHero::new("Zorro")).unwrap();
        assert_eq!(json, serde_json::json!({ "name": "Zorro" }));
    }

    #[test]
    fn hero_ignores_unknown_fields() {
        let hero: Hero =
            serde_json::from_str(r#"{"id":13,"name":"Bombasto","power":"loud"}"#).unwrap();
        assert_eq!(hero, Hero::new(13, "Bombasto"));
    }
}
