// heroes-core: Record gateway and presentation logic between heroes-api and the UI.

pub mod config;
pub mod error;
pub mod messages;
pub mod model;
pub mod presenter;
pub mod service;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::ServiceConfig;
pub use error::{CoreError, ErrorKind};
pub use messages::MessageLog;
pub use model::{Hero, HeroId, HeroRef, NewHero};
pub use presenter::{
    DashboardPresenter, DetailState, HeroDetailPresenter, HeroSearchPresenter, HeroesPresenter,
    Navigator, SearchResults, SearchTick,
};
pub use service::HeroService;
