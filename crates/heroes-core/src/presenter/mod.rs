//! Presentation logic, independent of any UI toolkit.
//!
//! Each presenter owns its view state and a [`HeroService`](crate::HeroService)
//! clone. Operations that need the network are split in two: a method that
//! returns a `'static` effect future (the UI spawns it, a test awaits it)
//! and an `apply_*` method that folds the result back into state. Results
//! are applied in the order they arrive.

mod dashboard;
mod detail;
mod heroes;
mod search;

pub use dashboard::{DashboardPresenter, TOP_HEROES};
pub use detail::{DetailState, HeroDetailPresenter, Navigator};
pub use heroes::HeroesPresenter;
pub use search::{HeroSearchPresenter, SearchResults, SearchTick};
