// heroes-api: Async Rust client for the hero collection resource.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::HeroClient;
pub use error::Error;
pub use transport::TransportConfig;
pub use types::{Hero, HeroId, NewHero};
