// ── Hero service ──
//
// The record access gateway: the only component that talks to the
// remote collection. Every network-touching operation writes exactly
// one line to the `MessageLog` (a success description, or
// "<operation> failed: <message>") and returns a `Result`. Fallbacks
// are the caller's decision.

use std::sync::Arc;

use tracing::{debug, error};

use heroes_api::{HeroClient, TransportConfig};

use crate::config::ServiceConfig;
use crate::error::CoreError;
use crate::messages::MessageLog;
use crate::model::{Hero, HeroId, HeroRef, NewHero};

/// Gateway to the hero collection.
///
/// Cheaply cloneable via `Arc<ServiceInner>`; presenters each hold a clone
/// so their effect futures can be `'static`.
#[derive(Clone)]
pub struct HeroService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    client: HeroClient,
    messages: MessageLog,
}

impl HeroService {
    /// Build the HTTP client described by `config` and wrap it.
    pub fn new(config: &ServiceConfig, messages: MessageLog) -> Result<Self, CoreError> {
        let mut transport = TransportConfig::default();
        if let Some(timeout) = config.timeout {
            transport = transport.with_timeout(timeout);
        }

        let client = HeroClient::new(config.url.as_str(), &config.collection_path, &transport)?;
        Ok(Self::with_client(client, messages))
    }

    /// Wrap an already-built client.
    pub fn with_client(client: HeroClient, messages: MessageLog) -> Self {
        Self {
            inner: Arc::new(ServiceInner { client, messages }),
        }
    }

    /// The notification sink this service writes to.
    pub fn messages(&self) -> &MessageLog {
        &self.inner.messages
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch every hero, in server order.
    pub async fn list(&self) -> Result<Vec<Hero>, CoreError> {
        let result = self.inner.client.list_heroes().await;
        self.finish("list", result, |_| "fetched heroes".into())
    }

    /// Heroes whose name matches `term` (server-side match).
    ///
    /// A blank term resolves to an empty list without a request or a
    /// log line.
    pub async fn search(&self, term: &str) -> Result<Vec<Hero>, CoreError> {
        if term.trim().is_empty() {
            debug!("blank search term, skipping request");
            return Ok(Vec::new());
        }

        let result = self.inner.client.search_heroes(term).await;
        self.finish("search", result, |_| format!("found heroes matching {term:?}"))
    }

    /// Fetch one hero by id.
    pub async fn get(&self, id: HeroId) -> Result<Hero, CoreError> {
        let result = self.inner.client.get_hero(id).await;
        self.finish(&format!("getOne id={id}"), result, |_| {
            format!("fetched hero id={id}")
        })
    }

    // ── Writes ───────────────────────────────────────────────────────

    /// Create a hero; the returned record carries the assigned id.
    ///
    /// A blank name is rejected locally, before any request.
    pub async fn create(&self, hero: NewHero) -> Result<Hero, CoreError> {
        if hero.name.trim().is_empty() {
            return Err(CoreError::Validation {
                message: "hero name must not be blank".into(),
            });
        }

        let result = self.inner.client.create_hero(&hero).await;
        self.finish("create", result, |created| {
            format!("added hero name={} with id={}", created.name, created.id)
        })
    }

    /// Replace the stored record identified by `hero.id`.
    pub async fn update(&self, hero: &Hero) -> Result<(), CoreError> {
        let result = self.inner.client.update_hero(hero).await;
        self.finish("update", result, |_| format!("updated hero id={}", hero.id))
    }

    /// Delete a hero, given either the record or its id.
    pub async fn delete(&self, target: impl Into<HeroRef>) -> Result<(), CoreError> {
        let id = target.into().id();
        let result = self.inner.client.delete_hero(id).await;
        self.finish("delete", result, |_| format!("deleted hero id={id}"))
    }

    // ── Shared outcome policy ────────────────────────────────────────

    /// Log exactly one line for a finished request and translate the error.
    fn finish<T>(
        &self,
        operation: &str,
        result: Result<T, heroes_api::Error>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T, CoreError> {
        match result {
            Ok(value) => {
                self.inner.messages.add(describe(&value));
                Ok(value)
            }
            Err(raw) => {
                error!(operation, error = ?raw, "hero service request failed");
                let err = CoreError::from(raw);
                self.inner.messages.add(format!("{operation} failed: {err}"));
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for HeroService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeroService")
            .field("collection_url", &self.inner.client.collection_url().as_str())
            .finish_non_exhaustive()
    }
}
