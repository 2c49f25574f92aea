// Async HTTP client for the hero collection resource.
//
// Collection path: {base}/api/heroes (configurable)
// Uniform resource semantics: GET/POST/PUT on the collection,
// GET/DELETE on `{collection}/{id}`, filtered GET on `{collection}/?name=`.

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;
use crate::types::{Hero, HeroId, NewHero};

/// Default collection path, relative to the service base URL.
pub const DEFAULT_COLLECTION_PATH: &str = "api/heroes";

// ── Client ───────────────────────────────────────────────────────────

/// Async client for one hero collection resource.
///
/// Holds no state besides the HTTP client and the resolved collection
/// URLs; every method issues exactly one request.
#[derive(Debug, Clone)]
pub struct HeroClient {
    http: reqwest::Client,
    /// `{base}/api/heroes`: list, create, update.
    collection_url: Url,
    /// `{base}/api/heroes/`: search and per-item paths are joined onto this.
    collection_dir: Url,
}

impl HeroClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL, collection path, and transport config.
    pub fn new(
        base_url: &str,
        collection_path: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, collection_path, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        collection_path: &str,
        http: reqwest::Client,
    ) -> Result<Self, Error> {
        let (collection_url, collection_dir) = Self::resolve_collection(base_url, collection_path)?;
        Ok(Self {
            http,
            collection_url,
            collection_dir,
        })
    }

    /// Resolve the collection URL pair from a base URL and a relative path.
    ///
    /// `http://host:3000` + `api/heroes` gives `http://host:3000/api/heroes`
    /// and `http://host:3000/api/heroes/`.
    fn resolve_collection(raw: &str, collection_path: &str) -> Result<(Url, Url), Error> {
        let mut base = Url::parse(raw)?;

        // Base must end in `/` so relative joins append instead of replace
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let collection = collection_path.trim_matches('/');
        if collection.is_empty() {
            let mut url = base.clone();
            let trimmed = base.path().trim_end_matches('/').to_owned();
            url.set_path(&trimmed);
            return Ok((url, base));
        }

        let collection_url = base.join(collection)?;
        let collection_dir = base.join(&format!("{collection}/"))?;
        Ok((collection_url, collection_dir))
    }

    /// The collection URL (`GET`/`POST`/`PUT` target).
    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    fn item_url(&self, id: HeroId) -> Result<Url, Error> {
        Ok(self.collection_dir.join(&id.to_string())?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET {collection}`
    pub async fn list_heroes(&self) -> Result<Vec<Hero>, Error> {
        self.get(self.collection_url.clone()).await
    }

    /// `GET {collection}/?name={term}`
    ///
    /// The term is sent as given; blank-term short-circuiting is the
    /// caller's concern.
    pub async fn search_heroes(&self, term: &str) -> Result<Vec<Hero>, Error> {
        let url = self.collection_dir.clone();
        debug!("GET {url} name={term:?}");

        let resp = self.http.get(url).query(&[("name", term)]).send().await?;
        self.handle_response(resp).await
    }

    /// `GET {collection}/{id}`
    pub async fn get_hero(&self, id: HeroId) -> Result<Hero, Error> {
        let url = self.item_url(id)?;
        self.get(url).await
    }

    /// `POST {collection}`: returns the hero with its assigned id.
    pub async fn create_hero(&self, hero: &NewHero) -> Result<Hero, Error> {
        self.post(self.collection_url.clone(), hero).await
    }

    /// `PUT {collection}` with the full record. The response body is ignored.
    pub async fn update_hero(&self, hero: &Hero) -> Result<(), Error> {
        self.put(self.collection_url.clone(), hero).await
    }

    /// `DELETE {collection}/{id}`. The response body is ignored.
    pub async fn delete_hero(&self, id: HeroId) -> Result<(), Error> {
        let url = self.item_url(id)?;
        self.delete(url).await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, Error> {
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<B: Serialize + Sync>(&self, url: Url, body: &B) -> Result<(), Error> {
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {url}");

        let resp = self
            .http
            .delete(url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();
        let message = if raw.trim().is_empty() {
            status
                .canonical_reason()
                .map_or_else(|| status.to_string(), str::to_owned)
        } else {
            raw
        };

        Error::Http {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str, collection: &str) -> HeroClient {
        HeroClient::from_reqwest(base, collection, reqwest::Client::new()).unwrap()
    }

    #[test]
    fn resolves_collection_under_bare_host() {
        let c = client("http://localhost:3000", DEFAULT_COLLECTION_PATH);
        assert_eq!(c.collection_url().as_str(), "http://localhost:3000/api/heroes");
        assert_eq!(
            c.item_url(HeroId(7)).unwrap().as_str(),
            "http://localhost:3000/api/heroes/7"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let c = client("http://localhost:3000/tour", "/api/heroes/");
        assert_eq!(
            c.collection_url().as_str(),
            "http://localhost:3000/tour/api/heroes"
        );
        assert_eq!(
            c.collection_dir.as_str(),
            "http://localhost:3000/tour/api/heroes/"
        );
    }

    #[test]
    fn empty_collection_path_uses_base() {
        let c = client("http://localhost:3000/heroes/", "");
        assert_eq!(c.collection_url().as_str(), "http://localhost:3000/heroes");
        assert_eq!(
            c.item_url(HeroId(3)).unwrap().as_str(),
            "http://localhost:3000/heroes/3"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let err = HeroClient::from_reqwest("not a url", "api/heroes", reqwest::Client::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
