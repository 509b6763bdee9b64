use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::{debug, info};
use url::Url;

use crate::config::ServiceConfig;
use crate::error::{ApiError, Result};
use crate::models::{CategoryFilter, NewVideo, VideoRecord};

pub(crate) const DEFAULT_UA: &str = concat!("videos-api/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "prefer";

/// Read and insert operations on the remote video collection.
#[async_trait]
pub trait VideoService: Send + Sync {
    /// All records, optionally restricted to one category, newest first.
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<VideoRecord>>;

    /// Records whose title contains `query`, ignoring case.
    async fn search(&self, query: &str) -> Result<Vec<VideoRecord>>;

    /// Inserts a record. The echoed representation is not returned.
    async fn create(&self, video: &NewVideo) -> Result<()>;
}

pub fn default_client(config: &ServiceConfig) -> Result<Client> {
    Ok(Client::builder().timeout(config.timeout()).build()?)
}

/// [`VideoService`] backed by the PostgREST endpoint of the hosted service.
#[derive(Debug, Clone)]
pub struct RestVideoService {
    client: Client,
    collection_url: Url,
    headers: HeaderMap,
}

impl RestVideoService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        Self::with_client(config, default_client(config)?)
    }

    pub fn with_client(config: &ServiceConfig, client: Client) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_UA));

        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ApiError::config("api key is not a valid header value"))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| ApiError::config("api key is not a valid header value"))?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        Ok(Self {
            client,
            collection_url: config.collection_url()?,
            headers,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// `select=*[&category=eq.{tag}]&order=created_at.desc`
    pub fn list_url(&self, filter: &CategoryFilter) -> Url {
        let mut query = String::from("select=*");
        if let Some(tag) = filter.tag() {
            query.push_str("&category=eq.");
            query.push_str(&urlencoding::encode(tag));
        }
        query.push_str("&order=created_at.desc");
        self.with_query(&query)
    }

    /// `select=*&title=ilike.%{query}%`, with the user text percent-encoded.
    pub fn search_url(&self, query: &str) -> Url {
        let query = format!("select=*&title=ilike.%25{}%25", urlencoding::encode(query));
        self.with_query(&query)
    }

    fn with_query(&self, query: &str) -> Url {
        let mut url = self.collection_url.clone();
        url.set_query(Some(query));
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .headers(self.headers.clone())
    }

    async fn fetch_records(&self, url: Url) -> Result<Vec<VideoRecord>> {
        debug!(%url, "fetching records");
        let response = self.request(Method::GET, url).send().await?;
        let body = ensure_success(response).await?;
        let records: Vec<VideoRecord> =
            serde_json::from_str(&body).map_err(ApiError::malformed)?;
        debug!(count = records.len(), "decoded records");
        Ok(records)
    }
}

async fn ensure_success(response: Response) -> Result<String> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { status, body });
    }
    Ok(body)
}

#[async_trait]
impl VideoService for RestVideoService {
    async fn list(&self, filter: &CategoryFilter) -> Result<Vec<VideoRecord>> {
        self.fetch_records(self.list_url(filter)).await
    }

    async fn search(&self, query: &str) -> Result<Vec<VideoRecord>> {
        self.fetch_records(self.search_url(query)).await
    }

    async fn create(&self, video: &NewVideo) -> Result<()> {
        let body = serde_json::to_vec(video).map_err(ApiError::malformed)?;
        let response = self
            .request(Method::POST, self.collection_url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(HeaderName::from_static(PREFER_HEADER), "return=representation")
            .body(body)
            .send()
            .await?;
        ensure_success(response).await?;
        info!(title = %video.title, media_id = %video.media_id, "video created");
        Ok(())
    }
}
