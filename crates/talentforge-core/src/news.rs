use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use crate::effect::Reaction;
use crate::toast::Notice;

pub const DEFAULT_ENDPOINT: &str = "https://newsdata.io/api/1/news";
pub const DEFAULT_API_KEY: &str = "pub_75646d8a8888a6002d05f4a363db4bda283d0";
pub const PLACEHOLDER_IMAGE: &str = "https://placehold.co/80x60/333/white?text=Tech";
pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const MAX_ITEMS: usize = 4;

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("news request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("news response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("news API returned status {0:?}")]
    Unsuccessful(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Article {
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub source_name: Option<String>,
}

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    status: String,
    results: Option<Vec<Article>>,
}

/// Decode a response body. Anything but `status == "success"` with a
/// results array is a failure.
pub fn parse_articles(body: &str) -> Result<Vec<Article>, NewsError> {
    let response: NewsResponse = serde_json::from_str(body)?;
    match response.results {
        Some(results) if response.status == "success" => Ok(results),
        _ => Err(NewsError::Unsuccessful(response.status)),
    }
}

#[derive(Clone)]
pub struct NewsClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl NewsClient {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn from_config(config: &crate::Config) -> Self {
        let endpoint = config.news_endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
        let api_key = config
            .news_api_key()
            .unwrap_or_else(|| DEFAULT_API_KEY.to_string());
        Self::new(endpoint, &api_key)
    }

    /// One GET for the latest technology headlines. Never retried.
    pub async fn fetch_latest(&self) -> Result<Vec<Article>, NewsError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("q", "Technology"),
                ("country", "in"),
                ("language", "en"),
                ("category", "technology"),
            ])
            .send()
            .await?;

        // The body carries its own status flag, so read it regardless of
        // the HTTP status.
        let body = response.text().await?;
        parse_articles(&body)
    }
}

/// A rendered headline with fallbacks applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    pub image_url: String,
}

impl From<Article> for NewsItem {
    fn from(article: Article) -> Self {
        Self {
            title: article.title.unwrap_or_default(),
            source: article
                .source_name
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
            image_url: article
                .image_url
                .filter(|u| !u.is_empty())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewsStatus {
    #[default]
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct NewsWidget {
    items: Vec<NewsItem>,
    status: NewsStatus,
}

impl NewsWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[NewsItem] {
        &self.items
    }

    pub fn status(&self) -> NewsStatus {
        self.status
    }

    pub fn on_result(&mut self, result: Result<Vec<Article>, NewsError>) -> Reaction {
        match result {
            Ok(articles) => {
                self.items = articles
                    .into_iter()
                    .take(MAX_ITEMS)
                    .map(NewsItem::from)
                    .collect();
                self.status = NewsStatus::Loaded;
                tracing::info!(items = self.items.len(), "news loaded");
                Reaction::new().notice(Notice::new(
                    "News Updated",
                    "Latest technology news has been loaded.",
                ))
            }
            Err(err) => {
                // Previous items, if any, stay on screen.
                self.status = NewsStatus::Failed;
                tracing::warn!("error fetching news: {err}");
                Reaction::new().notice(Notice::new(
                    "News Error",
                    "Failed to load news. Please try again later.",
                ))
            }
        }
    }
}
