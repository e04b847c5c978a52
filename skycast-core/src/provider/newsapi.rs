use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    CurationError,
    config::DEFAULT_NEWS_PAGE_SIZE,
    model::NewsArticle,
    provider::{ProviderId, truncate_body},
    settings::NewsCategory,
};

use super::NewsSource;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    api_key: String,
    base_url: String,
    page_size: u32,
    http: Client,
}

impl NewsApiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_NEWS_PAGE_SIZE,
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    async fn headlines(
        &self,
        country_code: &str,
        category: Option<NewsCategory>,
    ) -> Result<Vec<NewsArticle>> {
        let url = format!("{}/v2/top-headlines", self.base_url);

        let mut query = vec![
            ("country", country_code.to_lowercase()),
            ("pageSize", self.page_size.to_string()),
            ("apiKey", self.api_key.clone()),
        ];
        if let Some(category) = category {
            query.push(("category", category.as_str().to_string()));
        }

        tracing::debug!(%url, country = country_code, category = ?category, "Requesting NewsAPI headlines");

        let res = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .context("Failed to send request to NewsAPI (top headlines)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read NewsAPI response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "NewsAPI request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: NaResponse =
            serde_json::from_str(&body).context("Failed to parse NewsAPI JSON")?;

        if parsed.status != "ok" {
            return Err(anyhow!(
                "NewsAPI returned status '{}': {}",
                parsed.status,
                parsed.message.as_deref().unwrap_or("no message"),
            ));
        }

        Ok(normalize(parsed.articles))
    }
}

#[derive(Debug, Deserialize)]
struct NaArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NaResponse {
    status: String,
    message: Option<String>,
    #[serde(default)]
    articles: Vec<NaArticle>,
}

/// Drop entries without a title or url.
fn normalize(raw: Vec<NaArticle>) -> Vec<NewsArticle> {
    raw.into_iter()
        .filter_map(|a| {
            let title = a.title.filter(|t| !t.trim().is_empty())?;
            let url = a.url.filter(|u| !u.trim().is_empty())?;
            Some(NewsArticle {
                title,
                description: a.description.unwrap_or_default(),
                url,
            })
        })
        .collect()
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn top_headlines(
        &self,
        country_code: &str,
        category: Option<NewsCategory>,
    ) -> Result<Vec<NewsArticle>, CurationError> {
        if !self.has_credential() {
            return Err(CurationError::MissingCredential(ProviderId::NewsApi));
        }
        Ok(self.headlines(country_code, category).await?)
    }
}
