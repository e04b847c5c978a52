//! Headline curation: fetch, mood filter with fallback, truncation.

use crate::{
    CurationError, NewsArticle,
    mood::MoodCategory,
    provider::NewsSource,
    settings::NewsCategory,
};

pub const MAX_HEADLINES: usize = 5;

/// Fetch headlines for `country_code` and curate them for `mood`.
///
/// Only `preferred_topic` reaches the provider; callers pass the first
/// selected category.
pub async fn fetch_headlines(
    source: &dyn NewsSource,
    country_code: &str,
    preferred_topic: Option<NewsCategory>,
    mood: Option<MoodCategory>,
) -> Result<Vec<NewsArticle>, CurationError> {
    let articles = source.top_headlines(country_code, preferred_topic).await?;
    Ok(curate(articles, mood))
}

/// Keep articles matching the mood's keywords, falling back to the full list
/// when nothing matches, then keep the first [`MAX_HEADLINES`].
///
/// Provider order is preserved.
pub fn curate(articles: Vec<NewsArticle>, mood: Option<MoodCategory>) -> Vec<NewsArticle> {
    let mut selected = match mood {
        Some(mood) => {
            let keywords = mood.keywords();
            let matching: Vec<NewsArticle> = articles
                .iter()
                .filter(|a| matches_any(a, keywords))
                .cloned()
                .collect();

            if matching.is_empty() {
                tracing::debug!(%mood, total = articles.len(), "No headline matched mood keywords, keeping all");
                articles
            } else {
                tracing::debug!(%mood, matched = matching.len(), total = articles.len(), "Filtered headlines by mood");
                matching
            }
        }
        None => articles,
    };

    selected.truncate(MAX_HEADLINES);
    selected
}

fn matches_any(article: &NewsArticle, keywords: &[&str]) -> bool {
    let haystack = format!("{} {}", article.title, article.description).to_lowercase();
    keywords.iter().any(|k| haystack.contains(k))
}
