// SPDX-License-Identifier: MIT OR Apache-2.0

//! Article titles and the pool games are drawn from

use crate::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Base of every English Wikipedia article link
pub const WIKI_BASE_URL: &str = "https://en.wikipedia.org/wiki/";

/// Curated articles used when no pool is configured
pub const DEFAULT_ARTICLES: [&str; 15] = [
    "Albert_Einstein",
    "World_War_II",
    "Ancient_Rome",
    "Internet",
    "Python_(programming_language)",
    "Leonardo_da_Vinci",
    "Photosynthesis",
    "Black_hole",
    "Jupiter",
    "The_Beatles",
    "Video_game",
    "Artificial_intelligence",
    "Japan",
    "Evolution",
    "Wikipedia",
];

/// A Wikipedia page title in its link form, e.g. `Black_hole`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(String);

impl Article {
    pub fn new(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// The title exactly as it appears in the link
    pub fn title(&self) -> &str {
        &self.0
    }

    /// Human readable title with underscores shown as spaces
    pub fn display_title(&self) -> String {
        self.0.replace('_', " ")
    }

    /// Link to the article on English Wikipedia
    pub fn url(&self) -> String {
        format!("{}{}", WIKI_BASE_URL, self.0)
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_title())
    }
}

impl From<&str> for Article {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

/// Distinct article titles that start and target articles are drawn from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticlePool {
    articles: Vec<Article>,
}

impl ArticlePool {
    /// Build a pool, dropping blank and duplicate titles while keeping order
    pub fn new<I, S>(titles: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let articles: Vec<Article> = titles
            .into_iter()
            .map(Into::into)
            .map(|title: String| title.trim().to_string())
            .filter(|title| !title.is_empty())
            .filter(|title| seen.insert(title.clone()))
            .map(Article::new)
            .collect();

        if articles.len() < 2 {
            return Err(GameError::ArticlePoolTooSmall(articles.len()));
        }

        Ok(Self { articles })
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Draw two different articles: (start, target)
    pub fn pick_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (Article, Article) {
        let mut picked = self.articles.choose_multiple(rng, 2).cloned();
        // The constructor guarantees two entries
        match (picked.next(), picked.next()) {
            (Some(start), Some(target)) => (start, target),
            _ => unreachable!("article pool holds at least two titles"),
        }
    }
}

impl Default for ArticlePool {
    fn default() -> Self {
        Self {
            articles: DEFAULT_ARTICLES.iter().copied().map(Article::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn display_title_replaces_underscores() {
        let article = Article::new("Python_(programming_language)");
        assert_eq!(article.display_title(), "Python (programming language)");
        assert_eq!(
            article.url(),
            "https://en.wikipedia.org/wiki/Python_(programming_language)"
        );
    }

    #[test]
    fn pool_rejects_fewer_than_two_titles() {
        assert_eq!(
            ArticlePool::new(["Jupiter", "Jupiter", "  "]),
            Err(GameError::ArticlePoolTooSmall(1))
        );
        assert!(ArticlePool::new(Vec::<String>::new()).is_err());
    }

    #[test]
    fn pick_pair_is_always_distinct() {
        let pool = ArticlePool::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let (start, target) = pool.pick_pair(&mut rng);
            assert_ne!(start, target);
            assert!(pool.articles().contains(&start));
            assert!(pool.articles().contains(&target));
        }
    }

    #[test]
    fn two_title_pool_uses_both() {
        let pool = ArticlePool::new(["Japan", "Evolution"]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let (start, target) = pool.pick_pair(&mut rng);
        let mut both = vec![start.title().to_string(), target.title().to_string()];
        both.sort();
        assert_eq!(both, vec!["Evolution", "Japan"]);
    }
}
