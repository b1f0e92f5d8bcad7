//! Faceted article search over an immutable corpus.
//!
//! The engine indexes every facet once at construction. A query is the
//! conjunction of all active facets (each facet a disjunction over its
//! selected values) followed by a case-insensitive text match, and is always
//! evaluated against the full corpus.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;
use tracing::debug;

use crate::types::{Article, BiasOrientation, FactCheckVerdict};
use crate::Result;

/// The search box plus the four facet selections. An empty selection set
/// leaves its facet unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    pub query: String,
    pub categories: BTreeSet<String>,
    pub sources: BTreeSet<String>,
    pub bias: BTreeSet<BiasOrientation>,
    pub fact_check: BTreeSet<FactCheckVerdict>,
}

impl FilterCriteria {
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.insert(source.into());
        self
    }

    pub fn with_bias(mut self, orientation: BiasOrientation) -> Self {
        self.bias.insert(orientation);
        self
    }

    pub fn with_fact_check(mut self, verdict: FactCheckVerdict) -> Self {
        self.fact_check.insert(verdict);
        self
    }

    /// Builds criteria from raw string selections, as received from a
    /// command line or a query string.
    pub fn from_raw<S: AsRef<str>>(
        query: &str,
        categories: &[S],
        sources: &[S],
        bias: &[S],
        fact_check: &[S],
    ) -> Result<Self> {
        Ok(Self {
            query: query.to_string(),
            categories: categories.iter().map(|s| s.as_ref().to_string()).collect(),
            sources: sources.iter().map(|s| s.as_ref().to_string()).collect(),
            bias: bias
                .iter()
                .map(|s| s.as_ref().parse::<BiasOrientation>())
                .collect::<Result<_>>()?,
            fact_check: fact_check
                .iter()
                .map(|s| s.as_ref().parse::<FactCheckVerdict>())
                .collect::<Result<_>>()?,
        })
    }

    pub fn has_text_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// True when nothing constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        !self.has_text_query()
            && self.categories.is_empty()
            && self.sources.is_empty()
            && self.bias.is_empty()
            && self.fact_check.is_empty()
    }

    /// Bias and fact-check facets are the pro-only "advanced" filters.
    pub fn uses_advanced_filters(&self) -> bool {
        !self.bias.is_empty() || !self.fact_check.is_empty()
    }
}

/// Lowercased copies of the fields the text query looks at.
#[derive(Debug)]
struct SearchText {
    title: String,
    content: String,
    author: String,
    tags: Vec<String>,
}

impl SearchText {
    fn new(article: &Article) -> Self {
        Self {
            title: article.title.to_lowercase(),
            content: article.content.to_lowercase(),
            author: article.author.to_lowercase(),
            tags: article.tags.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    fn contains(&self, needle: &str) -> bool {
        self.title.contains(needle)
            || self.content.contains(needle)
            || self.tags.iter().any(|t| t.contains(needle))
            || self.author.contains(needle)
    }
}

/// Result of one search: matching articles in corpus order plus the
/// vocabularies of the whole corpus.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome<'a> {
    pub articles: Vec<&'a Article>,
    pub categories: &'a [String],
    pub sources: &'a [String],
}

#[derive(Debug)]
pub struct FilterEngine {
    articles: Vec<Article>,
    search_text: Vec<SearchText>,
    by_category: HashMap<String, Vec<usize>>,
    by_source: HashMap<String, Vec<usize>>,
    by_bias: HashMap<BiasOrientation, Vec<usize>>,
    by_fact_check: HashMap<FactCheckVerdict, Vec<usize>>,
    categories: Vec<String>,
    sources: Vec<String>,
}

impl FilterEngine {
    pub fn new(articles: Vec<Article>) -> Self {
        let mut by_category: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_source: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_bias: HashMap<BiasOrientation, Vec<usize>> = HashMap::new();
        let mut by_fact_check: HashMap<FactCheckVerdict, Vec<usize>> = HashMap::new();

        for (idx, article) in articles.iter().enumerate() {
            by_category.entry(article.category.clone()).or_default().push(idx);
            by_source.entry(article.source.clone()).or_default().push(idx);
            by_bias
                .entry(article.political_bias.orientation)
                .or_default()
                .push(idx);
            by_fact_check
                .entry(article.fact_check_status.status)
                .or_default()
                .push(idx);
        }

        let categories = sorted_keys(&by_category);
        let sources = sorted_keys(&by_source);
        let search_text = articles.iter().map(SearchText::new).collect();

        debug!(
            "Indexed {} articles ({} categories, {} sources)",
            articles.len(),
            categories.len(),
            sources.len()
        );

        Self {
            articles,
            search_text,
            by_category,
            by_source,
            by_bias,
            by_fact_check,
            categories,
            sources,
        }
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Distinct categories of the full corpus, sorted.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Distinct sources of the full corpus, sorted.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn apply(&self, criteria: &FilterCriteria) -> FilterOutcome<'_> {
        FilterOutcome {
            articles: self.filter(criteria),
            categories: &self.categories,
            sources: &self.sources,
        }
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Article> {
        self.matching_indices(criteria)
            .into_iter()
            .map(|idx| &self.articles[idx])
            .collect()
    }

    /// Corpus positions of every article satisfying `criteria`, ascending.
    pub fn matching_indices(&self, criteria: &FilterCriteria) -> Vec<usize> {
        let mut facets = Vec::with_capacity(4);
        if !criteria.categories.is_empty() {
            facets.push(union(&self.by_category, criteria.categories.iter()));
        }
        if !criteria.sources.is_empty() {
            facets.push(union(&self.by_source, criteria.sources.iter()));
        }
        if !criteria.bias.is_empty() {
            facets.push(union(&self.by_bias, criteria.bias.iter()));
        }
        if !criteria.fact_check.is_empty() {
            facets.push(union(&self.by_fact_check, criteria.fact_check.iter()));
        }
        // Smallest posting list first keeps every intersection short.
        facets.sort_by_key(Vec::len);

        let mut candidates: Option<Vec<usize>> = None;
        for postings in facets {
            let next = match candidates {
                None => postings,
                Some(current) => intersect(&current, &postings),
            };
            if next.is_empty() {
                return next;
            }
            candidates = Some(next);
        }
        let candidates = candidates.unwrap_or_else(|| (0..self.articles.len()).collect());

        if !criteria.has_text_query() {
            return candidates;
        }
        let needle = criteria.query.to_lowercase();
        candidates
            .into_iter()
            .filter(|&idx| self.search_text[idx].contains(&needle))
            .collect()
    }
}

fn sorted_keys(index: &HashMap<String, Vec<usize>>) -> Vec<String> {
    let mut keys: Vec<String> = index.keys().cloned().collect();
    keys.sort();
    keys
}

/// Sorted, deduplicated positions for any of `keys`.
fn union<'k, K, I>(index: &HashMap<K, Vec<usize>>, keys: I) -> Vec<usize>
where
    K: Hash + Eq + 'k,
    I: Iterator<Item = &'k K>,
{
    let mut merged: Vec<usize> = keys
        .filter_map(|key| index.get(key))
        .flat_map(|postings| postings.iter().copied())
        .collect();
    merged.sort_unstable();
    merged.dedup();
    merged
}

fn intersect(a: &[usize], b: &[usize]) -> Vec<usize> {
    let (mut i, mut j) = (0, 0);
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
    out
}
