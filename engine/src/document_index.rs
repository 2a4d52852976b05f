use crate::text_normalizer::normalize;
use anyhow::{Context, Result};
use async_trait::async_trait;

/// Supplies extracted plain text for one page at a time.
///
/// Pages are numbered from 1. Extraction itself (PDF text layers, OCR, ...)
/// belongs to the implementor; the index only consumes the strings.
#[async_trait]
pub trait PageTextSource: Send + Sync {
    async fn page_count(&self) -> Result<usize>;

    async fn page_text(&self, page: usize) -> Result<String>;
}

#[async_trait]
impl PageTextSource for Vec<String> {
    async fn page_count(&self) -> Result<usize> {
        Ok(self.len())
    }

    async fn page_text(&self, page: usize) -> Result<String> {
        page.checked_sub(1)
            .and_then(|idx| self.get(idx))
            .cloned()
            .with_context(|| format!("page {} is out of range 1..={}", page, self.len()))
    }
}

/// Normalized text of one opened document.
///
/// Built once when the document is opened and never mutated afterwards;
/// a changed document gets a new index. Share it behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentTextIndex {
    pages: Vec<String>,
    full_text: String,
}

impl DocumentTextIndex {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalizes every page in reading order.
    pub fn build<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages: Vec<String> = pages.into_iter().map(|page| normalize(page.as_ref())).collect();
        // Page boundaries are whitespace, which normalization deletes, so the
        // concatenation reads as one continuous book.
        let full_text = pages.concat();

        log::info!(
            "Built document index: {} pages, {} normalized chars",
            pages.len(),
            full_text.chars().count()
        );

        Self { pages, full_text }
    }

    /// Pulls pages `1..=page_count` from `source` and builds the index.
    /// Any page failure aborts the whole load.
    pub async fn load(source: &dyn PageTextSource) -> Result<Self> {
        let total = source.page_count().await.context("failed to count pages")?;
        let mut pages = Vec::with_capacity(total);

        for page in 1..=total {
            let text = source
                .page_text(page)
                .await
                .with_context(|| format!("failed to read text of page {}", page))?;
            pages.push(text);
        }

        Ok(Self::build(pages))
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page_text(&self, page: usize) -> Option<&str> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .map(String::as_str)
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// `(page_number, normalized_text)` in ascending page order.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.pages
            .iter()
            .enumerate()
            .map(|(idx, text)| (idx + 1, text.as_str()))
    }
}
