use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use citation_engine::PageTextSource;

/// Per-page text of an uploaded PDF.
pub struct PdfPages {
    pages: Vec<String>,
}

impl PdfPages {
    /// Runs `pdf-extract` over the whole file on a blocking thread.
    pub async fn extract(pdf: Bytes) -> Result<Self> {
        log::info!("Extracting text from {} byte PDF", pdf.len());

        let pages = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem_by_pages(&pdf))
            .await
            .context("PDF extraction task panicked")?
            .context("failed to extract text from PDF")?;

        log::info!("Extracted {} pages", pages.len());
        Ok(Self { pages })
    }
}

#[async_trait]
impl PageTextSource for PdfPages {
    async fn page_count(&self) -> Result<usize> {
        Ok(self.pages.len())
    }

    async fn page_text(&self, page: usize) -> Result<String> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx))
            .cloned()
            .with_context(|| format!("PDF has no page {}", page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citation_engine::DocumentTextIndex;

    fn two_pages() -> PdfPages {
        PdfPages {
            pages: vec![
                "Leadership requires\ntrust.\n".to_string(),
                "Trust is built\tover Time.".to_string(),
            ],
        }
    }

    #[tokio::test]
    async fn pages_are_numbered_from_one() {
        let pages = two_pages();

        assert_eq!(pages.page_count().await.unwrap(), 2);
        assert_eq!(pages.page_text(1).await.unwrap(), "Leadership requires\ntrust.\n");
        assert_eq!(pages.page_text(2).await.unwrap(), "Trust is built\tover Time.");
    }

    #[tokio::test]
    async fn missing_pages_are_errors() {
        let pages = two_pages();

        let err = pages.page_text(0).await.unwrap_err();
        assert!(err.to_string().contains("no page 0"));
        let err = pages.page_text(3).await.unwrap_err();
        assert!(err.to_string().contains("no page 3"));
    }

    #[tokio::test]
    async fn loads_into_a_normalized_index() {
        let index = DocumentTextIndex::load(&two_pages()).await.unwrap();

        assert_eq!(index.total_pages(), 2);
        assert_eq!(index.page_text(1), Some("leadershiprequirestrust."));
        assert_eq!(index.page_text(2), Some("trustisbuiltovertime."));
    }
}
