use serde::Serialize;

/// Largest PDF extracted straight from the inbound message payload.
pub const DEFAULT_PDF_INLINE_LIMIT_BYTES: u64 = 4 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionConfig {
    pub pdf_inline_limit_bytes: u64,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            pdf_inline_limit_bytes: DEFAULT_PDF_INLINE_LIMIT_BYTES,
        }
    }
}

/// How an inbound PDF reaches the extraction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PdfExtractionRoute {
    /// Extracted synchronously from the downloaded bytes.
    Inline,
    /// Uploaded to object storage first and extracted asynchronously.
    Staged,
}

pub fn route_pdf(size_bytes: u64, config: &IngestionConfig) -> PdfExtractionRoute {
    let route = if size_bytes <= config.pdf_inline_limit_bytes {
        PdfExtractionRoute::Inline
    } else {
        PdfExtractionRoute::Staged
    };

    tracing::debug!(
        size_bytes,
        limit_bytes = config.pdf_inline_limit_bytes,
        ?route,
        "pdf extraction route selected"
    );

    route
}
