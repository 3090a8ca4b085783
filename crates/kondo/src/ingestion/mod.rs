//! Inbound document handling for the WhatsApp media pipeline.

mod pdf;

pub use pdf::{route_pdf, IngestionConfig, PdfExtractionRoute, DEFAULT_PDF_INLINE_LIMIT_BYTES};
