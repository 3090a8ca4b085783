//! Listing-update service: loads a Kondo and its media, scores it and stores the
//! assessment for the publication gate.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{KondoRepository, PublicationStatus, QualityStatusView, RepositoryError};
pub use router::{quality_router, AssessmentRequest};
pub use service::{KondoQualityService, KondoQualityServiceError};
