//! Listing quality scoring for Kondo real-estate listings.

pub mod config;
pub mod error;
pub mod ingestion;
pub mod listings;
pub mod quality;
pub mod telemetry;
