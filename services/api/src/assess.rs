use chrono::Utc;
use clap::Args;
use kondo::config::AppConfig;
use kondo::error::AppError;
use kondo::quality::{KondoId, KondoRecord, MediaRecord, QualityAssessment, QualityEngine};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding the flat listing record
    #[arg(long)]
    pub(crate) listing: PathBuf,
    /// JSON file holding an array of media records
    #[arg(long)]
    pub(crate) media: Option<PathBuf>,
    /// Identifier stamped on the assessment
    #[arg(long, default_value_t = 0)]
    pub(crate) kondo_id: u64,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let engine = QualityEngine::new(config.quality);

    let assessment = assess_files(&engine, &args)?;
    println!("{}", serde_json::to_string_pretty(&assessment)?);
    Ok(())
}

pub(crate) fn assess_files(
    engine: &QualityEngine,
    args: &AssessArgs,
) -> Result<QualityAssessment, AppError> {
    let listing: KondoRecord = read_json(&args.listing)?;
    let media: Vec<MediaRecord> = match &args.media {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    Ok(engine.assess(KondoId(args.kondo_id), &listing, &media, Utc::now()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
