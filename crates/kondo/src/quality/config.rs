use std::env;

use serde::Serialize;

pub const THRESHOLD_ENV: &str = "KONDO_QUALITY_THRESHOLD";
pub const CONTENT_BASIC_INFO_ENV: &str = "KONDO_CONTENT_WEIGHT_BASIC_INFO";
pub const CONTENT_PRICING_ENV: &str = "KONDO_CONTENT_WEIGHT_PRICING";
pub const CONTENT_CONVENIENCES_ENV: &str = "KONDO_CONTENT_WEIGHT_CONVENIENCES";
pub const CONTENT_ADDITIONAL_DETAILS_ENV: &str = "KONDO_CONTENT_WEIGHT_ADDITIONAL_DETAILS";
pub const MEDIA_IMAGES_ENV: &str = "KONDO_MEDIA_WEIGHT_IMAGES";
pub const MEDIA_IMAGE_QUALITY_ENV: &str = "KONDO_MEDIA_WEIGHT_IMAGE_QUALITY";
pub const MEDIA_VIDEOS_ENV: &str = "KONDO_MEDIA_WEIGHT_VIDEOS";
pub const MEDIA_RECENCY_ENV: &str = "KONDO_MEDIA_WEIGHT_RECENCY";

/// Allowed drift between a weight set's sum and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

pub const DEFAULT_THRESHOLD: f64 = 0.7;

/// Relative importance of the content categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContentWeights {
    pub basic_info: f64,
    pub pricing: f64,
    pub conveniences: f64,
    pub additional_details: f64,
}

impl ContentWeights {
    pub fn sum(&self) -> f64 {
        self.basic_info + self.pricing + self.conveniences + self.additional_details
    }

    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("content.basic_info", self.basic_info),
            ("content.pricing", self.pricing),
            ("content.conveniences", self.conveniences),
            ("content.additional_details", self.additional_details),
        ]
    }
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            basic_info: 0.2,
            pricing: 0.3,
            conveniences: 0.3,
            additional_details: 0.2,
        }
    }
}

/// Relative importance of the media categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MediaWeights {
    pub images: f64,
    pub image_quality: f64,
    pub videos: f64,
    pub media_recency: f64,
}

impl MediaWeights {
    pub fn sum(&self) -> f64 {
        self.images + self.image_quality + self.videos + self.media_recency
    }

    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("media.images", self.images),
            ("media.image_quality", self.image_quality),
            ("media.videos", self.videos),
            ("media.media_recency", self.media_recency),
        ]
    }
}

impl Default for MediaWeights {
    fn default() -> Self {
        Self {
            images: 0.4,
            image_quality: 0.3,
            videos: 0.2,
            media_recency: 0.1,
        }
    }
}

/// Validated scoring configuration.
///
/// The only ways to obtain one are [`QualityConfig::new`], [`QualityConfig::from_env`],
/// [`QualityConfig::from_lookup`] and `Default`, so every instance in circulation has
/// passed [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityConfig {
    threshold: f64,
    content_weights: ContentWeights,
    media_weights: MediaWeights,
}

impl QualityConfig {
    pub fn new(
        threshold: f64,
        content_weights: ContentWeights,
        media_weights: MediaWeights,
    ) -> Result<Self, QualityConfigError> {
        validate(threshold, &content_weights, &media_weights)?;
        Ok(Self {
            threshold,
            content_weights,
            media_weights,
        })
    }

    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, QualityConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Missing keys fall back to their defaults. A value that is present but does not
    /// parse as a number becomes `NaN` and is rejected by validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, QualityConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: f64| match lookup(key) {
            Some(raw) => raw.trim().parse::<f64>().unwrap_or(f64::NAN),
            None => default,
        };

        let content_defaults = ContentWeights::default();
        let media_defaults = MediaWeights::default();

        let content_weights = ContentWeights {
            basic_info: read(CONTENT_BASIC_INFO_ENV, content_defaults.basic_info),
            pricing: read(CONTENT_PRICING_ENV, content_defaults.pricing),
            conveniences: read(CONTENT_CONVENIENCES_ENV, content_defaults.conveniences),
            additional_details: read(
                CONTENT_ADDITIONAL_DETAILS_ENV,
                content_defaults.additional_details,
            ),
        };

        let media_weights = MediaWeights {
            images: read(MEDIA_IMAGES_ENV, media_defaults.images),
            image_quality: read(MEDIA_IMAGE_QUALITY_ENV, media_defaults.image_quality),
            videos: read(MEDIA_VIDEOS_ENV, media_defaults.videos),
            media_recency: read(MEDIA_RECENCY_ENV, media_defaults.media_recency),
        };

        Self::new(
            read(THRESHOLD_ENV, DEFAULT_THRESHOLD),
            content_weights,
            media_weights,
        )
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn content_weights(&self) -> &ContentWeights {
        &self.content_weights
    }

    pub fn media_weights(&self) -> &MediaWeights {
        &self.media_weights
    }
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            content_weights: ContentWeights::default(),
            media_weights: MediaWeights::default(),
        }
    }
}

/// Checks a threshold and weight sets against the configuration invariants.
///
/// A `NaN` threshold is out of range and a `NaN` weight unbalances its sum.
pub fn validate(
    threshold: f64,
    content_weights: &ContentWeights,
    media_weights: &MediaWeights,
) -> Result<(), QualityConfigError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(QualityConfigError::ThresholdOutOfRange { value: threshold });
    }

    if let Some((name, value)) = content_weights
        .named()
        .into_iter()
        .chain(media_weights.named())
        .find(|(_, value)| *value < 0.0)
    {
        return Err(QualityConfigError::NegativeWeight { name, value });
    }

    let content_sum = content_weights.sum();
    if !is_balanced(content_sum) {
        return Err(QualityConfigError::ContentWeightsSum { sum: content_sum });
    }

    let media_sum = media_weights.sum();
    if !is_balanced(media_sum) {
        return Err(QualityConfigError::MediaWeightsSum { sum: media_sum });
    }

    Ok(())
}

fn is_balanced(sum: f64) -> bool {
    (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QualityConfigError {
    #[error("quality threshold out of range: {value} is not within [0.0, 1.0]")]
    ThresholdOutOfRange { value: f64 },
    #[error("content weights sum mismatch: weights sum to {sum:.4}, expected 1.0")]
    ContentWeightsSum { sum: f64 },
    #[error("media weights sum mismatch: weights sum to {sum:.4}, expected 1.0")]
    MediaWeightsSum { sum: f64 },
    #[error("negative weight: {name} is {value}, weights must be non-negative")]
    NegativeWeight { name: &'static str, value: f64 },
}
