//! Field-presence analysis of a Kondo's descriptive content.
//!
//! Attributes are grouped into three tiers. Each present attribute adds a fixed
//! increment to one breakdown category: core attributes feed `basic_info`, secondary
//! attributes feed `details` and the long tail of other attributes feeds `pricing`.

use super::config::QualityConfig;
use super::domain::{ContentBreakdown, KondoRecord};

pub const CORE_INCREMENT: f64 = 0.1;
pub const SECONDARY_INCREMENT: f64 = 0.05;
pub const OTHER_INCREMENT: f64 = 0.01;

/// Identity attributes of a listing.
pub const CORE_FIELDS: [&str; 4] = ["name", "status", "type", "description"];

/// Location attributes of a listing.
pub const SECONDARY_FIELDS: [&str; 5] = [
    "minutes_from_bh",
    "cep",
    "address_street",
    "address_neighborhood",
    "city",
];

/// Flags, pricing, financing, amenities, contact and media attributes.
pub const OTHER_FIELDS: [&str; 40] = [
    "active",
    "highlight",
    "slug",
    "featured_image",
    "lot_avg_price",
    "condo_rent",
    "finance",
    "finance_tranches",
    "finance_fees",
    "entry_value_percentage",
    "lots_available",
    "lots_min_size",
    "infra_lobby_24h",
    "infra_security_team",
    "infra_wall",
    "infra_sports_court",
    "infra_barbecue_zone",
    "infra_pool",
    "infra_living_space",
    "infra_pet_area",
    "infra_kids_area",
    "infra_lagoon",
    "infra_generates_revenue",
    "infra_market_nearby",
    "infra_party_saloon",
    "infra_lounge_bar",
    "infra_home_office",
    "infra_gym",
    "infra_woods",
    "infra_grass_area",
    "infra_eletricity",
    "infra_water",
    "infra_sewage",
    "infra_gourmet_space",
    "infra_description",
    "phone",
    "email",
    "url",
    "total_area",
    "video",
];

/// Accumulates the raw content breakdown for a listing.
///
/// Configured content weights are not applied here; `conveniences` is never credited.
pub fn analyze_content_quality(kondo: &KondoRecord, _config: &QualityConfig) -> ContentBreakdown {
    let mut breakdown = ContentBreakdown::default();

    for field in CORE_FIELDS {
        if kondo.is_present(field) {
            breakdown.basic_info += CORE_INCREMENT;
        }
    }

    for field in SECONDARY_FIELDS {
        if kondo.is_present(field) {
            breakdown.details += SECONDARY_INCREMENT;
        }
    }

    for field in OTHER_FIELDS {
        if kondo.is_present(field) {
            breakdown.pricing += OTHER_INCREMENT;
        }
    }

    breakdown
}
