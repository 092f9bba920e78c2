//! Keyword-based category classification.
//!
//! `categorize` is a pure total function: every `(title, description)` pair
//! maps to exactly one [`Category`], with no I/O and no randomness, so
//! reprocessing the same complaint is idempotent.

use super::domain::Category;

const ROAD_KEYWORDS: &[&str] = &[
    "pothole", "road", "asphalt", "pavement", "sidewalk", "crosswalk", "bridge", "lane",
    "highway", "traffic",
];

const WATER_KEYWORDS: &[&str] = &[
    "water", "leak", "pipe", "drain", "flood", "hydrant", "burst main",
];

const SANITATION_KEYWORDS: &[&str] = &[
    "garbage", "trash", "litter", "waste", "sewage", "rubbish", "dumping", "sanitation",
];

const LIGHTING_KEYWORDS: &[&str] = &[
    "streetlight", "street light", "lamp post", "lamppost", "lighting", "light pole", "bulb",
];

/// Map complaint text to one taxonomy category.
///
/// Keyword tables are checked in a fixed order (road, water, sanitation,
/// lighting) against the lowercased title and description; anything unmatched
/// is `Other`.
pub fn categorize(title: &str, description: &str) -> Category {
    let text = format!("{} {}", title, description).to_lowercase();

    if matches_any(&text, ROAD_KEYWORDS) {
        return Category::Road;
    }
    if matches_any(&text, WATER_KEYWORDS) {
        return Category::Water;
    }
    if matches_any(&text, SANITATION_KEYWORDS) {
        return Category::Sanitation;
    }
    if matches_any(&text, LIGHTING_KEYWORDS) {
        return Category::Lighting;
    }

    Category::Other
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
