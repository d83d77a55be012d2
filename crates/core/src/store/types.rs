//! Steam Store app detail records.
//!
//! Nested types deserialize straight from the store wire format and
//! serialize back to the same keys. Optional fields on [`DetailRecord`] are
//! omitted from output when absent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the store layer.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Caller-supplied app id list was rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),
}

/// Store details for one requested app, or a record of why they are missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailRecord {
    pub app_id: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub required_age: u32,
    pub is_free: bool,
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_support: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dlc: Option<Vec<u32>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_the_game: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_overview: Option<PriceOverview>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshots: Option<Vec<Screenshot>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movies: Option<Vec<Movie>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<Genre>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publishers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supported_languages: Option<String>,

    pub platforms: Platforms,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pc_requirements: Option<Requirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_requirements: Option<Requirements>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_requirements: Option<Requirements>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic: Option<Metacritic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<Achievements>,

    pub release_date: ReleaseDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_notice: Option<String>,
}

impl DetailRecord {
    /// Record standing in for an app whose details could not be retrieved.
    pub fn failed(app_id: u32, reason: impl AsRef<str>) -> Self {
        Self {
            app_id,
            kind: "error".to_string(),
            name: format!("Failed to fetch details: {}", reason.as_ref()),
            required_age: 0,
            is_free: false,
            success: false,
            controller_support: None,
            dlc: None,
            detailed_description: None,
            about_the_game: None,
            short_description: None,
            price_overview: None,
            header_image: None,
            screenshots: None,
            movies: None,
            categories: None,
            genres: None,
            developers: None,
            publishers: None,
            supported_languages: None,
            platforms: Platforms::default(),
            pc_requirements: None,
            mac_requirements: None,
            linux_requirements: None,
            metacritic: None,
            recommendations: None,
            achievements: None,
            release_date: ReleaseDate::default(),
            website: None,
            legal_notice: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOverview {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Price in the currency's minor unit (cents).
    #[serde(default)]
    pub initial: i64,
    #[serde(default, rename = "final")]
    pub final_price: i64,
    #[serde(default)]
    pub discount_percent: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_formatted: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Screenshot {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub path_thumbnail: String,
    #[serde(default)]
    pub path_full: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: u32,
    pub name: String,
    pub thumbnail: String,
    pub webm: MovieFormats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mp4: Option<MovieFormats>,
}

/// Video URLs for one container format.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MovieFormats {
    #[serde(default, rename = "480")]
    pub low: String,
    #[serde(default)]
    pub max: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

/// Store genre. Steam sends genre ids as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Platforms {
    #[serde(default)]
    pub windows: bool,
    #[serde(default)]
    pub mac: bool,
    #[serde(default)]
    pub linux: bool,
}

/// System requirements as HTML fragments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Requirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metacritic {
    #[serde(default)]
    pub score: i32,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievements {
    #[serde(default)]
    pub total: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<Vec<HighlightedAchievement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightedAchievement {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    #[serde(default = "unknown_date")]
    pub date: String,
}

impl Default for ReleaseDate {
    fn default() -> Self {
        Self {
            coming_soon: false,
            date: unknown_date(),
        }
    }
}

fn unknown_date() -> String {
    "Unknown".to_string()
}
