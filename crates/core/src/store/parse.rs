//! Parsing of `appdetails` response bodies.
//!
//! The store API answers `{"<appid>": {"success": bool, "data": {...}}}` and
//! is loose with its types: `required_age` may arrive as a string, and
//! requirement blocks may be `[]` instead of an object. Only a missing or
//! null key is "not provided"; `""` and `[]` are kept as sent.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::types::{
    Achievements, Category, DetailRecord, Genre, Metacritic, Movie, MovieFormats, Platforms,
    PriceOverview, Recommendations, ReleaseDate, Requirements, Screenshot,
};

/// Why a response body did not yield details.
#[derive(Debug, Error)]
pub(crate) enum DetailParseError {
    #[error("Steam API returned success=false")]
    Rejected,
    #[error("Failed to parse response: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for DetailParseError {
    fn from(e: serde_json::Error) -> Self {
        DetailParseError::Malformed(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    data: Option<WireData>,
}

#[derive(Debug, Default, Deserialize)]
struct WireData {
    #[serde(rename = "type")]
    kind: Option<String>,
    name: Option<String>,
    required_age: Option<NumberOrText>,
    is_free: Option<bool>,
    controller_support: Option<String>,
    dlc: Option<Vec<u32>>,
    detailed_description: Option<String>,
    about_the_game: Option<String>,
    short_description: Option<String>,
    price_overview: Option<PriceOverview>,
    header_image: Option<String>,
    screenshots: Option<Vec<Screenshot>>,
    movies: Option<Vec<WireMovie>>,
    categories: Option<Vec<Category>>,
    genres: Option<Vec<Genre>>,
    developers: Option<Vec<String>>,
    publishers: Option<Vec<String>>,
    supported_languages: Option<String>,
    platforms: Option<Platforms>,
    pc_requirements: Option<Value>,
    mac_requirements: Option<Value>,
    linux_requirements: Option<Value>,
    metacritic: Option<Metacritic>,
    recommendations: Option<Recommendations>,
    achievements: Option<Achievements>,
    release_date: Option<ReleaseDate>,
    website: Option<String>,
    legal_notice: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    fn as_age(&self) -> u32 {
        match self {
            NumberOrText::Number(n) => u32::try_from(*n).unwrap_or(0),
            NumberOrText::Text(s) => s.trim().parse().unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireMovie {
    id: Option<u32>,
    name: Option<String>,
    thumbnail: Option<String>,
    webm: Option<MovieFormats>,
    mp4: Option<MovieFormats>,
}

/// Parse the response for `app_id` into a successful [`DetailRecord`].
pub(crate) fn parse_detail_response(
    app_id: u32,
    body: &str,
) -> Result<DetailRecord, DetailParseError> {
    let mut root: HashMap<String, Value> = serde_json::from_str(body)?;
    let entry = root.remove(&app_id.to_string()).ok_or_else(|| {
        DetailParseError::Malformed(format!("no entry for app {app_id} in response"))
    })?;

    let envelope: Envelope = serde_json::from_value(entry)?;
    if !envelope.success {
        return Err(DetailParseError::Rejected);
    }

    let data = envelope
        .data
        .ok_or_else(|| DetailParseError::Malformed("missing data object".to_string()))?;

    Ok(into_record(app_id, data))
}

fn into_record(app_id: u32, data: WireData) -> DetailRecord {
    DetailRecord {
        app_id,
        kind: data.kind.unwrap_or_else(|| "unknown".to_string()),
        name: data.name.unwrap_or_else(|| "Unknown".to_string()),
        required_age: data.required_age.map(|a| a.as_age()).unwrap_or(0),
        is_free: data.is_free.unwrap_or(false),
        success: true,
        controller_support: data.controller_support,
        dlc: data.dlc,
        detailed_description: data.detailed_description,
        about_the_game: data.about_the_game,
        short_description: data.short_description,
        price_overview: data.price_overview,
        header_image: data.header_image,
        screenshots: data.screenshots,
        movies: data.movies.map(movies),
        categories: data.categories,
        genres: data.genres,
        developers: data.developers,
        publishers: data.publishers,
        supported_languages: data.supported_languages,
        platforms: data.platforms.unwrap_or_default(),
        pc_requirements: requirements(data.pc_requirements),
        mac_requirements: requirements(data.mac_requirements),
        linux_requirements: requirements(data.linux_requirements),
        metacritic: data.metacritic,
        recommendations: data.recommendations,
        achievements: data.achievements,
        release_date: data.release_date.unwrap_or_default(),
        website: data.website,
        legal_notice: data.legal_notice,
    }
}

/// Movies without a webm rendition are dropped.
fn movies(raw: Vec<WireMovie>) -> Vec<Movie> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(i, m)| {
            Some(Movie {
                webm: m.webm?,
                id: m.id.unwrap_or(i as u32),
                name: m.name.unwrap_or_default(),
                thumbnail: m.thumbnail.unwrap_or_default(),
                mp4: m.mp4,
            })
        })
        .collect()
}

/// Requirement blocks that are not objects (Steam sends `[]`) count as absent.
fn requirements(value: Option<Value>) -> Option<Requirements> {
    let Some(Value::Object(map)) = value else {
        return None;
    };

    let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_string);

    Some(Requirements {
        minimum: text("minimum"),
        recommended: text("recommended"),
    })
}
