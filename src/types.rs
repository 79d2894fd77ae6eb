use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry of the curated artist list. `query` is the free-text search
/// string sent to the API; `name` is what fetched records are matched
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetArtist {
    pub name: String,
    #[serde(rename = "q")]
    pub query: String,
}

/// Resume checkpoint for one artist's scan. `cursor` is the index of the
/// first unprocessed search-result id, `kept` the number of artworks already
/// retained. Never decreases within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistProgress {
    pub cursor: usize,
    pub kept: u32,
}

/// On-disk shape of `collect-state.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionState {
    #[serde(default, rename = "byArtist")]
    pub by_artist: BTreeMap<String, ArtistProgress>,
}

/// Response of `GET {api}/search?...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default, rename = "objectIDs")]
    pub object_ids: Option<Vec<i64>>,
}

/// Object record as returned by `GET {api}/objects/{id}`.
///
/// The upstream payload carries dozens more fields; serde skips what we do
/// not model. Everything is defaulted because the API serves partial records
/// for some objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetObject {
    #[serde(rename = "objectID")]
    pub object_id: i64,
    pub is_public_domain: bool,
    pub title: Option<String>,
    pub artist_display_name: Option<String>,
    pub object_date: Option<String>,
    pub primary_image: Option<String>,
    pub primary_image_small: Option<String>,
    pub department: Option<String>,
    pub culture: Option<String>,
    pub medium: Option<String>,
    #[serde(rename = "objectURL")]
    pub object_url: Option<String>,
}

/// One retained artwork as persisted in `artworks.json`. Immutable once
/// appended except for `image_local_small`, which the downloader fills in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkRecord {
    #[serde(rename = "objectID")]
    pub object_id: i64,
    pub title: Option<String>,
    pub artist_display_name: Option<String>,
    pub object_date: Option<String>,
    pub primary_image: Option<String>,
    pub primary_image_small: Option<String>,
    pub department: Option<String>,
    pub culture: Option<String>,
    pub medium: Option<String>,
    #[serde(rename = "objectURL")]
    pub object_url: Option<String>,
    /// Viewer-relative path of the locally cached image, set by the
    /// downloader so the browser never hits the upstream CDN (CORS).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_local_small: Option<String>,
}

impl From<&MetObject> for ArtworkRecord {
    fn from(obj: &MetObject) -> Self {
        Self {
            object_id: obj.object_id,
            title: obj.title.clone(),
            artist_display_name: obj.artist_display_name.clone(),
            object_date: obj.object_date.clone(),
            primary_image: obj.primary_image.clone(),
            primary_image_small: obj.primary_image_small.clone(),
            department: obj.department.clone(),
            culture: obj.culture.clone(),
            medium: obj.medium.clone(),
            object_url: obj.object_url.clone(),
            image_local_small: None,
        }
    }
}

/// On-disk shape of `artworks.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworksFile {
    pub generated_at: String,
    pub artworks: Vec<ArtworkRecord>,
}

/// One dominant color with its relative pixel population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swatch {
    pub hex: String,
    pub population: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteMetrics {
    pub swatches: Vec<Swatch>,
    pub avg_saturation: Option<f32>,
    pub avg_brightness: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextureMetrics {
    pub avg_edge_magnitude: Option<f32>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeMetrics {
    pub bins: u32,
    pub hist: Vec<f32>,
    pub coherence: Option<f32>,
}

/// One entry of `features.json`, keyed by stringified `objectID`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    #[serde(rename = "objectID")]
    pub object_id: i64,
    pub palette: Option<PaletteMetrics>,
    pub texture_energy: Option<TextureMetrics>,
    pub stroke_direction: Option<StrokeMetrics>,
    pub texture_map_url: String,
}

/// On-disk shape of `features.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturesFile {
    pub generated_at: String,
    pub features_by_id: BTreeMap<String, FeatureRecord>,
}
