//! Configuration management for the collection pipeline.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and an optional `.env` file. Unlike credentials-style
//! configuration, every value here has a documented default tuned against the
//! live Met Museum API, so a fresh checkout runs without any setup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Built-in defaults

use std::{env, path::PathBuf};

use crate::types::TargetArtist;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Looks for the file under the platform-specific local data directory
/// (`goghflow/.env`), creating the parent directory if needed. A missing
/// `.env` file is not an error since every setting has a default.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/goghflow/.env`
/// - macOS: `~/Library/Application Support/goghflow/.env`
/// - Windows: `%LOCALAPPDATA%/goghflow/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("goghflow/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    let _ = dotenv::from_path(path);
    Ok(())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Root directory for all persisted artifacts (`GOGHFLOW_DATA_DIR`).
///
/// Defaults to `./public/data`, the layout the viewer serves from. The
/// pipeline writes `collect-state.json`, `artworks.json`, `features.json`,
/// `images/{objectID}.jpg` and `overlays/{objectID}-texture.png` below it.
pub fn data_dir() -> PathBuf {
    env::var("GOGHFLOW_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("public/data"))
}

/// Base URL of the Met collection API (`GOGHFLOW_API_URL`).
pub fn met_apiurl() -> String {
    env::var("GOGHFLOW_API_URL")
        .unwrap_or_else(|_| "https://collectionapi.metmuseum.org/public/collection/v1".to_string())
}

/// Descriptive client identifier sent as `User-Agent` on every request
/// (`GOGHFLOW_USER_AGENT`). The Met asks API consumers to identify
/// themselves; anonymous agents get throttled noticeably harder.
pub fn user_agent() -> String {
    env::var("GOGHFLOW_USER_AGENT")
        .unwrap_or_else(|_| "GoghWithTheFlow/0.4 (contact: hulashc)".to_string())
}

/// Maximum artworks retained per artist (`GOGHFLOW_PER_ARTIST_CAP`, default 30).
pub fn per_artist_cap() -> u32 {
    env_u64("GOGHFLOW_PER_ARTIST_CAP", 30) as u32
}

/// Maximum search-result ids scanned per artist
/// (`GOGHFLOW_MAX_IDS_PER_ARTIST`, default 5000).
pub fn max_ids_per_artist() -> usize {
    env_u64("GOGHFLOW_MAX_IDS_PER_ARTIST", 5000) as usize
}

/// Courtesy pause between consecutive object fetches
/// (`GOGHFLOW_ITEM_PAUSE_MS`, default 900ms).
pub fn item_pause_ms() -> u64 {
    env_u64("GOGHFLOW_ITEM_PAUSE_MS", 900)
}

/// Pause between finishing one artist and starting the next
/// (`GOGHFLOW_ARTIST_PAUSE_MS`, default 10s). Kept much larger than the
/// inter-item pause; upstream blocks correlate with request bursts.
pub fn artist_pause_ms() -> u64 {
    env_u64("GOGHFLOW_ARTIST_PAUSE_MS", 10_000)
}

/// Retry budget for search calls (`GOGHFLOW_SEARCH_RETRIES`, default 8).
/// A whole artist scan depends on the one search response, so this budget
/// tolerates sustained throttling.
pub fn search_retries() -> u32 {
    env_u64("GOGHFLOW_SEARCH_RETRIES", 8) as u32
}

/// Retry budget for single-object fetches (`GOGHFLOW_OBJECT_RETRIES`,
/// default 5). Object failures are recoverable, the scan just advances.
pub fn object_retries() -> u32 {
    env_u64("GOGHFLOW_OBJECT_RETRIES", 5) as u32
}

/// First backoff step on a throttled response
/// (`GOGHFLOW_BACKOFF_BASE_MS`, default 2s).
pub fn backoff_base_ms() -> u64 {
    env_u64("GOGHFLOW_BACKOFF_BASE_MS", 2_000)
}

/// Upper bound for the exponential backoff, pre-jitter
/// (`GOGHFLOW_BACKOFF_CAP_MS`, default 180s).
pub fn backoff_cap_ms() -> u64 {
    env_u64("GOGHFLOW_BACKOFF_CAP_MS", 180_000)
}

/// Maximum uniform jitter added on top of the backoff
/// (`GOGHFLOW_BACKOFF_JITTER_MS`, default 1s).
pub fn backoff_jitter_ms() -> u64 {
    env_u64("GOGHFLOW_BACKOFF_JITTER_MS", 1_000)
}

/// Optional path to a JSON file overriding the built-in artist list
/// (`GOGHFLOW_ARTISTS_FILE`). Format: `[{ "name": "...", "q": "..." }]`.
pub fn artists_file() -> Option<PathBuf> {
    env::var("GOGHFLOW_ARTISTS_FILE").ok().map(PathBuf::from)
}

/// The curated v1 artist list.
///
/// Small and hand-picked on purpose; the collector is not a crawler. The
/// query string is free text for the search endpoint and may differ from the
/// display name we match records against.
pub fn target_artists() -> Vec<TargetArtist> {
    let list = [
        ("Vincent van Gogh", "Vincent van Gogh"),
        ("Claude Monet", "Claude Monet"),
        ("Pierre-Auguste Renoir", "Auguste Renoir"),
        ("Paul Cézanne", "Paul Cezanne"),
        ("Edgar Degas", "Edgar Degas"),
        ("Georges Seurat", "Georges Seurat"),
        ("Paul Gauguin", "Paul Gauguin"),
        ("Camille Pissarro", "Camille Pissarro"),
        ("J. M. W. Turner", "Joseph Mallord William Turner"),
        ("Katsushika Hokusai", "Katsushika Hokusai"),
    ];
    list.iter()
        .map(|(name, q)| TargetArtist {
            name: name.to_string(),
            query: q.to_string(),
        })
        .collect()
}
