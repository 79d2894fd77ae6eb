use std::path::PathBuf;

use goghflow::management::{ArtworkManager, CollectionStateStore, FeatureManager};
use goghflow::types::{ArtistProgress, ArtworkRecord, CollectionState, FeatureRecord};

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "goghflow-test-{tag}-{}-{}",
        std::process::id(),
        rand::random::<u32>()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn record(object_id: i64) -> ArtworkRecord {
    ArtworkRecord {
        object_id,
        title: Some(format!("Artwork {object_id}")),
        artist_display_name: Some("Vincent van Gogh".to_string()),
        object_date: Some("1889".to_string()),
        primary_image: Some(format!("https://images.example/{object_id}.jpg")),
        primary_image_small: Some(format!("https://images.example/{object_id}-small.jpg")),
        department: Some("European Paintings".to_string()),
        culture: None,
        medium: Some("Oil on canvas".to_string()),
        object_url: None,
        image_local_small: None,
    }
}

#[tokio::test]
async fn test_state_roundtrip() {
    let dir = temp_dir("state-roundtrip");
    let store = CollectionStateStore::new(dir.clone());

    let mut state = CollectionState::default();
    state.by_artist.insert(
        "Vincent van Gogh".to_string(),
        ArtistProgress { cursor: 17, kept: 4 },
    );
    store.save(&state).await.unwrap();

    let loaded = store.load().await;
    assert_eq!(
        loaded.by_artist.get("Vincent van Gogh"),
        Some(&ArtistProgress { cursor: 17, kept: 4 })
    );

    // no partially written temp file left behind
    assert!(!dir.join("collect-state.json.tmp").exists());
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_state_missing_file_loads_empty() {
    let dir = temp_dir("state-missing");
    let store = CollectionStateStore::new(dir.clone());
    let state = store.load().await;
    assert!(state.by_artist.is_empty());
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_state_corrupt_file_loads_empty() {
    let dir = temp_dir("state-corrupt");
    std::fs::write(dir.join("collect-state.json"), "{not json at all").unwrap();

    let store = CollectionStateStore::new(dir.clone());
    let state = store.load().await;
    assert!(state.by_artist.is_empty());
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_state_file_uses_by_artist_key() {
    let dir = temp_dir("state-shape");
    let store = CollectionStateStore::new(dir.clone());

    let mut state = CollectionState::default();
    state
        .by_artist
        .insert("Claude Monet".to_string(), ArtistProgress { cursor: 1, kept: 1 });
    store.save(&state).await.unwrap();

    let raw = std::fs::read_to_string(dir.join("collect-state.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("byArtist").is_some());
    assert_eq!(value["byArtist"]["Claude Monet"]["cursor"], 1);
    assert_eq!(value["byArtist"]["Claude Monet"]["kept"], 1);
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_artworks_roundtrip_and_dedup() {
    let dir = temp_dir("artworks");
    let mut mgr = ArtworkManager::new(dir.clone());

    assert!(mgr.add(record(101)));
    assert!(mgr.add(record(102)));
    // same objectID must not be appended twice
    assert!(!mgr.add(record(101)));
    assert_eq!(mgr.count(), 2);

    mgr.persist().await.unwrap();

    let reloaded = ArtworkManager::load(dir.clone()).await.unwrap();
    assert_eq!(reloaded.count(), 2);
    assert!(reloaded.has(101));
    assert!(reloaded.has(102));
    assert!(!reloaded.has(999));

    // wire shape: objectID key and generatedAt timestamp
    let raw = std::fs::read_to_string(dir.join("artworks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("generatedAt").is_some());
    assert_eq!(value["artworks"][0]["objectID"], 101);
    assert_eq!(value["artworks"][0]["artistDisplayName"], "Vincent van Gogh");
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_artworks_set_local_image() {
    let dir = temp_dir("artworks-local");
    let mut mgr = ArtworkManager::new(dir.clone());
    mgr.add(record(7));

    assert!(mgr.set_local_image(7, "./data/images/7.jpg".to_string()));
    // unchanged path reports no change
    assert!(!mgr.set_local_image(7, "./data/images/7.jpg".to_string()));
    // unknown id reports no change
    assert!(!mgr.set_local_image(999, "./data/images/999.jpg".to_string()));

    mgr.persist().await.unwrap();
    let raw = std::fs::read_to_string(dir.join("artworks.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["artworks"][0]["imageLocalSmall"], "./data/images/7.jpg");
    std::fs::remove_dir_all(dir).ok();
}

#[tokio::test]
async fn test_features_roundtrip() {
    let dir = temp_dir("features");
    let mut mgr = FeatureManager::new(dir.clone());

    mgr.insert(FeatureRecord {
        object_id: 42,
        palette: None,
        texture_energy: None,
        stroke_direction: None,
        texture_map_url: "./data/overlays/42-texture.png".to_string(),
    });
    mgr.persist().await.unwrap();

    let reloaded = FeatureManager::load(dir.clone()).await.unwrap();
    assert!(reloaded.has(42));
    assert_eq!(reloaded.count(), 1);

    let raw = std::fs::read_to_string(dir.join("features.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("generatedAt").is_some());
    assert_eq!(value["featuresById"]["42"]["objectID"], 42);
    assert_eq!(
        value["featuresById"]["42"]["textureMapUrl"],
        "./data/overlays/42-texture.png"
    );
    assert!(value["featuresById"]["42"]["palette"].is_null());
    std::fs::remove_dir_all(dir).ok();
}
