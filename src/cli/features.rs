use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::{
    config, error,
    features::{palette, strokes, texture},
    info,
    management::{ArtworkManager, FeatureManager},
    success,
    types::{ArtworkRecord, FeatureRecord},
    warning,
};

fn overlay_ok(path: &Path) -> bool {
    std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

/// Derives one artwork's feature record, writing its displacement map as a
/// side effect. Returns `None` when the cached image is absent or unreadable
/// or the map cannot be written; the artwork is then simply skipped.
fn compute_one(
    artwork: &ArtworkRecord,
    images_dir: &Path,
    overlays_dir: &Path,
) -> Option<FeatureRecord> {
    let object_id = artwork.object_id;
    let img_path = images_dir.join(format!("{object_id}.jpg"));
    if !img_path.exists() {
        warning!("No cached image for {}, skipping. Run goghflow download.", object_id);
        return None;
    }

    let img = match image::open(&img_path) {
        Ok(img) => img,
        Err(e) => {
            warning!("Cannot decode {}: {}", img_path.display(), e);
            return None;
        }
    };

    let palette = palette::analyze(&img);
    let stroke = strokes::analyze(&img);
    let (texture_metrics, map) = texture::analyze(&img);

    let overlay_path = overlays_dir.join(format!("{object_id}-texture.png"));
    if let Err(e) = map.save(&overlay_path) {
        warning!("Cannot write {}: {}", overlay_path.display(), e);
        return None;
    }

    Some(FeatureRecord {
        object_id,
        palette: Some(palette),
        texture_energy: Some(texture_metrics),
        stroke_direction: Some(stroke),
        texture_map_url: format!("./data/overlays/{object_id}-texture.png"),
    })
}

/// Runs the feature-extraction stage over every artwork with a cached image.
///
/// Artworks are independent, so the convolution-heavy work fans out over the
/// rayon pool; output order is irrelevant since records are keyed by
/// `objectID`. Records that already exist with an intact displacement map
/// are reused unless `force` is set.
pub async fn features(force: bool) {
    let data_dir = config::data_dir();
    let artwork_mgr = match ArtworkManager::load(data_dir.clone()).await {
        Ok(mgr) => mgr,
        Err(e) => {
            error!("Cannot load artworks.json: {}. Run goghflow collect first.", e);
        }
    };

    let mut feature_mgr = FeatureManager::load(data_dir.clone())
        .await
        .unwrap_or_else(|_| FeatureManager::new(data_dir.clone()));

    let images_dir = data_dir.join("images");
    let overlays_dir = data_dir.join("overlays");
    if let Err(e) = async_fs::create_dir_all(&overlays_dir).await {
        error!("Cannot create {}: {}", overlays_dir.display(), e);
    }

    let todo: Vec<&ArtworkRecord> = artwork_mgr
        .all()
        .iter()
        .filter(|a| {
            let overlay = overlays_dir.join(format!("{}-texture.png", a.object_id));
            force || !feature_mgr.has(a.object_id) || !overlay_ok(&overlay)
        })
        .collect();

    let skipped = artwork_mgr.count() - todo.len();
    if skipped > 0 {
        info!("{} artworks already have features, skipping (use --force to recompute)", skipped);
    }

    let pb = ProgressBar::new(todo.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let records: Vec<FeatureRecord> = todo
        .par_iter()
        .filter_map(|artwork| {
            let record = compute_one(artwork, &images_dir, &overlays_dir);
            pb.inc(1);
            record
        })
        .collect();
    pb.finish_and_clear();

    let computed = records.len();
    for record in records {
        feature_mgr.insert(record);
    }

    match feature_mgr.persist().await {
        Ok(_) => success!(
            "Wrote features for {} artworks ({} new) -> {}",
            feature_mgr.count(),
            computed,
            feature_mgr.path().display()
        ),
        Err(e) => error!("Cannot persist features: {}", e),
    }
}
