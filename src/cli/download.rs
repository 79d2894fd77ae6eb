use reqwest::{Client, header::USER_AGENT};

use crate::{config, error, info, management::ArtworkManager, success, warning};

/// Returns true when a previously downloaded image is already usable: the
/// file exists and is non-empty. A zero-byte file is what an interrupted
/// write leaves behind, so plain path existence is not enough.
async fn cached_image_ok(path: &std::path::Path) -> bool {
    match async_fs::metadata(path).await {
        Ok(meta) => meta.len() > 0,
        Err(_) => false,
    }
}

/// Caches every retained artwork's primary image under
/// `{data}/images/{objectID}.jpg` and points `imageLocalSmall` at the local
/// copy so the viewer never fetches from the upstream CDN.
///
/// Idempotent: images already cached are skipped, and `artworks.json` is only
/// rewritten when at least one record actually changed.
pub async fn download() {
    let data_dir = config::data_dir();
    let mut artwork_mgr = match ArtworkManager::load(data_dir.clone()).await {
        Ok(mgr) => mgr,
        Err(e) => {
            error!("Cannot load artworks.json: {}. Run goghflow collect first.", e);
        }
    };

    let images_dir = data_dir.join("images");
    if let Err(e) = async_fs::create_dir_all(&images_dir).await {
        error!("Cannot create {}: {}", images_dir.display(), e);
    }

    let client = Client::new();
    let user_agent = config::user_agent();
    let mut changed = 0usize;
    let mut fetched = 0usize;

    let targets: Vec<(i64, String)> = artwork_mgr
        .all()
        .iter()
        .filter_map(|a| {
            let url = a
                .primary_image_small
                .clone()
                .filter(|u| !u.is_empty())
                .or_else(|| a.primary_image.clone().filter(|u| !u.is_empty()))?;
            Some((a.object_id, url))
        })
        .collect();

    for (object_id, url) in targets {
        let out_path = images_dir.join(format!("{object_id}.jpg"));

        if !cached_image_ok(&out_path).await {
            let bytes = match fetch_image(&client, &user_agent, &url).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warning!("Download failed for {}: {}", object_id, e);
                    continue;
                }
            };
            if let Err(e) = async_fs::write(&out_path, bytes).await {
                warning!("Cannot write {}: {}", out_path.display(), e);
                continue;
            }
            info!("Downloaded {}", object_id);
            fetched += 1;
        }

        let local = format!("./data/images/{object_id}.jpg");
        if artwork_mgr.set_local_image(object_id, local) {
            changed += 1;
        }
    }

    if changed > 0 {
        match artwork_mgr.persist().await {
            Ok(_) => info!("Updated artworks.json with {} local image paths", changed),
            Err(e) => warning!("Cannot persist artworks: {}", e),
        }
    }

    success!("Images cached ({} new) -> {}", fetched, images_dir.display());
}

async fn fetch_image(client: &Client, user_agent: &str, url: &str) -> Result<Vec<u8>, String> {
    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("failed {} {}", response.status(), url));
    }
    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}
