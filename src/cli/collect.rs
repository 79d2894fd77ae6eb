use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::time::sleep;

use crate::{
    config, info,
    management::{ArtworkManager, CollectionStateStore},
    met::{self, client::MetClient},
    success,
    types::{ArtistProgress, ArtworkRecord, MetObject, TargetArtist},
    utils, warning,
};

/// Decides whether a fetched object qualifies for the target artist: public
/// domain, at least one usable image URL, a stable positive id, and a
/// matching artist display name. A failed fetch (`None`) never qualifies.
pub fn is_good(obj: Option<&MetObject>, target: &TargetArtist) -> bool {
    let Some(obj) = obj else {
        return false;
    };
    obj.is_public_domain
        && (obj.primary_image_small.as_deref().is_some_and(|u| !u.is_empty())
            || obj.primary_image.as_deref().is_some_and(|u| !u.is_empty()))
        && obj.object_id > 0
        && utils::artist_matches(obj.artist_display_name.as_deref().unwrap_or(""), &target.name)
}

/// One transition of the scan state machine: consumes the object fetched for
/// the id at `progress.cursor` and yields the advanced progress plus the
/// record to append, if any. The caller persists the new progress before
/// fetching the next id, which is what makes an interrupted scan resumable
/// at the first unprocessed id.
pub fn scan_step(
    progress: ArtistProgress,
    obj: Option<MetObject>,
    target: &TargetArtist,
) -> (ArtistProgress, Option<ArtworkRecord>) {
    let record = if is_good(obj.as_ref(), target) {
        obj.as_ref().map(ArtworkRecord::from)
    } else {
        None
    };

    let next = ArtistProgress {
        cursor: progress.cursor + 1,
        kept: progress.kept + record.is_some() as u32,
    };
    (next, record)
}

/// Reconciles a persisted checkpoint with the current search result. A rerun
/// can see a shorter id list than the one the cursor was persisted against;
/// clamping keeps the cursor within the list so the monotonic bound holds.
pub fn resume_progress(progress: ArtistProgress, ids_len: usize) -> ArtistProgress {
    ArtistProgress {
        cursor: progress.cursor.min(ids_len),
        kept: progress.kept,
    }
}

/// Whether the scan loop has work left: ids remaining and cap not reached.
pub fn scan_pending(progress: ArtistProgress, ids_len: usize, cap: u32) -> bool {
    progress.cursor < ids_len && progress.kept < cap
}

async fn load_targets() -> Vec<TargetArtist> {
    let Some(path) = config::artists_file() else {
        return config::target_artists();
    };
    match async_fs::read_to_string(&path).await {
        Ok(json) => match serde_json::from_str::<Vec<TargetArtist>>(&json) {
            Ok(list) if !list.is_empty() => list,
            Ok(_) => {
                warning!("{} is empty, using built-in artist list", path.display());
                config::target_artists()
            }
            Err(e) => {
                warning!("Cannot parse {}: {}. Using built-in artist list", path.display(), e);
                config::target_artists()
            }
        },
        Err(e) => {
            warning!("Cannot read {}: {}. Using built-in artist list", path.display(), e);
            config::target_artists()
        }
    }
}

/// Runs the collection stage over every target artist.
///
/// Per artist: one search query (capped at the max-ids budget), then a
/// sequential scan over the returned ids starting at the persisted cursor.
/// State is checkpointed after every id and the artwork list after every
/// retained record, so a restart resumes at the first unprocessed id with no
/// duplicate work. An unrecoverable search failure skips that artist and
/// continues with the next one; losing one artist's batch is preferable to
/// discarding a half-finished run.
pub async fn collect(limit_artists: Option<usize>) {
    let artists = {
        let mut a = load_targets().await;
        if let Some(limit) = limit_artists {
            a.truncate(limit);
        }
        a
    };

    let data_dir = config::data_dir();
    let store = CollectionStateStore::new(data_dir.clone());
    let mut state = store.load().await;
    let mut artwork_mgr = ArtworkManager::load(data_dir.clone())
        .await
        .unwrap_or_else(|_| ArtworkManager::new(data_dir.clone()));

    let client = MetClient::from_config();
    let cap = config::per_artist_cap();
    let item_pause = Duration::from_millis(config::item_pause_ms());
    let artist_pause = Duration::from_millis(config::artist_pause_ms());

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    for artist in &artists {
        pb.set_message(format!("Searching objects for {}...", artist.name));

        let ids = match met::search::search_artist(&client, &artist.query).await {
            Ok(ids) => ids,
            Err(e) => {
                warning!("Search failed for {}: {}. Skipping artist.", artist.name, e);
                continue;
            }
        };
        let ids: Vec<i64> = ids.into_iter().take(config::max_ids_per_artist()).collect();

        let mut progress = resume_progress(
            state
                .by_artist
                .get(&artist.name)
                .copied()
                .unwrap_or_default(),
            ids.len(),
        );

        while scan_pending(progress, ids.len(), cap) {
            let id = ids[progress.cursor];
            pb.set_message(format!(
                "{artist} ({cursor}/{total}) kept {kept}/{cap}, object {id}",
                artist = artist.name,
                cursor = progress.cursor,
                total = ids.len(),
                kept = progress.kept,
            ));

            let obj = met::objects::fetch_object(&client, id).await;
            let (next, record) = scan_step(progress, obj, artist);

            if let Some(record) = record {
                artwork_mgr.add(record);
                if let Err(e) = artwork_mgr.persist().await {
                    warning!("Cannot persist artworks: {}", e);
                }
            }

            progress = next;
            state.by_artist.insert(artist.name.clone(), progress);
            if let Err(e) = store.save(&state).await {
                warning!("Cannot persist collect state: {:?}", e);
            }

            sleep(item_pause).await;
        }

        info!("{}: kept {}", artist.name, progress.kept);
        state.by_artist.insert(artist.name.clone(), progress);
        if let Err(e) = store.save(&state).await {
            warning!("Cannot persist collect state: {:?}", e);
        }

        sleep(artist_pause).await;
    }

    pb.finish_and_clear();

    match artwork_mgr.persist().await {
        Ok(_) => success!(
            "Wrote {} artworks -> {}",
            artwork_mgr.count(),
            artwork_mgr.path().display()
        ),
        Err(e) => warning!("Cannot persist artworks: {}", e),
    }
}
