use std::{collections::HashSet, path::PathBuf};

use chrono::Utc;

use crate::types::{ArtworkRecord, ArtworksFile};

/// Manager for `artworks.json`, the retained-artwork list.
///
/// Records are keyed by `objectID` and appended at most once — resuming a run
/// reloads the existing file, so `add` deduplicates rather than trusting the
/// scan loop alone. Persisted after every retained artwork; a forced
/// termination never loses more than the artwork in flight.
pub struct ArtworkManager {
    dir: PathBuf,
    artworks: Vec<ArtworkRecord>,
    ids: HashSet<i64>,
}

impl ArtworkManager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            artworks: Vec::new(),
            ids: HashSet::new(),
        }
    }

    pub async fn load(dir: PathBuf) -> Result<Self, String> {
        let path = Self::path_in(&dir);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let file: ArtworksFile = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        let ids = file.artworks.iter().map(|a| a.object_id).collect();
        Ok(Self {
            dir,
            artworks: file.artworks,
            ids,
        })
    }

    pub fn has(&self, object_id: i64) -> bool {
        self.ids.contains(&object_id)
    }

    /// Appends a record unless its `objectID` is already present. Returns
    /// whether the record was added.
    pub fn add(&mut self, record: ArtworkRecord) -> bool {
        if !self.ids.insert(record.object_id) {
            return false;
        }
        self.artworks.push(record);
        true
    }

    /// Points a record at its locally cached image. Returns true when the
    /// stored path actually changed.
    pub fn set_local_image(&mut self, object_id: i64, local: String) -> bool {
        if let Some(a) = self.artworks.iter_mut().find(|a| a.object_id == object_id) {
            if a.image_local_small.as_deref() != Some(local.as_str()) {
                a.image_local_small = Some(local);
                return true;
            }
        }
        false
    }

    pub fn all(&self) -> &[ArtworkRecord] {
        &self.artworks
    }

    pub fn count(&self) -> usize {
        self.artworks.len()
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::path_in(&self.dir);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let file = ArtworksFile {
            generated_at: Utc::now().to_rfc3339(),
            artworks: self.artworks.clone(),
        };
        let json = serde_json::to_string_pretty(&file).map_err(|e| e.to_string())?;
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, json).await.map_err(|e| e.to_string())?;
        async_fs::rename(&tmp, &path)
            .await
            .map_err(|e| e.to_string())
    }

    pub fn path(&self) -> PathBuf {
        Self::path_in(&self.dir)
    }

    fn path_in(dir: &PathBuf) -> PathBuf {
        dir.join("artworks.json")
    }
}
