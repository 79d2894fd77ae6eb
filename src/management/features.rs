use std::{collections::BTreeMap, path::PathBuf};

use chrono::Utc;

use crate::types::{FeatureRecord, FeaturesFile};

/// Manager for `features.json`, the derived-feature map keyed by stringified
/// `objectID`. Loaded at the start of an extraction run so unchanged records
/// survive incremental reruns.
pub struct FeatureManager {
    dir: PathBuf,
    features: BTreeMap<String, FeatureRecord>,
}

impl FeatureManager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            features: BTreeMap::new(),
        }
    }

    pub async fn load(dir: PathBuf) -> Result<Self, String> {
        let path = Self::path_in(&dir);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let file: FeaturesFile = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self {
            dir,
            features: file.features_by_id,
        })
    }

    pub fn has(&self, object_id: i64) -> bool {
        self.features.contains_key(&object_id.to_string())
    }

    pub fn insert(&mut self, record: FeatureRecord) {
        self.features.insert(record.object_id.to_string(), record);
    }

    pub fn count(&self) -> usize {
        self.features.len()
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::path_in(&self.dir);
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let file = FeaturesFile {
            generated_at: Utc::now().to_rfc3339(),
            features_by_id: self.features.clone(),
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
        dir.join("features.json")
    }
}
