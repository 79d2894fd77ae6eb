use std::{io::Error, path::PathBuf};

use crate::types::CollectionState;

#[derive(Debug)]
pub enum StateError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for StateError {
    fn from(err: Error) -> Self {
        StateError::IoError(err)
    }
}

/// Store for `collect-state.json`, the per-artist resume checkpoint.
///
/// `load` never fails: an absent or unparsable file yields the empty state,
/// so a corrupted checkpoint costs a rescan, never a crash. `save` goes
/// through a temp file plus rename so a reader can never observe a partially
/// written checkpoint. It is called after every processed id; against a
/// pipeline dominated by 900ms network pauses the extra write is noise.
pub struct CollectionStateStore {
    dir: PathBuf,
}

impl CollectionStateStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub async fn load(&self) -> CollectionState {
        let json = match async_fs::read_to_string(self.path()).await {
            Ok(json) => json,
            Err(_) => return CollectionState::default(),
        };
        serde_json::from_str(&json).unwrap_or_default()
    }

    pub async fn save(&self, state: &CollectionState) -> Result<(), StateError> {
        let path = self.path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(StateError::IoError)?;
        }

        let json = serde_json::to_string_pretty(state).map_err(StateError::SerdeError)?;
        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, json)
            .await
            .map_err(StateError::IoError)?;
        async_fs::rename(&tmp, &path)
            .await
            .map_err(StateError::IoError)
    }

    fn path(&self) -> PathBuf {
        self.dir.join("collect-state.json")
    }
}
