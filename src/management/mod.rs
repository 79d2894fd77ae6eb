//! Persisted-artifact managers: the resume checkpoint, the retained artwork
//! list, and the derived feature map. Each manager owns exactly one JSON file
//! under the data directory and is the single writer for it — running two
//! pipeline instances against the same directory is a precondition violation,
//! not a supported mode.

pub mod artworks;
pub mod features;
pub mod state;

pub use artworks::ArtworkManager;
pub use features::FeatureManager;
pub use state::CollectionStateStore;
