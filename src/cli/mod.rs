//! # Pipeline Command Module
//!
//! Implements the three pipeline stages invoked from the binary:
//!
//! - [`collect`] — scans the collection API per target artist and persists
//!   the qualifying artworks with a crash-safe resume checkpoint
//! - [`download`] — caches each retained artwork's primary image locally,
//!   skipping images that are already present
//! - [`features`] — derives palette/texture/stroke metrics from the cached
//!   images and writes the displacement maps
//!
//! The stages share no process state; they communicate exclusively through
//! the JSON/PNG artifacts under the data directory, so each can be rerun
//! independently and is idempotent over its existing outputs.

pub mod collect;
pub mod download;
pub mod features;
