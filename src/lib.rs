//! GoghWithTheFlow Collection Pipeline Library
//!
//! This library implements the offline data pipeline behind the GoghWithTheFlow
//! viewer: it collects artwork metadata for a fixed set of painters from the
//! Met Museum collection API, caches the primary images locally, and derives
//! quantitative visual-style features (color palette, texture energy, stroke
//! direction) from the cached rasters. The viewer itself consumes only the
//! JSON/PNG artifacts produced here.
//!
//! # Modules
//!
//! - `cli` - Pipeline command implementations (collect, download, features)
//! - `config` - Configuration via environment variables with documented defaults
//! - `features` - Visual-metric analyzers (palette, texture, stroke direction)
//! - `management` - Persisted artifact managers (state, artworks, features)
//! - `met` - Met Museum collection API client with throttle-aware retries
//! - `types` - Data structures and artifact file formats
//! - `utils` - Pure helpers (name matching, backoff math)
//!
//! # Example
//!
//! ```
//! use goghflow::{cli, config};
//!
//! #[tokio::main]
//! async fn main() -> goghflow::Res<()> {
//!     config::load_env().await?;
//!     cli::collect::collect(None).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod features;
pub mod management;
pub mod met;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Uses a boxed dynamic error trait object with Send + Sync bounds so it
/// composes across async boundaries without committing callers to one
/// concrete error type.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Scanning artist {}", name);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Wrote {} artworks", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for unrecoverable, run-aborting conditions; anything an artist-level
/// loop can survive should go through `warning!` instead so that already
/// checkpointed progress is preserved.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// # Example
///
/// ```
/// warning!("Search failed for {}, skipping artist", name);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
