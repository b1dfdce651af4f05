//! Level loading pipeline
//!
//! A level is a flat-color bitmap. Loading goes:
//! - `source`: decode the bitmap into an RGB buffer
//! - `segment`: turn each marker color into a set of rectangles
//! - `classify`: assign the rectangles to typed collections
//!
//! `config` holds the ordered level list and per-level enemy speeds.
//! `canvas` is the authoring side: paint a grid and save it as a bitmap.

use std::path::PathBuf;

use thiserror::Error;

pub mod canvas;
pub mod classify;
pub mod config;
pub mod segment;
pub mod source;

pub use canvas::{Canvas, CanvasError, Stroke};
pub use classify::{LevelLayout, classify, marker};
pub use config::{ConfigError, LevelConfig, LevelEntry};
pub use segment::{PixelRect, WorldScale, segment, segment_pixels};
pub use source::{FileSource, LevelSource, MemorySource};

/// Failure to turn a configured level into playable geometry
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to decode level bitmap {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("level bitmap {} is not available", .path.display())]
    NotFound { path: PathBuf },
    #[error("level {} has no player marker (pure blue pixel)", .path.display())]
    MissingPlayer { path: PathBuf },
    #[error(
        "level {} contains {found} enemies but only {configured} speeds are configured",
        .path.display()
    )]
    EnemySpeedMismatch {
        path: PathBuf,
        found: usize,
        configured: usize,
    },
}
