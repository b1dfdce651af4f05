//! Bitmap Platformer - levels painted as flat-color bitmaps
//!
//! Core modules:
//! - `level`: Bitmap decoding, rectangle segmentation, entity classification, level config
//! - `sim`: Deterministic simulation (AABB collisions, actors, frame tick)
//! - `renderer`: Colored quad generation for the graphics collaborator
//! - `settings`: Physics/window tuning loaded from JSON
//! - `app`: Frame loop driving a frontend

pub mod app;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;

#[cfg(test)]
mod testutils;

pub use settings::{Settings, TriggerMode};

/// Game configuration constants
pub mod consts {
    /// World (window) dimensions in pixels
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Horizontal player speed while a direction key is held (pixels/frame)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Downward acceleration (pixels/frame²)
    pub const GRAVITY: f32 = 0.2;
    /// Upward impulse applied on jump (pixels/frame)
    pub const JUMP_FORCE: f32 = 10.0;
}
