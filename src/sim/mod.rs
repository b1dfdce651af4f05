//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-frame step, no wall-clock time
//! - Stable iteration order (segmentation emission order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{
    Axis, Contact, TIE_BREAK_AXIS, collision_direction, resolution_axis, resolve_enemy_platform,
    resolve_player_platform, touches,
};
pub use rect::Rect;
pub use state::{DeathCause, Enemy, GameError, GameEvent, GameState, Player};
pub use tick::{InputEvent, Key, TickInput, apply_input, checkpoint_advances, tick};
