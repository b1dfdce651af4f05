//! Game state and core simulation types
//!
//! `GameState` owns everything for the active level. Loading a level
//! replaces the player, platforms, checkpoints and enemies wholesale.

use glam::Vec2;
use thiserror::Error;

use super::collision::touches;
use super::rect::Rect;
use crate::level::{LevelConfig, LevelError, LevelSource, classify};
use crate::settings::Settings;

/// Fatal simulation errors
#[derive(Debug, Error)]
pub enum GameError {
    #[error("level index {index} is out of range ({count} levels configured)")]
    LevelOutOfRange { index: usize, count: usize },
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Why the player was sent back to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Dropped below the bottom of the world
    FellOut,
    /// Touched an enemy
    Enemy,
}

/// Side effects produced during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Died { cause: DeathCause },
    LevelLoaded { index: usize },
    /// Player came to rest on a platform after being airborne
    Landed,
    Quit,
}

/// The player-controlled actor
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    /// Top-left corner recorded at level load
    pub spawn: Vec2,
}

impl Player {
    /// A player at rest at `rect`, which also becomes the spawn point
    pub fn spawn_at(rect: Rect) -> Self {
        Self {
            rect,
            vel: Vec2::ZERO,
            on_ground: false,
            spawn: Vec2::new(rect.x, rect.y),
        }
    }

    /// Back to spawn, motionless and airborne
    pub fn respawn(&mut self) {
        self.rect.x = self.spawn.x;
        self.rect.y = self.spawn.y;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
    }

    /// Apply a jump impulse if standing on something
    pub fn jump(&mut self, force: f32) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vel.y = -force;
        self.on_ground = false;
        true
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Both components start at the configured speed; only `x` moves it
    pub vel: Vec2,
}

impl Enemy {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            vel: Vec2::splat(speed),
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub levels: LevelConfig,
    /// Index into `levels` of the active level
    pub current_level: usize,
    pub player: Player,
    pub platforms: Vec<Rect>,
    pub checkpoints: Vec<Rect>,
    pub enemies: Vec<Enemy>,
    /// Player overlapped a checkpoint at the end of the last checkpoint pass
    pub touching_checkpoint: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a game positioned at the first configured level
    pub fn new(
        settings: Settings,
        levels: LevelConfig,
        source: &dyn LevelSource,
    ) -> Result<Self, GameError> {
        let entry = levels.get(0).ok_or(GameError::LevelOutOfRange {
            index: 0,
            count: levels.len(),
        })?;
        let image = source.load(entry)?;
        let layout = classify(&image, entry, settings.world_size())?;
        log::info!("Starting at level 0 ({})", entry.name);

        let mut state = Self {
            settings,
            levels,
            current_level: 0,
            player: Player::spawn_at(layout.player),
            platforms: layout.platforms,
            checkpoints: layout.checkpoints,
            enemies: layout.enemies,
            touching_checkpoint: false,
            time_ticks: 0,
        };
        state.touching_checkpoint = state.player_touches_checkpoint();
        Ok(state)
    }

    /// Replace the active level with `index`.
    ///
    /// On failure the current level is left untouched.
    pub fn load_level(&mut self, index: usize, source: &dyn LevelSource) -> Result<(), GameError> {
        let entry = self.levels.get(index).ok_or(GameError::LevelOutOfRange {
            index,
            count: self.levels.len(),
        })?;
        let image = source.load(entry)?;
        let layout = classify(&image, entry, self.settings.world_size())?;
        log::info!("Loaded level {} ({})", index, entry.name);

        self.current_level = index;
        self.player = Player::spawn_at(layout.player);
        self.platforms = layout.platforms;
        self.checkpoints = layout.checkpoints;
        self.enemies = layout.enemies;
        self.touching_checkpoint = self.player_touches_checkpoint();
        Ok(())
    }

    /// Number of checkpoints the player currently overlaps
    pub fn checkpoint_contacts(&self) -> usize {
        self.checkpoints
            .iter()
            .filter(|checkpoint| touches(&self.player.rect, checkpoint))
            .count()
    }

    fn player_touches_checkpoint(&self) -> bool {
        self.checkpoint_contacts() > 0
    }
}
