//! Marker colors to typed level entities

use glam::Vec2;
use image::RgbImage;

use super::LevelError;
use super::config::LevelEntry;
use super::segment::segment;
use crate::sim::{Enemy, Rect};

/// Marker colors recognised in level bitmaps; anything else is background
pub mod marker {
    use image::Rgb;

    pub const PLAYER: Rgb<u8> = Rgb([0, 0, 255]);
    pub const PLATFORM: Rgb<u8> = Rgb([255, 255, 255]);
    pub const CHECKPOINT: Rgb<u8> = Rgb([0, 255, 0]);
    pub const ENEMY: Rgb<u8> = Rgb([255, 0, 0]);
}

/// Everything a bitmap describes, in world coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    pub player: Rect,
    pub platforms: Vec<Rect>,
    pub checkpoints: Vec<Rect>,
    pub enemies: Vec<Enemy>,
}

/// Build the layout for `entry` from its decoded bitmap.
///
/// The first player rectangle is the spawn. Enemies take their patrol speed
/// from `entry.enemy_speeds` by emission order.
pub fn classify(
    image: &RgbImage,
    entry: &LevelEntry,
    world: Vec2,
) -> Result<LevelLayout, LevelError> {
    let players = segment(image, marker::PLAYER, world);
    let Some(&player) = players.first() else {
        return Err(LevelError::MissingPlayer {
            path: entry.path.clone(),
        });
    };
    if players.len() > 1 {
        log::warn!(
            "{}: {} player markers found, spawning at the first",
            entry.name,
            players.len()
        );
    }

    let platforms = segment(image, marker::PLATFORM, world);
    let checkpoints = segment(image, marker::CHECKPOINT, world);

    let enemy_rects = segment(image, marker::ENEMY, world);
    let configured = entry.enemy_speeds.len();
    if enemy_rects.len() > configured {
        return Err(LevelError::EnemySpeedMismatch {
            path: entry.path.clone(),
            found: enemy_rects.len(),
            configured,
        });
    }
    if enemy_rects.len() < configured {
        log::warn!(
            "{}: {} enemy speeds configured but only {} enemies painted",
            entry.name,
            configured,
            enemy_rects.len()
        );
    }
    let enemies = enemy_rects
        .into_iter()
        .zip(&entry.enemy_speeds)
        .map(|(rect, &speed)| Enemy::new(rect, speed))
        .collect::<Vec<_>>();

    log::debug!(
        "{}: {} platforms, {} checkpoints, {} enemies",
        entry.name,
        platforms.len(),
        checkpoints.len(),
        enemies.len()
    );

    Ok(LevelLayout {
        player,
        platforms,
        checkpoints,
        enemies,
    })
}
