//! Fixtures shared by unit tests

use std::path::PathBuf;

use image::{Rgb, RgbImage};

use crate::level::{LevelConfig, LevelEntry, PixelRect};

pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// A black bitmap with each rectangle filled in order (later ones paint over)
pub fn paint(width: u32, height: u32, fills: &[(Rgb<u8>, PixelRect)]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, BLACK);
    for (color, rect) in fills {
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                img.put_pixel(x, y, *color);
            }
        }
    }
    img
}

pub fn entry(path: &str, speeds: &[f32]) -> LevelEntry {
    LevelEntry {
        name: path.to_string(),
        path: PathBuf::from(path),
        enemy_speeds: speeds.to_vec(),
    }
}

pub fn config(levels: &[(&str, &[f32])]) -> LevelConfig {
    LevelConfig {
        levels: levels
            .iter()
            .map(|(path, speeds)| entry(path, speeds))
            .collect(),
    }
}

pub fn px(x: u32, y: u32, width: u32, height: u32) -> PixelRect {
    PixelRect {
        x,
        y,
        width,
        height,
    }
}
