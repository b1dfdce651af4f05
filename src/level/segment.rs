//! Bitmap to rectangle segmentation
//!
//! Two passes over a single marker color:
//! 1. Each maximal horizontal run of the color in a row becomes a strip.
//! 2. Strips are fused with an accepted rectangle when they share a full
//!    edge (same column span stacked vertically, or same row span side by
//!    side). The first match wins; a fused rectangle keeps trying until it
//!    has no such neighbour left.
//!
//! Flood fill is not used: touching regions of the same color must stay
//! separate rectangles rather than collapse into one irregular blob.
//!
//! Work happens in pixel space with exact integer edges; rectangles are
//! scaled to world space only when emitted.

use glam::Vec2;
use image::{Rgb, RgbImage};

use crate::sim::Rect;

/// A rectangle in bitmap pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.x..self.right()).contains(&x) && (self.y..self.bottom()).contains(&y)
    }

    /// The rectangle covering `self` and `other`, if they share a full edge
    pub fn fuse(&self, other: &PixelRect) -> Option<PixelRect> {
        let same_columns = self.x == other.x && self.width == other.width;
        if same_columns && (self.bottom() == other.y || other.bottom() == self.y) {
            return Some(PixelRect {
                x: self.x,
                y: self.y.min(other.y),
                width: self.width,
                height: self.height + other.height,
            });
        }

        let same_rows = self.y == other.y && self.height == other.height;
        if same_rows && (self.right() == other.x || other.right() == self.x) {
            return Some(PixelRect {
                x: self.x.min(other.x),
                y: self.y,
                width: self.width + other.width,
                height: self.height,
            });
        }

        None
    }
}

/// Pixel to world conversion factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldScale {
    pub x: f32,
    pub y: f32,
}

impl WorldScale {
    /// Stretch a `width` x `height` bitmap over the whole world
    pub fn fit(width: u32, height: u32, world: Vec2) -> Self {
        Self {
            x: world.x / width.max(1) as f32,
            y: world.y / height.max(1) as f32,
        }
    }

    pub fn apply(&self, rect: &PixelRect) -> Rect {
        Rect {
            x: rect.x as f32 * self.x,
            y: rect.y as f32 * self.y,
            width: rect.width as f32 * self.x,
            height: rect.height as f32 * self.y,
        }
    }
}

/// Maximal horizontal runs of `color`, top row first, left to right
pub fn extract_runs(image: &RgbImage, color: Rgb<u8>) -> Vec<PixelRect> {
    let (width, height) = image.dimensions();
    let mut runs = Vec::new();

    for y in 0..height {
        let mut x = 0;
        while x < width {
            if *image.get_pixel(x, y) != color {
                x += 1;
                continue;
            }
            let start = x;
            while x < width && *image.get_pixel(x, y) == color {
                x += 1;
            }
            runs.push(PixelRect {
                x: start,
                y,
                width: x - start,
                height: 1,
            });
        }
    }

    runs
}

/// Greedily fuse strips that share a full edge.
///
/// Accepted rectangles keep the position of the first strip they absorbed,
/// so output order follows the scan order of each rectangle's first row.
pub fn merge_strips(strips: impl IntoIterator<Item = PixelRect>) -> Vec<PixelRect> {
    let mut merged: Vec<PixelRect> = Vec::new();

    for strip in strips {
        let Some((mut idx, fused)) = first_fusion(&merged, &strip, None) else {
            merged.push(strip);
            continue;
        };
        merged[idx] = fused;

        // The grown rectangle may now line up with another accepted one
        while let Some((other, fused)) = first_fusion(&merged, &merged[idx], Some(idx)) {
            let keep = idx.min(other);
            merged[keep] = fused;
            merged.remove(idx.max(other));
            idx = keep;
        }
    }

    merged
}

fn first_fusion(
    accepted: &[PixelRect],
    rect: &PixelRect,
    skip: Option<usize>,
) -> Option<(usize, PixelRect)> {
    accepted
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != skip)
        .find_map(|(i, candidate)| candidate.fuse(rect).map(|fused| (i, fused)))
}

/// Segment one color into pixel-space rectangles
pub fn segment_pixels(image: &RgbImage, color: Rgb<u8>) -> Vec<PixelRect> {
    merge_strips(extract_runs(image, color))
}

/// Segment one color into world-space rectangles covering a `world`-sized area
pub fn segment(image: &RgbImage, color: Rgb<u8>, world: Vec2) -> Vec<Rect> {
    let scale = WorldScale::fit(image.width(), image.height(), world);
    segment_pixels(image, color)
        .iter()
        .map(|rect| scale.apply(rect))
        .collect()
}
