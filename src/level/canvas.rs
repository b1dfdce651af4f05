//! Level authoring canvas
//!
//! A small grid of colored cells that saves straight to a level bitmap.
//! Clicking a cell paints it with the current color. Clicking a cell that
//! already has the current color fills the rectangle between it and the last
//! painted cell.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{ImageFormat, Rgb, RgbImage};
use thiserror::Error;

/// Largest width or height a canvas may have
pub const MAX_SIDE: u32 = 30;

/// Color of a fresh cell
pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("canvas size {width}x{height} is outside 1..=30 per side")]
    InvalidSize { width: u32, height: u32 },
    #[error("cell ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },
    #[error("unknown color `{0}` (use a palette name or #rrggbb)")]
    UnknownColor(String),
    #[error("malformed stroke `{0}` (expected x,y,color)")]
    BadStroke(String),
    #[error("could not read or write bitmap {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Named colors offered by the editor palette
pub const PALETTE: [(&str, Rgb<u8>); 9] = [
    ("black", Rgb([0, 0, 0])),
    ("white", Rgb([255, 255, 255])),
    ("red", Rgb([255, 0, 0])),
    ("orange", Rgb([255, 165, 0])),
    ("yellow", Rgb([255, 255, 0])),
    ("green", Rgb([0, 255, 0])),
    ("blue", Rgb([0, 0, 255])),
    ("indigo", Rgb([75, 0, 130])),
    ("violet", Rgb([238, 130, 238])),
];

/// Resolve a palette name or a `#rrggbb` hex code
pub fn parse_color(text: &str) -> Result<Rgb<u8>, CanvasError> {
    let text = text.trim();
    if let Some(&(_, color)) = PALETTE
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(text))
    {
        return Ok(color);
    }

    let unknown = || CanvasError::UnknownColor(text.to_string());
    let hex = text.strip_prefix('#').ok_or_else(unknown)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(unknown());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| unknown());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// One click on the canvas: `x,y,color`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub x: u32,
    pub y: u32,
    pub color: Rgb<u8>,
}

impl FromStr for Stroke {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CanvasError::BadStroke(s.to_string());
        let mut parts = s.splitn(3, ',');
        let (Some(x), Some(y), Some(color)) = (parts.next(), parts.next(), parts.next()) else {
            return Err(bad());
        };
        Ok(Self {
            x: x.trim().parse().map_err(|_| bad())?,
            y: y.trim().parse().map_err(|_| bad())?,
            color: parse_color(color)?,
        })
    }
}

/// Editable level grid, one cell per bitmap pixel
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbImage,
    last_painted: Option<(u32, u32)>,
}

impl Canvas {
    /// A black `width` x `height` grid
    pub fn new(width: u32, height: u32) -> Result<Self, CanvasError> {
        Self::check_size(width, height)?;
        Ok(Self {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
            last_painted: None,
        })
    }

    /// Open an existing level bitmap for editing
    pub fn load(path: &Path) -> Result<Self, CanvasError> {
        let image = image::open(path)
            .map_err(|source| CanvasError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgb8();
        Self::check_size(image.width(), image.height())?;
        log::info!(
            "Opened {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self {
            image,
            last_painted: None,
        })
    }

    fn check_size(width: u32, height: u32) -> Result<(), CanvasError> {
        let valid = 1..=MAX_SIDE;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(CanvasError::InvalidSize { width, height });
        }
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.image.get_pixel_checked(x, y).copied()
    }

    fn check_cell(&self, x: u32, y: u32) -> Result<(), CanvasError> {
        if x >= self.width() || y >= self.height() {
            return Err(CanvasError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Click a cell with `color`.
    ///
    /// A cell of another color is painted and becomes the fill anchor. A cell
    /// that already has `color` fills the rectangle spanning it and the
    /// anchor instead; the anchor does not move.
    pub fn paint(&mut self, x: u32, y: u32, color: Rgb<u8>) -> Result<(), CanvasError> {
        self.check_cell(x, y)?;
        if *self.image.get_pixel(x, y) == color {
            if let Some(anchor) = self.last_painted {
                self.fill_rect(anchor, (x, y), color)?;
            }
            return Ok(());
        }
        self.image.put_pixel(x, y, color);
        self.last_painted = Some((x, y));
        Ok(())
    }

    /// Fill the rectangle spanned by two corner cells (inclusive)
    pub fn fill_rect(
        &mut self,
        from: (u32, u32),
        to: (u32, u32),
        color: Rgb<u8>,
    ) -> Result<(), CanvasError> {
        self.check_cell(from.0, from.1)?;
        self.check_cell(to.0, to.1)?;
        for y in from.1.min(to.1)..=from.1.max(to.1) {
            for x in from.0.min(to.0)..=from.0.max(to.0) {
                self.image.put_pixel(x, y, color);
            }
        }
        Ok(())
    }

    pub fn apply(&mut self, stroke: &Stroke) -> Result<(), CanvasError> {
        self.paint(stroke.x, stroke.y, stroke.color)
    }

    /// Write the grid as a BMP
    pub fn save(&self, path: &Path) -> Result<(), CanvasError> {
        self.image
            .save_with_format(path, ImageFormat::Bmp)
            .map_err(|source| CanvasError::Image {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "Saved {}x{} level to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{FileSource, LevelSource, classify, marker};
    use crate::sim::Rect;
    use crate::testutils::entry;
    use glam::Vec2;

    #[test]
    fn test_size_limits() {
        assert!(Canvas::new(1, 1).is_ok());
        assert!(Canvas::new(30, 30).is_ok());
        for (w, h) in [(0, 5), (5, 0), (31, 10), (10, 31)] {
            assert!(matches!(
                Canvas::new(w, h),
                Err(CanvasError::InvalidSize { .. })
            ));
        }
    }

    #[test]
    fn test_paint_and_bounds() {
        let mut canvas = Canvas::new(4, 3).unwrap();
        assert_eq!(canvas.get(1, 1), Some(BACKGROUND));

        canvas.paint(1, 1, marker::PLATFORM).unwrap();
        assert_eq!(canvas.get(1, 1), Some(marker::PLATFORM));
        assert!(matches!(
            canvas.paint(4, 0, marker::PLATFORM),
            Err(CanvasError::OutOfBounds { x: 4, .. })
        ));
    }

    #[test]
    fn test_same_color_click_fills_from_anchor() {
        let mut canvas = Canvas::new(6, 6).unwrap();
        canvas.paint(4, 1, marker::PLATFORM).unwrap();
        canvas.paint(1, 3, marker::PLATFORM).unwrap();
        // (1, 3) is the anchor now; clicking it again fills nothing new
        canvas.paint(1, 3, marker::PLATFORM).unwrap();
        assert_eq!(canvas.get(2, 2), Some(BACKGROUND));

        // Clicking the earlier white cell spans it and the anchor
        canvas.paint(4, 1, marker::PLATFORM).unwrap();
        for y in 1..=3 {
            for x in 1..=4 {
                assert_eq!(canvas.get(x, y), Some(marker::PLATFORM), "({x}, {y})");
            }
        }
        assert_eq!(canvas.get(0, 0), Some(BACKGROUND));
        assert_eq!(canvas.get(5, 4), Some(BACKGROUND));
    }

    #[test]
    fn test_same_color_click_without_anchor_is_a_no_op() {
        let mut canvas = Canvas::new(3, 3).unwrap();
        canvas.paint(1, 1, BACKGROUND).unwrap();
        assert!(canvas.as_image().pixels().all(|p| *p == BACKGROUND));
    }

    #[test]
    fn test_fill_rect_corners_in_any_order() {
        let mut canvas = Canvas::new(5, 5).unwrap();
        canvas.fill_rect((3, 4), (1, 2), marker::CHECKPOINT).unwrap();
        let filled = canvas
            .as_image()
            .pixels()
            .filter(|p| **p == marker::CHECKPOINT)
            .count();
        assert_eq!(filled, 3 * 3);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("blue").unwrap(), marker::PLAYER);
        assert_eq!(parse_color("White").unwrap(), marker::PLATFORM);
        assert_eq!(parse_color("#00ff00").unwrap(), marker::CHECKPOINT);
        assert_eq!(parse_color("#4B0082").unwrap(), Rgb([75, 0, 130]));
        for bad in ["teal", "#12345", "#gg0000", "ff0000"] {
            assert!(
                matches!(parse_color(bad), Err(CanvasError::UnknownColor(_))),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_parse_stroke() {
        let stroke: Stroke = "3, 4, red".parse().unwrap();
        assert_eq!(
            stroke,
            Stroke {
                x: 3,
                y: 4,
                color: marker::ENEMY
            }
        );
        assert!(matches!(
            "3,red".parse::<Stroke>(),
            Err(CanvasError::BadStroke(_))
        ));
        assert!(matches!(
            "a,1,red".parse::<Stroke>(),
            Err(CanvasError::BadStroke(_))
        ));
    }

    #[test]
    fn test_saved_canvas_plays_as_a_level() {
        let mut canvas = Canvas::new(8, 6).unwrap();
        let strokes = [
            "0,5,white",
            "7,5,white",
            "0,5,white",
            "1,4,blue",
            "6,4,green",
            "3,4,red",
        ];
        for stroke in strokes {
            canvas.apply(&stroke.parse().unwrap()).unwrap();
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawn.bmp");
        canvas.save(&path).unwrap();

        let level = entry(path.to_str().unwrap(), &[2.0]);
        let image = FileSource.load(&level).unwrap();
        assert_eq!(&image, canvas.as_image());

        let layout = classify(&image, &level, Vec2::new(800.0, 600.0)).unwrap();
        assert_eq!(layout.player, Rect::new(100.0, 400.0, 100.0, 100.0).unwrap());
        assert_eq!(layout.platforms, vec![Rect::new(0.0, 500.0, 800.0, 100.0).unwrap()]);
        assert_eq!(layout.checkpoints.len(), 1);
        assert_eq!(layout.enemies[0].vel, Vec2::new(2.0, 2.0));

        let reopened = Canvas::load(&path).unwrap();
        assert_eq!(reopened.as_image(), canvas.as_image());
    }

    #[test]
    fn test_load_rejects_oversized_bitmap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bmp");
        RgbImage::from_pixel(31, 2, BACKGROUND)
            .save_with_format(&path, ImageFormat::Bmp)
            .unwrap();
        assert!(matches!(
            Canvas::load(&path),
            Err(CanvasError::InvalidSize { width: 31, .. })
        ));
    }
}
