//! Sprite sheets, loaded once at startup. Any failure here is fatal.

use color_eyre::{
    Result,
    eyre::{WrapErr, ensure},
};
use image::DynamicImage;
use std::path::Path;

use crate::config::GameConfig;

/// Frames cut from one horizontal strip, left to right
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    frames: Vec<DynamicImage>,
}

impl SpriteSheet {
    pub fn from_image(
        sheet: &DynamicImage,
        frame_width: u32,
        frame_height: u32,
        count: u32,
    ) -> Result<Self> {
        ensure!(count > 0, "sprite sheet needs at least one frame");
        ensure!(
            sheet.width() >= frame_width * count && sheet.height() >= frame_height,
            "sprite sheet is {}x{}, need {} frame(s) of {}x{}",
            sheet.width(),
            sheet.height(),
            count,
            frame_width,
            frame_height
        );

        let frames = (0..count)
            .map(|i| sheet.crop_imm(i * frame_width, 0, frame_width, frame_height))
            .collect();
        Ok(Self { frames })
    }

    pub fn load(path: &Path, frame_width: u32, frame_height: u32, count: u32) -> Result<Self> {
        let sheet = image::open(path)
            .wrap_err_with(|| format!("could not load picture {}", path.display()))?;
        Self::from_image(&sheet, frame_width, frame_height, count)
            .wrap_err_with(|| format!("bad sprite sheet {}", path.display()))
    }

    /// Frame `index`, wrapping around the strip
    pub fn frame(&self, index: usize) -> &DynamicImage {
        &self.frames[index % self.frames.len()]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

pub struct Sprites {
    pub player: SpriteSheet,
    pub enemy: SpriteSheet,
    pub heart: SpriteSheet,
}

impl Sprites {
    /// Loads `player.png`, `enemy.png` and `heart.png` from the asset dir
    pub fn load(cfg: &GameConfig) -> Result<Self> {
        let (w, h) = (cfg.sprite_width as u32, cfg.sprite_height as u32);
        let heart = cfg.heart_size as u32;
        let dir = &cfg.asset_dir;

        let sprites = Self {
            player: SpriteSheet::load(&dir.join("player.png"), w, h, 2)?,
            enemy: SpriteSheet::load(&dir.join("enemy.png"), w, h, 2)?,
            heart: SpriteSheet::load(&dir.join("heart.png"), heart, heart, 1)?,
        };
        log::info!("loaded sprite sheets from {}", dir.display());
        Ok(sprites)
    }

    /// Transparent placeholders for code that needs sprites but no files
    pub fn blank(cfg: &GameConfig) -> Self {
        let (w, h) = (cfg.sprite_width as u32, cfg.sprite_height as u32);
        let heart = cfg.heart_size as u32;
        let sheet = |fw: u32, fh: u32, n: u32| SpriteSheet {
            frames: (0..n)
                .map(|_| DynamicImage::new_rgba8(fw, fh))
                .collect(),
        };
        Self {
            player: sheet(w, h, 2),
            enemy: sheet(w, h, 2),
            heart: sheet(heart, heart, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_cut_into_frames() {
        let sheet = DynamicImage::new_rgba8(64, 64);
        let sprites = SpriteSheet::from_image(&sheet, 32, 64, 2).unwrap();
        assert_eq!(sprites.len(), 2);
        assert_eq!(sprites.frame(1).width(), 32);
        assert_eq!(sprites.frame(1).height(), 64);
    }

    #[test]
    fn test_frame_index_wraps() {
        let sheet = DynamicImage::new_rgba8(32, 32);
        let sprites = SpriteSheet::from_image(&sheet, 32, 32, 1).unwrap();
        assert_eq!(sprites.frame(5).width(), 32);
    }

    #[test]
    fn test_undersized_sheet_is_rejected() {
        let sheet = DynamicImage::new_rgba8(40, 64);
        assert!(SpriteSheet::from_image(&sheet, 32, 64, 2).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = SpriteSheet::load(Path::new("no/such/sprite.png"), 32, 32, 1);
        let message = format!("{:?}", result.unwrap_err());
        assert!(message.contains("no/such/sprite.png"));
    }
}
