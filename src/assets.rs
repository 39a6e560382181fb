use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{EXPLOSION_FRAMES, PLACEHOLDER_SIZE};
use crate::entities::PowerupKind;
use crate::renderer::Rgb;

/// A decoded image, reduced to what the game needs: its pixel size for collision
/// boxes and a representative colour for drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub tint: Rgb,
    /// True when the file could not be loaded and this is the stand-in
    pub placeholder: bool,
}

impl Drawable {
    pub fn new(name: impl Into<String>, width: u32, height: u32, tint: Rgb) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            tint,
            placeholder: false,
        }
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width: PLACEHOLDER_SIZE,
            height: PLACEHOLDER_SIZE,
            tint: Rgb::GRAY,
            placeholder: true,
        }
    }

    pub fn size(&self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }

    /// Gives a placeholder a recognisable colour; real images keep their own
    fn or_tint(mut self, tint: Rgb) -> Self {
        if self.placeholder {
            self.tint = tint;
        }
        self
    }
}

/// Supplies drawables by file name. Never fails: a missing or broken file yields a
/// placeholder and a logged diagnostic.
pub trait AssetProvider {
    fn load_image(&self, name: &str) -> Drawable;
}

/// Loads images from `<root>/images/`
pub struct ImageAssets {
    images_dir: PathBuf,
}

impl ImageAssets {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            images_dir: root.as_ref().join("images"),
        }
    }
}

impl AssetProvider for ImageAssets {
    fn load_image(&self, name: &str) -> Drawable {
        let path = self.images_dir.join(name);
        match image::open(&path) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let tint = average_opaque_colour(&rgba).unwrap_or(Rgb::WHITE);
                debug!(image = name, width = rgba.width(), height = rgba.height(), "loaded image");
                Drawable::new(name, rgba.width(), rgba.height(), tint)
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "cannot load image, using placeholder");
                Drawable::placeholder(name)
            }
        }
    }
}

fn average_opaque_colour(img: &image::RgbaImage) -> Option<Rgb> {
    let (mut r, mut g, mut b, mut n) = (0u64, 0u64, 0u64, 0u64);
    for pixel in img.pixels() {
        let [pr, pg, pb, pa] = pixel.0;
        if pa > 0 {
            r += pr as u64;
            g += pg as u64;
            b += pb as u64;
            n += 1;
        }
    }
    (n > 0).then(|| Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8))
}

/// Every image the game draws, loaded once at startup
#[derive(Debug, Clone)]
pub struct Sprites {
    pub player: Drawable,
    pub player_mini: Drawable,
    pub player_power: Drawable,
    pub bullet: Drawable,
    pub enemies: Vec<Drawable>,
    pub powerup_shield: Drawable,
    pub powerup_power: Drawable,
    pub explosion: Vec<Drawable>,
}

impl Sprites {
    pub fn load(assets: &dyn AssetProvider) -> Self {
        let enemy_tints = [Rgb::RED, Rgb::MAGENTA, Rgb::YELLOW];
        Self {
            player: assets.load_image("player.png").or_tint(Rgb::GREEN),
            player_mini: assets.load_image("player_mini.png").or_tint(Rgb::GREEN),
            player_power: assets.load_image("player_power.png").or_tint(Rgb::CYAN),
            bullet: assets.load_image("bullet.png").or_tint(Rgb::YELLOW),
            enemies: (1..=3)
                .zip(enemy_tints)
                .map(|(i, tint)| assets.load_image(&format!("enemy{i}.png")).or_tint(tint))
                .collect(),
            powerup_shield: assets.load_image("powerup_shield.png").or_tint(Rgb::BLUE),
            powerup_power: assets.load_image("powerup_power.png").or_tint(Rgb::MAGENTA),
            explosion: (1..=EXPLOSION_FRAMES)
                .map(|i| assets.load_image(&format!("explosion{i}.png")).or_tint(Rgb::ORANGE))
                .collect(),
        }
    }

    pub fn powerup(&self, kind: PowerupKind) -> &Drawable {
        match kind {
            PowerupKind::Shield => &self.powerup_shield,
            PowerupKind::Power => &self.powerup_power,
        }
    }

    pub fn enemy(&self, variant: usize) -> &Drawable {
        &self.enemies[variant % self.enemies.len()]
    }

    pub fn explosion_frame(&self, frame: usize) -> &Drawable {
        &self.explosion[frame.min(self.explosion.len() - 1)]
    }
}
