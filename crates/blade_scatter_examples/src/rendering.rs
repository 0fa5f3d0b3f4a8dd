//! Shared helpers for the example binaries: tracing setup, request loading and a
//! top-down PNG preview of where blades were attached.
use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use blade_scatter::prelude::{GenerationRequest, GenerationResult, StyleName};
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Read a [`GenerationRequest`] from a RON file.
pub fn load_request(path: impl AsRef<Path>) -> anyhow::Result<GenerationRequest> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading request {}", path.display()))?;
    let request: GenerationRequest =
        ron::from_str(&text).with_context(|| format!("parsing request {}", path.display()))?;
    request.validate()?;
    Ok(request)
}

/// Image settings for the top-down preview.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub dot_radius: i32,
    styles: HashMap<StyleName, [u8; 3]>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        let styles = HashMap::from([
            (StyleName::Mowed, [170, 220, 120]),
            (StyleName::Short, [110, 200, 90]),
            (StyleName::Medium, [60, 160, 60]),
            (StyleName::Long, [25, 110, 40]),
        ]);
        Self {
            image_size,
            background: [40, 30, 20],
            dot_radius: 2,
            styles,
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    pub fn with_dot_radius(mut self, radius: i32) -> Self {
        self.dot_radius = radius;
        self
    }

    pub fn set_style_color(&mut self, style: StyleName, color: [u8; 3]) {
        self.styles.insert(style, color);
    }

    fn color_for(&self, style: StyleName) -> [u8; 3] {
        self.styles.get(&style).copied().unwrap_or([255, 255, 255])
    }
}

/// Plot every attachment point in `(u, v)` space, colored by style.
pub fn render_placements_to_png(
    result: &GenerationResult,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be > 0");

    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    let r = config.dot_radius.max(0);

    for placed in &result.placements {
        let cx = (placed.binding.u * (w - 1) as f32).round() as i32;
        let cy = (placed.binding.v * (h - 1) as f32).round() as i32;
        let color = Rgb(config.color_for(placed.instance.style));

        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let (x, y) = (cx + dx, cy + dy);
                if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    let path = path.as_ref();
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!("Wrote preview to {}.", path.display());
    Ok(())
}
