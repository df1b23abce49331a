use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::*;

/// Application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // Canvas
    #[serde(default = "default_canvas_size")]
    pub canvas_size: u32,
    #[serde(default = "default_background_color")]
    pub background_color: String,

    // History / fill
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    #[serde(default = "default_fill_tolerance")]
    pub fill_tolerance: u8,

    // Brush
    #[serde(default = "default_brush_size")]
    pub brush_size: f32,
    #[serde(default = "default_min_brush_size")]
    pub min_brush_size: f32,
    #[serde(default = "default_max_brush_size")]
    pub max_brush_size: f32,
    #[serde(default = "default_brush_color")]
    pub brush_color: String,

    // Stickers
    #[serde(default = "default_sticker_size")]
    pub sticker_default_size: f32,
    #[serde(default = "default_sticker_min_size")]
    pub sticker_min_size: f32,
    #[serde(default = "default_sticker_max_size")]
    pub sticker_max_size: f32,
    #[serde(default = "default_sticker_resize_divisor")]
    pub sticker_resize_divisor: f32,

    // Save targets (None disables the side effect)
    #[serde(default = "default_gallery_path")]
    pub gallery_path: Option<PathBuf>,
    #[serde(default = "default_downloads_dir")]
    pub downloads_dir: Option<PathBuf>,
    /// Saved paintings kept in the gallery file, oldest dropped first.
    #[serde(default = "default_gallery_limit")]
    pub gallery_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_size: default_canvas_size(),
            background_color: default_background_color(),

            history_capacity: default_history_capacity(),
            fill_tolerance: default_fill_tolerance(),

            brush_size: default_brush_size(),
            min_brush_size: default_min_brush_size(),
            max_brush_size: default_max_brush_size(),
            brush_color: default_brush_color(),

            sticker_default_size: default_sticker_size(),
            sticker_min_size: default_sticker_min_size(),
            sticker_max_size: default_sticker_max_size(),
            sticker_resize_divisor: default_sticker_resize_divisor(),

            gallery_path: default_gallery_path(),
            downloads_dir: default_downloads_dir(),
            gallery_limit: default_gallery_limit(),
        }
    }
}

impl Settings {
    fn primary_settings_path() -> PathBuf {
        default_data_dir().join("settings.json")
    }

    /// Load settings from the default location.
    ///
    /// Falls back to defaults (and persists them) if loading fails.
    pub fn load() -> Self {
        let primary = Self::primary_settings_path();
        if let Some(settings) = Self::load_from(&primary) {
            return settings;
        }

        let default_settings = Self::default();
        let _ = default_settings.save_to(&primary);
        default_settings
    }

    /// Load settings from an explicit path, `None` if missing or malformed.
    pub fn load_from(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str::<Settings>(&content)
            .ok()
            .map(Settings::sanitized)
    }

    /// Save settings to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::primary_settings_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Repair out-of-range values from hand-edited files.
    pub fn sanitized(mut self) -> Self {
        if self.canvas_size == 0 {
            self.canvas_size = default_canvas_size();
        }
        if self.history_capacity == 0 {
            self.history_capacity = default_history_capacity();
        }
        if self.gallery_limit == 0 {
            self.gallery_limit = default_gallery_limit();
        }

        let (min, max) = sanitized_range(
            self.min_brush_size,
            self.max_brush_size,
            (default_min_brush_size(), default_max_brush_size()),
        );
        self.min_brush_size = min;
        self.max_brush_size = max;
        self.brush_size = finite_or(self.brush_size, default_brush_size()).clamp(min, max);

        let (min, max) = sanitized_range(
            self.sticker_min_size,
            self.sticker_max_size,
            (default_sticker_min_size(), default_sticker_max_size()),
        );
        self.sticker_min_size = min;
        self.sticker_max_size = max;
        self.sticker_default_size =
            finite_or(self.sticker_default_size, default_sticker_size()).clamp(min, max);

        if !self.sticker_resize_divisor.is_finite() || self.sticker_resize_divisor <= 0.0 {
            self.sticker_resize_divisor = default_sticker_resize_divisor();
        }
        self
    }

    /// Clamp a host-provided brush size to the configured range.
    pub fn clamp_brush_size(&self, size: f32) -> f32 {
        size.clamp(self.min_brush_size, self.max_brush_size)
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Swap inverted bounds; fall back to `defaults` when a bound is unusable.
fn sanitized_range(min: f32, max: f32, defaults: (f32, f32)) -> (f32, f32) {
    let (min, max) = if min > max { (max, min) } else { (min, max) };
    if !min.is_finite() || !max.is_finite() || min <= 0.0 {
        return defaults;
    }
    (min, max)
}
