use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::Settings;

/// Unified config manager.
pub struct ConfigManager {
    settings: Arc<RwLock<Settings>>,
}

impl ConfigManager {
    /// Create a new config manager (loads settings once and caches them).
    pub fn new() -> Self {
        Self::with_settings(Settings::load())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Get a snapshot copy of current settings.
    pub fn get(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Get the shared settings reference.
    pub fn get_shared(&self) -> Arc<RwLock<Settings>> {
        Arc::clone(&self.settings)
    }

    /// Reload settings from disk.
    pub fn reload(&self) {
        *self.settings.write() = Settings::load();
    }

    /// Apply an in-memory change.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        let mut guard = self.settings.write();
        f(&mut *guard);
        *guard = guard.clone().sanitized();
    }

    // Convenience accessors.

    #[inline]
    pub fn canvas_size(&self) -> u32 {
        self.settings.read().canvas_size
    }

    #[inline]
    pub fn history_capacity(&self) -> usize {
        self.settings.read().history_capacity
    }

    #[inline]
    pub fn fill_tolerance(&self) -> u8 {
        self.settings.read().fill_tolerance
    }

    #[inline]
    pub fn brush_size(&self) -> f32 {
        self.settings.read().brush_size
    }

    #[inline]
    pub fn brush_color(&self) -> String {
        self.settings.read().brush_color.clone()
    }

    #[inline]
    pub fn gallery_path(&self) -> Option<PathBuf> {
        self.settings.read().gallery_path.clone()
    }

    #[inline]
    pub fn downloads_dir(&self) -> Option<PathBuf> {
        self.settings.read().downloads_dir.clone()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
