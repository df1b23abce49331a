use std::path::PathBuf;

// Canvas defaults
pub fn default_canvas_size() -> u32 {
    600
}

pub fn default_background_color() -> String {
    "#FFFFFF".to_string()
}

// History / fill defaults
pub fn default_history_capacity() -> usize {
    20
}

pub fn default_fill_tolerance() -> u8 {
    32
}

// Brush defaults
pub fn default_brush_size() -> f32 {
    10.0
}

pub fn default_min_brush_size() -> f32 {
    2.0
}

pub fn default_max_brush_size() -> f32 {
    60.0
}

pub fn default_brush_color() -> String {
    "#FF0000".to_string()
}

// Sticker defaults
pub fn default_sticker_size() -> f32 {
    48.0
}

pub fn default_sticker_min_size() -> f32 {
    24.0
}

pub fn default_sticker_max_size() -> f32 {
    120.0
}

pub fn default_sticker_resize_divisor() -> f32 {
    10.0
}

// Gallery defaults
pub fn default_gallery_limit() -> usize {
    50
}

// Path defaults
pub fn default_home_dir() -> PathBuf {
    // Prefer a user home directory.
    if let Ok(home_dir) = std::env::var("HOME") {
        return PathBuf::from(home_dir);
    }
    if let Ok(home_dir) = std::env::var("USERPROFILE") {
        return PathBuf::from(home_dir);
    }

    // Fallback: program directory.
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.to_path_buf();
    }

    // Last resort: cwd.
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

pub fn default_data_dir() -> PathBuf {
    default_home_dir().join(".coloring_studio")
}

pub fn default_gallery_path() -> Option<PathBuf> {
    Some(default_data_dir().join("gallery.json"))
}

pub fn default_downloads_dir() -> Option<PathBuf> {
    Some(default_home_dir().join("Downloads"))
}
