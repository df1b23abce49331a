use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use cs_drawing::Sticker;
use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

/// One saved painting, as stored in the gallery file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedArtwork {
    pub data_url: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub artwork_id: Option<String>,
    /// Stickers are not flattened into the image; kept here for re-display.
    #[serde(default)]
    pub stickers: Vec<Sticker>,
}

/// Entries kept when no limit is configured.
pub const DEFAULT_GALLERY_LIMIT: usize = 50;

/// Most-recent-first list of saved paintings in a JSON file.
///
/// Each save rewrites the whole file, so the list is capped at `limit`
/// entries and the oldest ones are dropped.
#[derive(Debug, Clone)]
pub struct Gallery {
    path: PathBuf,
    limit: usize,
}

impl Gallery {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            limit: DEFAULT_GALLERY_LIMIT,
        }
    }

    /// Keep at most `limit` entries (at least one).
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// All entries, newest first. A missing file is an empty gallery.
    pub fn entries(&self) -> Result<Vec<SavedArtwork>, GalleryError> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Vec::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Prepend an entry, drop the oldest beyond the limit and rewrite the file.
    pub fn record(&self, entry: SavedArtwork) -> Result<(), GalleryError> {
        let mut entries = self.entries()?;
        entries.insert(0, entry);
        if entries.len() > self.limit {
            log::debug!(
                "gallery {} full, dropping {} oldest",
                self.path.display(),
                entries.len() - self.limit
            );
            entries.truncate(self.limit);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(&entries)?)?;
        Ok(())
    }
}

/// Directory receiving "downloaded" PNG copies of saved paintings.
#[derive(Debug, Clone)]
pub struct DownloadFolder {
    dir: PathBuf,
}

impl DownloadFolder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, file_name: &str, png: &[u8]) -> Result<PathBuf, GalleryError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, png)?;
        Ok(path)
    }
}

/// `coloring-<artwork>-<timestamp>.png`, with the id reduced to filename-safe chars.
pub fn download_file_name(artwork_id: Option<&str>, date: DateTime<Utc>) -> String {
    let id: String = artwork_id
        .unwrap_or("painting")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("coloring-{id}-{}.png", date.format("%Y%m%d-%H%M%S%3f"))
}
