use chrono::Utc;
use cs_drawing::{
    HistoryFlags, HistoryManager, RasterLayer, RasterSnapshot, Sticker, StickerManager,
    StrokeRenderer,
};

use crate::artwork::{Artwork, DecodedOutline, rasterize_outline};
use crate::config::SurfaceConfig;
use crate::error::SurfaceResult;
use crate::export::png_data_url;
use crate::gallery::{DownloadFolder, Gallery, SavedArtwork, download_file_name};
use crate::host::{NullHost, SoundCue, SurfaceHost};
use crate::loader::OutlineLoader;

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfacePhase {
    /// No artwork rasterized yet; all input is ignored.
    Uninitialized,
    Ready,
    Stroking,
    Dragging,
    Resizing,
}

/// Identifies one artwork load; a newer `begin_load` invalidates older tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct LoadTicket {
    generation: u64,
}

/// Paint + boundary layers of the current artwork.
#[derive(Debug)]
pub(crate) struct Layers {
    pub(crate) paint: RasterLayer,
    /// Outline only, set once per load and never mutated.
    pub(crate) boundary: RasterLayer,
}

/// The raster painting surface.
///
/// Owns the paint layer, its history and the sticker overlay, and talks to the
/// page that hosts it through a [`SurfaceHost`].
pub struct PaintingSurface<H: SurfaceHost = NullHost> {
    pub(crate) config: SurfaceConfig,
    pub(crate) host: H,
    artwork_id: Option<String>,
    generation: u64,
    pub(crate) layers: Option<Layers>,
    pub(crate) history: HistoryManager<RasterSnapshot>,
    pub(crate) strokes: StrokeRenderer,
    pub(crate) stickers: StickerManager,
    gallery: Option<Gallery>,
    downloads: Option<DownloadFolder>,
}

impl PaintingSurface<NullHost> {
    pub fn headless(config: SurfaceConfig) -> Self {
        Self::new(config, NullHost)
    }
}

impl<H: SurfaceHost> PaintingSurface<H> {
    pub fn new(config: SurfaceConfig, host: H) -> Self {
        Self {
            history: HistoryManager::with_capacity(config.history_capacity),
            stickers: StickerManager::new(config.stickers),
            gallery: config
                .gallery_path
                .clone()
                .map(|path| Gallery::open(path).with_limit(config.gallery_limit)),
            downloads: config.downloads_dir.clone().map(DownloadFolder::new),
            strokes: StrokeRenderer::with_size_range(config.brush_range),
            artwork_id: None,
            generation: 0,
            layers: None,
            config,
            host,
        }
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn artwork_id(&self) -> Option<&str> {
        self.artwork_id.as_deref()
    }

    pub fn phase(&self) -> SurfacePhase {
        use cs_drawing::ActiveGesture;

        if self.layers.is_none() {
            return SurfacePhase::Uninitialized;
        }
        if self.strokes.is_active() {
            return SurfacePhase::Stroking;
        }
        match self.stickers.gesture() {
            ActiveGesture::None => SurfacePhase::Ready,
            ActiveGesture::Dragging { .. } => SurfacePhase::Dragging,
            ActiveGesture::Resizing { .. } => SurfacePhase::Resizing,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.layers.is_some()
    }

    /// The user-visible paint layer.
    pub fn paint_layer(&self) -> Option<&RasterLayer> {
        self.layers.as_ref().map(|l| &l.paint)
    }

    /// The outline-only boundary layer.
    pub fn boundary_layer(&self) -> Option<&RasterLayer> {
        self.layers.as_ref().map(|l| &l.boundary)
    }

    pub fn stickers(&self) -> &[Sticker] {
        self.stickers.stickers()
    }

    pub fn history_flags(&self) -> HistoryFlags {
        self.history.flags()
    }

    pub fn history_len(&self) -> usize {
        self.history.undo_count()
    }

    // ==================== Artwork lifecycle ====================

    /// Discard everything and wait for the outline of `artwork`.
    pub fn begin_load(&mut self, artwork: &Artwork) -> LoadTicket {
        self.generation += 1;
        self.artwork_id = Some(artwork.id.clone());
        self.layers = None;
        self.history.clear();
        self.strokes.end();
        self.stickers.clear();
        self.notify_history();

        log::debug!(
            "loading artwork {} (generation {})",
            artwork.id,
            self.generation
        );
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Rasterize the fetched outline and take the floor snapshot.
    ///
    /// Returns `Ok(false)` when the ticket is stale. On error the surface stays
    /// uninitialized.
    pub fn complete_load(&mut self, ticket: LoadTicket, outline: DecodedOutline) -> SurfaceResult<bool> {
        if ticket.generation != self.generation {
            log::debug!(
                "dropping stale outline (generation {} != {})",
                ticket.generation,
                self.generation
            );
            return Ok(false);
        }

        let size = self.config.canvas_size;
        let boundary = rasterize_outline(outline, size)?;
        let mut paint = RasterLayer::filled(size, size, self.config.background)?;
        paint.composite(&boundary);

        self.history.snapshot(paint.snapshot());
        self.layers = Some(Layers { paint, boundary });
        self.notify_history();

        log::debug!(
            "artwork {} ready ({size}x{size})",
            self.artwork_id.as_deref().unwrap_or("?")
        );
        Ok(true)
    }

    /// Fetch and rasterize in one step.
    pub async fn load_artwork(&mut self, artwork: &Artwork, loader: &OutlineLoader) -> SurfaceResult<()> {
        let ticket = self.begin_load(artwork);
        let outline = loader.fetch(&artwork.outline).await.inspect_err(|e| {
            log::warn!("failed to fetch outline for {}: {e}", artwork.id);
        })?;
        self.complete_load(ticket, outline)?;
        Ok(())
    }

    // ==================== History ====================

    /// Capture the paint layer after a completed gesture.
    pub(crate) fn commit_snapshot(&mut self) {
        let Some(layers) = self.layers.as_ref() else {
            return;
        };
        self.history.snapshot(layers.paint.snapshot());
        self.notify_history();
    }

    pub(crate) fn notify_history(&mut self) {
        let flags = self.history.flags();
        self.host.on_history_changed(flags);
    }

    pub fn undo(&mut self) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        if let Some(state) = self.history.undo()
            && let Err(e) = layers.paint.restore(state)
        {
            log::warn!("undo restore failed: {e}");
        }
        self.notify_history();
    }

    pub fn redo(&mut self) {
        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        if let Some(state) = self.history.redo()
            && let Err(e) = layers.paint.restore(state)
        {
            log::warn!("redo restore failed: {e}");
        }
        self.notify_history();
    }

    // ==================== Save ====================

    /// Export the paint layer and run the save side effects.
    ///
    /// Returns the data URL handed to the host, `None` when nothing is loaded
    /// or encoding failed.
    pub fn handle_save(&mut self) -> Option<String> {
        let layers = self.layers.as_ref()?;
        let png = match layers.paint.encode_png() {
            Ok(png) => png,
            Err(e) => {
                log::warn!("save skipped: {e}");
                return None;
            }
        };
        let data_url = png_data_url(&png);

        self.host.on_save(&data_url);
        self.host.play_cue(SoundCue::Save);

        let date = Utc::now();
        let mut persisted = true;

        if let Some(gallery) = &self.gallery {
            let entry = SavedArtwork {
                data_url: data_url.clone(),
                date,
                artwork_id: self.artwork_id.clone(),
                stickers: self.stickers.stickers().to_vec(),
            };
            if let Err(e) = gallery.record(entry) {
                log::warn!("gallery write to {} failed: {e}", gallery.path().display());
                persisted = false;
            }
        }

        if let Some(downloads) = &self.downloads {
            let name = download_file_name(self.artwork_id.as_deref(), date);
            match downloads.write(&name, &png) {
                Ok(path) => log::debug!("saved copy to {}", path.display()),
                Err(e) => {
                    log::warn!("download to {} failed: {e}", downloads.dir().display());
                    persisted = false;
                }
            }
        }

        if persisted {
            self.host.play_cue(SoundCue::Celebrate);
        }
        Some(data_url)
    }
}
