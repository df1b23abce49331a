use cs_drawing::HistoryFlags;

/// Named sound cues the surface fires. Synthesis is up to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Every drawn stroke segment.
    Paint,
    Fill,
    Save,
    /// Saved and persisted successfully.
    Celebrate,
}

impl SoundCue {
    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::Paint => "paint",
            SoundCue::Fill => "fill",
            SoundCue::Save => "save",
            SoundCue::Celebrate => "celebrate",
        }
    }
}

/// Callbacks from the surface to the page hosting it.
///
/// All methods are fire-and-forget and default to no-ops.
pub trait SurfaceHost {
    /// Called with the `data:image/png;base64,...` URL of the saved painting.
    fn on_save(&mut self, _data_url: &str) {}

    /// Called after every history operation so toolbar buttons can be toggled.
    fn on_history_changed(&mut self, _flags: HistoryFlags) {}

    fn play_cue(&mut self, _cue: SoundCue) {}
}

/// Host that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHost;

impl SurfaceHost for NullHost {}
