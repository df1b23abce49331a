use cs_drawing::tiny_skia::Pixmap;
use cs_surface::export::decode_png_data_url;
use cs_surface::{
    Artwork, BrushStyle, DecodedOutline, Gallery, HistoryFlags, Outline, OutlineLoader,
    PaintTool, PaintingSurface, Point, RasterLayer, Rgba, SoundCue, SurfaceConfig, SurfaceHost,
    SurfacePhase, ToolState,
};

const RED: Rgba = Rgba::opaque(255, 0, 0);

#[derive(Debug, Default)]
struct RecordingHost {
    saves: Vec<String>,
    flags: Vec<HistoryFlags>,
    cues: Vec<SoundCue>,
}

impl SurfaceHost for RecordingHost {
    fn on_save(&mut self, data_url: &str) {
        self.saves.push(data_url.to_string());
    }

    fn on_history_changed(&mut self, flags: HistoryFlags) {
        self.flags.push(flags);
    }

    fn play_cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}

/// `size`×`size` outline frame of `border` px around a transparent interior.
fn framed_outline(size: u32, border: u32) -> RasterLayer {
    let mut layer = RasterLayer::new(size, size).unwrap();
    for y in 0..size {
        for x in 0..size {
            if x < border || y < border || x >= size - border || y >= size - border {
                layer.set_pixel(x, y, Rgba::BLACK);
            }
        }
    }
    layer
}

fn loaded_surface(config: SurfaceConfig) -> PaintingSurface<RecordingHost> {
    let size = config.canvas_size;
    let mut surface = PaintingSurface::new(config, RecordingHost::default());
    let artwork = Artwork::new("frame", "Frame", Outline::Svg(String::new()));
    let ticket = surface.begin_load(&artwork);
    assert!(
        surface
            .complete_load(ticket, DecodedOutline::Pixels(framed_outline(size, 2)))
            .unwrap()
    );
    surface
}

fn fill_tool(color: &str) -> ToolState {
    ToolState::default().with_tool(PaintTool::Fill).with_color(color)
}

fn brush(color: &str, size: f32) -> ToolState {
    ToolState::new(PaintTool::Brush, color, size, BrushStyle::Round)
}

fn stroke(surface: &mut PaintingSurface<RecordingHost>, from: Point, to: Point, tools: &ToolState) {
    surface.pointer_down(from, tools);
    surface.pointer_move(to, tools);
    surface.pointer_up();
}

#[test]
fn scenario_a_fill_interior_keeps_outline() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    surface.pointer_down(Point::new(300.0, 300.0), &fill_tool("#FF0000"));

    let paint = surface.paint_layer().unwrap();
    for y in 0..600 {
        for x in 0..600 {
            let on_outline = x < 2 || y < 2 || x >= 598 || y >= 598;
            let expected = if on_outline { Rgba::BLACK } else { RED };
            assert_eq!(paint.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
    assert_eq!(surface.history_len(), 2);
    assert!(surface.host().cues.contains(&SoundCue::Fill));
}

#[test]
fn scenario_b_stroke_undo_redo() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    let pristine = surface.paint_layer().unwrap().snapshot();

    stroke(
        &mut surface,
        Point::new(100.0, 100.0),
        Point::new(200.0, 200.0),
        &brush("#00FF00", 10.0),
    );
    let painted = surface.paint_layer().unwrap().snapshot();
    assert_eq!(
        surface.paint_layer().unwrap().pixel(150, 150),
        Some(Rgba::opaque(0, 255, 0))
    );
    assert!(surface.host().cues.contains(&SoundCue::Paint));

    surface.undo();
    assert!(surface.paint_layer().unwrap().matches(&pristine));

    surface.redo();
    assert!(surface.paint_layer().unwrap().matches(&painted));
}

#[test]
fn scenario_c_sticker_drag_with_offset() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    let id = surface.add_sticker("🐞").unwrap();
    assert_eq!(surface.stickers()[0].x, 300.0);
    assert_eq!(surface.stickers()[0].y, 300.0);

    assert!(surface.begin_sticker_drag(id, Point::new(350.0, 350.0)));
    surface.pointer_move(Point::new(400.0, 450.0), &ToolState::default());
    surface.pointer_up();

    let sticker = &surface.stickers()[0];
    assert_eq!((sticker.x, sticker.y), (350.0, 400.0));
    assert_eq!(surface.history_len(), 1);
}

#[test]
fn undo_floor_returns_to_rasterized_artwork() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    let pristine = surface.paint_layer().unwrap().snapshot();

    surface.pointer_down(Point::new(50.0, 50.0), &fill_tool("#FFCC00"));
    stroke(&mut surface, Point::new(10.0, 10.0), Point::new(500.0, 40.0), &brush("#0000FF", 8.0));
    let eraser = ToolState::default().with_tool(PaintTool::Eraser).with_size(12.0);
    stroke(&mut surface, Point::new(300.0, 20.0), Point::new(300.0, 580.0), &eraser);
    surface.pointer_down(Point::new(500.0, 500.0), &fill_tool("#33AA33"));
    let operations = 4;
    assert_eq!(surface.history_len(), operations + 1);

    for _ in 0..operations {
        surface.undo();
    }
    assert!(surface.paint_layer().unwrap().matches(&pristine));
    assert!(!surface.history_flags().can_undo);

    surface.undo();
    assert!(surface.paint_layer().unwrap().matches(&pristine));
}

#[test]
fn new_gesture_after_undo_clears_redo() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    stroke(&mut surface, Point::new(20.0, 20.0), Point::new(80.0, 80.0), &brush("#FF00FF", 6.0));
    surface.undo();
    assert!(surface.history_flags().can_redo);

    surface.pointer_down(Point::new(300.0, 300.0), &fill_tool("#00FFFF"));
    assert!(!surface.history_flags().can_redo);

    let before = surface.paint_layer().unwrap().snapshot();
    surface.redo();
    assert!(surface.paint_layer().unwrap().matches(&before));
}

#[test]
fn history_keeps_only_recent_twenty_states() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    let pristine = surface.paint_layer().unwrap().snapshot();
    let colors = ["#FF0000", "#0000FF"];

    for i in 1..=25 {
        surface.pointer_down(Point::new(300.0, 300.0), &fill_tool(colors[i % 2]));
    }
    assert_eq!(surface.history_len(), 20);

    let mut undos = 0;
    while surface.history_flags().can_undo {
        surface.undo();
        undos += 1;
    }
    assert_eq!(undos, 19);

    // 最旧的可恢复状态是第 6 次填充之后（红色）
    let paint = surface.paint_layer().unwrap();
    assert!(!paint.matches(&pristine));
    assert_eq!(paint.pixel(300, 300), Some(RED));
}

#[test]
fn history_flags_reach_host() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    assert_eq!(
        surface.host().flags.last(),
        Some(&HistoryFlags {
            can_undo: false,
            can_redo: false
        })
    );

    stroke(&mut surface, Point::new(20.0, 20.0), Point::new(80.0, 20.0), &brush("#000000", 4.0));
    assert_eq!(surface.host().flags.last().map(|f| f.can_undo), Some(true));

    surface.undo();
    let last = *surface.host().flags.last().unwrap();
    assert!(!last.can_undo && last.can_redo);

    // 空操作的撤销也会刷新按钮状态
    let count = surface.host().flags.len();
    surface.undo();
    assert_eq!(surface.host().flags.len(), count + 1);
}

#[test]
fn boundary_layer_is_never_mutated() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    let boundary = surface.boundary_layer().unwrap().snapshot();

    surface.pointer_down(Point::new(300.0, 300.0), &fill_tool("#FF0000"));
    stroke(&mut surface, Point::new(0.0, 0.0), Point::new(599.0, 599.0), &brush("#00FF00", 20.0));
    surface.undo();

    assert!(surface.boundary_layer().unwrap().matches(&boundary));
}

#[test]
fn changing_artwork_discards_session() {
    let mut surface = loaded_surface(SurfaceConfig::default());
    surface.add_sticker("🌻");
    stroke(&mut surface, Point::new(20.0, 20.0), Point::new(80.0, 80.0), &brush("#FF00FF", 6.0));

    let first = Artwork::new("a", "A", Outline::Svg(String::new()));
    let second = Artwork::new("b", "B", Outline::Svg(String::new()));
    let stale = surface.begin_load(&first);
    assert_eq!(surface.phase(), SurfacePhase::Uninitialized);
    assert!(surface.stickers().is_empty());
    assert_eq!(surface.history_len(), 0);

    let current = surface.begin_load(&second);
    let blank = || DecodedOutline::Pixels(RasterLayer::new(600, 600).unwrap());
    assert!(!surface.complete_load(stale, blank()).unwrap());
    assert_eq!(surface.phase(), SurfacePhase::Uninitialized);

    assert!(surface.complete_load(current, blank()).unwrap());
    assert_eq!(surface.phase(), SurfacePhase::Ready);
    assert_eq!(surface.artwork_id(), Some("b"));
    assert_eq!(surface.add_sticker("🌻"), Some(1));
}

#[test]
fn failed_load_stays_uninitialized() {
    let mut surface = PaintingSurface::new(SurfaceConfig::default(), RecordingHost::default());
    let artwork = Artwork::new("broken", "Broken", Outline::Svg("<svg".into()));
    let ticket = surface.begin_load(&artwork);
    assert!(
        surface
            .complete_load(ticket, DecodedOutline::Svg("<svg".into()))
            .is_err()
    );
    assert_eq!(surface.phase(), SurfacePhase::Uninitialized);
}

#[test]
fn save_runs_all_side_effects() {
    let dir = tempfile::tempdir().unwrap();
    let config = SurfaceConfig {
        gallery_path: Some(dir.path().join("gallery.json")),
        downloads_dir: Some(dir.path().join("downloads")),
        ..SurfaceConfig::default()
    };
    let mut surface = loaded_surface(config);
    surface.pointer_down(Point::new(300.0, 300.0), &fill_tool("#FF0000"));
    surface.add_sticker("⭐");

    let data_url = surface.handle_save().unwrap();
    assert_eq!(surface.host().saves, vec![data_url.clone()]);
    assert!(surface.host().cues.ends_with(&[SoundCue::Save, SoundCue::Celebrate]));

    let entries = Gallery::open(dir.path().join("gallery.json")).entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].data_url, data_url);
    assert_eq!(entries[0].artwork_id.as_deref(), Some("frame"));
    assert_eq!(entries[0].stickers.len(), 1);

    let downloads: Vec<_> = std::fs::read_dir(dir.path().join("downloads"))
        .unwrap()
        .collect();
    assert_eq!(downloads.len(), 1);

    // 导出图片只包含栅格图层
    let png = decode_png_data_url(&data_url).unwrap();
    let pixmap = Pixmap::decode_png(&png).unwrap();
    assert_eq!((pixmap.width(), pixmap.height()), (600, 600));
    assert_eq!(
        surface.paint_layer().unwrap().data(),
        pixmap.data(),
        "exported pixels must match the paint layer"
    );
}

#[test]
fn failed_persistence_skips_celebration() {
    let dir = tempfile::tempdir().unwrap();
    let config = SurfaceConfig {
        // 目录不能当作 gallery 文件读取
        gallery_path: Some(dir.path().to_path_buf()),
        ..SurfaceConfig::default()
    };
    let mut surface = loaded_surface(config);

    assert!(surface.handle_save().is_some());
    assert_eq!(surface.host().saves.len(), 1);
    assert!(surface.host().cues.contains(&SoundCue::Save));
    assert!(!surface.host().cues.contains(&SoundCue::Celebrate));
}

#[tokio::test]
async fn load_artwork_from_svg_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("house.svg");
    std::fs::write(
        &path,
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300">
            <rect x="50" y="50" width="200" height="200" fill="none" stroke="#000" stroke-width="4"/>
        </svg>"##,
    )
    .unwrap();

    let artwork = Artwork::new("house", "House", Outline::Image(path.display().to_string()));
    let mut surface = PaintingSurface::new(SurfaceConfig::default(), RecordingHost::default());
    surface
        .load_artwork(&artwork, &OutlineLoader::new())
        .await
        .unwrap();
    assert_eq!(surface.phase(), SurfacePhase::Ready);

    // 线稿放大两倍：边框位于 x=100，内部为白色
    let paint = surface.paint_layer().unwrap();
    assert!(paint.pixel(100, 300).unwrap().r < 50);
    assert_eq!(paint.pixel(300, 300), Some(Rgba::WHITE));
    assert_eq!(surface.boundary_layer().unwrap().pixel(300, 300), Some(Rgba::TRANSPARENT));

    surface.pointer_down(Point::new(300.0, 300.0), &fill_tool("#FF0000"));
    let paint = surface.paint_layer().unwrap();
    assert_eq!(paint.pixel(300, 300), Some(RED));
    assert_eq!(paint.pixel(20, 20), Some(Rgba::WHITE));
    assert!(paint.pixel(100, 300).unwrap().r < 50);
}
