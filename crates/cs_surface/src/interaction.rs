use cs_drawing::{PaintTool, Point, Rgba, ToolState, flood_fill};

use crate::host::{SoundCue, SurfaceHost};
use crate::surface::PaintingSurface;

impl<H: SurfaceHost> PaintingSurface<H> {
    /// 处理指针按下
    ///
    /// 画笔/橡皮擦开始笔画；油漆桶立即填充并记录历史；其他工具不影响栅格。
    /// 仍在进行的笔画（多点触控、丢失的抬起事件）先按抬起处理。
    pub fn pointer_down(&mut self, pos: Point, tools: &ToolState) {
        if self.layers.is_none() || self.stickers.gesture().is_active() {
            return;
        }
        self.finish_stroke();

        match tools.tool {
            PaintTool::Brush | PaintTool::Eraser => self.strokes.begin(pos),
            PaintTool::Fill => self.fill_at(pos, &tools.color),
            PaintTool::Sticker | PaintTool::Text | PaintTool::Fx => {}
        }
    }

    /// 处理指针移动（贴纸手势优先，全局监听）
    pub fn pointer_move(&mut self, pos: Point, tools: &ToolState) {
        if self.stickers.gesture().is_active() {
            self.stickers.update_gesture(pos);
            return;
        }

        let Some(layers) = self.layers.as_mut() else {
            return;
        };
        if self.strokes.extend(&mut layers.paint, pos, tools) {
            self.host.play_cue(SoundCue::Paint);
        }
    }

    /// 处理指针抬起：结束笔画和贴纸手势
    pub fn pointer_up(&mut self) {
        self.finish_stroke();
        self.stickers.end_gesture();
    }

    /// 指针离开画布：与抬起相同地结束笔画，贴纸手势继续
    pub fn pointer_leave(&mut self) {
        self.finish_stroke();
    }

    fn finish_stroke(&mut self) {
        let outcome = self.strokes.end();
        if outcome.was_active && outcome.segments > 0 {
            self.commit_snapshot();
        }
    }

    /// 油漆桶填充
    ///
    /// 颜色解析失败时不做任何修改。
    fn fill_at(&mut self, pos: Point, color: &str) {
        let fill_color = match Rgba::parse_hex(color) {
            Ok(c) => c,
            Err(e) => {
                log::debug!("fill aborted: {e}");
                return;
            }
        };
        let tolerance = self.config.fill_tolerance;
        let Some(layers) = self.layers.as_mut() else {
            return;
        };

        let report = flood_fill(&mut layers.paint, pos.x, pos.y, fill_color, tolerance);
        log::debug!(
            "fill {} at ({}, {}): {} px",
            fill_color.to_hex(),
            pos.x,
            pos.y,
            report.filled
        );
        if report.changed() {
            self.commit_snapshot();
            self.host.play_cue(SoundCue::Fill);
        }
    }

    // ==================== 贴纸 ====================

    /// 从贴纸面板添加贴纸
    pub fn add_sticker(&mut self, glyph: &str) -> Option<u64> {
        if self.layers.is_none() {
            return None;
        }
        Some(self.stickers.add_sticker(glyph))
    }

    /// 按住贴纸本体开始拖拽
    pub fn begin_sticker_drag(&mut self, id: u64, pointer: Point) -> bool {
        if self.layers.is_none() || self.strokes.is_active() {
            return false;
        }
        self.stickers.begin_drag(id, pointer)
    }

    /// 按住贴纸尺寸手柄开始缩放
    pub fn begin_sticker_resize(&mut self, id: u64, pointer: Point) -> bool {
        if self.layers.is_none() || self.strokes.is_active() {
            return false;
        }
        self.stickers.begin_resize(id, pointer)
    }
}
