use serde::{Deserialize, Serialize};

use crate::types::Point;

/// 贴纸默认值
pub mod defaults {
    pub const SIZE: f32 = 48.0;
    pub const MIN_SIZE: f32 = 24.0;
    pub const MAX_SIZE: f32 = 120.0;
    /// 水平位移到尺寸变化的换算除数
    pub const RESIZE_DIVISOR: f32 = 10.0;
}

/// 贴纸参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickerConfig {
    /// 新贴纸的位置（画布中心）
    pub default_position: Point,
    pub default_size: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub resize_divisor: f32,
}

impl StickerConfig {
    /// 以画布中心为默认位置
    pub fn centered(canvas_size: u32) -> Self {
        let center = canvas_size as f32 / 2.0;
        Self {
            default_position: Point::new(center, center),
            ..Self::default()
        }
    }

    /// 修正非法参数：颠倒的尺寸范围交换，非有限值或非正除数退回默认值
    pub fn sanitized(mut self) -> Self {
        if self.min_size > self.max_size {
            std::mem::swap(&mut self.min_size, &mut self.max_size);
        }
        if !self.min_size.is_finite() || !self.max_size.is_finite() || self.min_size <= 0.0 {
            self.min_size = defaults::MIN_SIZE;
            self.max_size = defaults::MAX_SIZE;
        }
        if !self.resize_divisor.is_finite() || self.resize_divisor <= 0.0 {
            self.resize_divisor = defaults::RESIZE_DIVISOR;
        }
        if !self.default_position.x.is_finite() || !self.default_position.y.is_finite() {
            self.default_position = Self::default().default_position;
        }
        self.default_size = self.clamp_size(self.default_size);
        self
    }

    fn clamp_size(&self, size: f32) -> f32 {
        if size.is_nan() {
            return self.min_size;
        }
        size.clamp(self.min_size, self.max_size)
    }
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            default_position: Point::new(300.0, 300.0),
            default_size: defaults::SIZE,
            min_size: defaults::MIN_SIZE,
            max_size: defaults::MAX_SIZE,
            resize_divisor: defaults::RESIZE_DIVISOR,
        }
    }
}

/// 贴纸实例
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    pub id: u64,
    pub glyph: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl Sticker {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// 当前的贴纸手势
///
/// 拖拽与缩放互斥，同一时刻最多只有一个。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ActiveGesture {
    #[default]
    None,
    Dragging {
        id: u64,
        /// 指针相对贴纸位置的偏移
        offset: Point,
    },
    Resizing {
        id: u64,
        start_x: f32,
        start_size: f32,
    },
}

impl ActiveGesture {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::None)
    }

    pub fn target(&self) -> Option<u64> {
        match self {
            Self::None => None,
            Self::Dragging { id, .. } | Self::Resizing { id, .. } => Some(*id),
        }
    }
}

/// 贴纸管理器
///
/// 贴纸是独立于栅格的覆盖层，不参与撤销/重做。
#[derive(Debug)]
pub struct StickerManager {
    config: StickerConfig,
    /// 创建顺序即绘制顺序
    stickers: Vec<Sticker>,
    next_id: u64,
    gesture: ActiveGesture,
}

impl Default for StickerManager {
    fn default() -> Self {
        Self::new(StickerConfig::default())
    }
}

impl StickerManager {
    pub fn new(config: StickerConfig) -> Self {
        Self {
            config: config.sanitized(),
            stickers: Vec::new(),
            next_id: 1,
            gesture: ActiveGesture::None,
        }
    }

    pub fn config(&self) -> &StickerConfig {
        &self.config
    }

    pub fn stickers(&self) -> &[Sticker] {
        &self.stickers
    }

    pub fn get(&self, id: u64) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    pub fn gesture(&self) -> ActiveGesture {
        self.gesture
    }

    /// 添加贴纸，返回新 id
    pub fn add_sticker(&mut self, glyph: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.stickers.push(Sticker {
            id,
            glyph: glyph.into(),
            x: self.config.default_position.x,
            y: self.config.default_position.y,
            size: self.config.default_size,
        });
        id
    }

    /// 开始拖拽；id 不存在或已有手势时返回 false
    pub fn begin_drag(&mut self, id: u64, pointer: Point) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        let Some(sticker) = self.get(id) else {
            return false;
        };
        self.gesture = ActiveGesture::Dragging {
            id,
            offset: pointer.offset_from(sticker.position()),
        };
        true
    }

    /// 拖拽中更新位置：pointer - offset
    pub fn update_drag(&mut self, pointer: Point) -> bool {
        let ActiveGesture::Dragging { id, offset } = self.gesture else {
            return false;
        };
        let Some(sticker) = self.stickers.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        sticker.x = pointer.x - offset.x;
        sticker.y = pointer.y - offset.y;
        true
    }

    pub fn end_drag(&mut self) {
        if matches!(self.gesture, ActiveGesture::Dragging { .. }) {
            self.gesture = ActiveGesture::None;
        }
    }

    /// 开始缩放；id 不存在或已有手势时返回 false
    pub fn begin_resize(&mut self, id: u64, pointer: Point) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        let Some(sticker) = self.get(id) else {
            return false;
        };
        self.gesture = ActiveGesture::Resizing {
            id,
            start_x: pointer.x,
            start_size: sticker.size,
        };
        true
    }

    /// 缩放中更新尺寸，只取水平位移
    pub fn update_resize(&mut self, pointer: Point) -> bool {
        let ActiveGesture::Resizing {
            id,
            start_x,
            start_size,
        } = self.gesture
        else {
            return false;
        };
        let delta = (pointer.x - start_x) / self.config.resize_divisor;
        let size = self.config.clamp_size(start_size + delta);
        let Some(sticker) = self.stickers.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        sticker.size = size;
        true
    }

    pub fn end_resize(&mut self) {
        if matches!(self.gesture, ActiveGesture::Resizing { .. }) {
            self.gesture = ActiveGesture::None;
        }
    }

    /// 按当前手势分发指针移动
    pub fn update_gesture(&mut self, pointer: Point) -> bool {
        match self.gesture {
            ActiveGesture::None => false,
            ActiveGesture::Dragging { .. } => self.update_drag(pointer),
            ActiveGesture::Resizing { .. } => self.update_resize(pointer),
        }
    }

    /// 结束任何手势
    pub fn end_gesture(&mut self) {
        self.gesture = ActiveGesture::None;
    }

    /// 清空贴纸（id 计数器也重置）
    pub fn clear(&mut self) {
        self.stickers.clear();
        self.next_id = 1;
        self.gesture = ActiveGesture::None;
    }
}
