use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// 非预乘 RGBA 颜色（8 位通道）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// 解析 `#RRGGBB`（大小写不敏感），结果为完全不透明
    pub fn parse_hex(input: &str) -> Result<Self, ColorError> {
        let Some(digits) = input.strip_prefix('#') else {
            return Err(ColorError::MissingHash(input.to_string()));
        };
        if digits.len() != 6 {
            return Err(ColorError::InvalidLength(input.to_string()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit(input.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorError::InvalidDigit(input.to_string()))
        };
        Ok(Self::opaque(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// 输出 `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// 四个通道的差值是否都在容差范围内
    #[inline]
    pub fn within_tolerance(&self, other: &Rgba, tolerance: u8) -> bool {
        self.r.abs_diff(other.r) <= tolerance
            && self.g.abs_diff(other.g) <= tolerance
            && self.b.abs_diff(other.b) <= tolerance
            && self.a.abs_diff(other.a) <= tolerance
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    #[inline]
    pub fn to_skia(self) -> tiny_skia::ColorU8 {
        tiny_skia::ColorU8::from_rgba(self.r, self.g, self.b, self.a)
    }

    #[inline]
    pub fn from_skia(color: tiny_skia::ColorU8) -> Self {
        Self::new(color.red(), color.green(), color.blue(), color.alpha())
    }
}
