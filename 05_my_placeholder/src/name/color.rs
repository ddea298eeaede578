use std::{fmt, str::FromStr};

use image::Rgba;

use crate::error::ColorDecodeError;

/// 未指定颜色时使用的默认背景色
pub const DEFAULT_BACKGROUND: Color = Color::rgb(0xCC, 0xCC, 0xCC);

/// RGBA 颜色，值类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// 不透明颜色
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 0xFF,
        }
    }

    /// 解析 `RRGGBB`，失败时记录警告并返回 fallback
    pub fn parse_or(hex: &str, fallback: Color) -> Color {
        match hex.parse() {
            Ok(color) => color,
            Err(e) => {
                tracing::warn!(error = %e, fallback = %fallback, "using fallback color");
                fallback
            }
        }
    }
}

impl FromStr for Color {
    type Err = ColorDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorDecodeError(s.to_string());
        // from_str_radix 会接受前导 `+`，这里先逐字节检查
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |range: std::ops::Range<usize>| {
            s.get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(err)
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)?;
        if self.alpha != 0xFF {
            write!(f, "{:02x}", self.alpha)?;
        }
        Ok(())
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.red, c.green, c.blue, c.alpha])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_should_decode_to_opaque_rgb() {
        let cases = [
            ("010101", (1, 1, 1)),
            ("FF0000", (255, 0, 0)),
            ("0f1020", (15, 16, 32)),
        ];
        for (hex, (r, g, b)) in cases {
            let color: Color = hex.parse().unwrap();
            assert_eq!(color, Color::rgb(r, g, b), "parse {hex}");
            assert_eq!(color.alpha, 0xFF);
        }
    }

    #[test]
    fn malformed_hex_should_fail() {
        for hex in ["", "fff", "0000000", "gg0000", "+10000", "ab¢de"] {
            assert_eq!(
                hex.parse::<Color>(),
                Err(ColorDecodeError(hex.to_string())),
                "parse {hex:?}"
            );
        }
    }

    #[test]
    fn parse_or_should_fall_back_on_bad_input() {
        let fallback = Color::rgb(1, 2, 3);
        assert_eq!(Color::parse_or("zzzzzz", fallback), fallback);
        assert_eq!(Color::parse_or("00ff00", fallback), Color::rgb(0, 255, 0));
    }

    #[test]
    fn color_should_display_as_hex() {
        assert_eq!(Color::rgb(0x0f, 0x10, 0x20).to_string(), "#0f1020");
        let translucent = Color {
            alpha: 0xCC,
            ..Color::rgb(0, 0xFF, 0)
        };
        assert_eq!(translucent.to_string(), "#00ff00cc");
    }

    #[test]
    fn color_should_convert_to_rgba_pixel() {
        let pixel: Rgba<u8> = Color::rgb(10, 20, 30).into();
        assert_eq!(pixel, Rgba([10, 20, 30, 255]));
    }
}
