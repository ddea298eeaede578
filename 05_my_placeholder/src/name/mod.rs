mod color;
pub use color::{Color, DEFAULT_BACKGROUND};

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::error::ParseError;

lazy_static! {
    /// `<width>x<height>[-RRGGBB].<ext>`，忽略大小写
    static ref IMAGE_NAME: Regex =
        Regex::new(r"(?i)^(\d+)x(\d+)(-[0-9a-f]{6})?\.(jpe?g|png)$").expect("valid image name pattern");
}

/// 输出格式，保留请求中的扩展名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpg,
    Jpeg,
    Png,
}

impl ImageFormat {
    /// 从扩展名得到格式
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_ascii_uppercase().as_str() {
            "JPG" => Some(Self::Jpg),
            "JPEG" => Some(Self::Jpeg),
            "PNG" => Some(Self::Png),
            _ => None,
        }
    }

    /// 大写的格式标签
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Jpg => "JPG",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
        }
    }

    pub fn is_jpeg(&self) -> bool {
        matches!(self, Self::Jpg | Self::Jpeg)
    }

    pub fn content_type(&self) -> mime::Mime {
        if self.is_jpeg() {
            mime::IMAGE_JPEG
        } else {
            mime::IMAGE_PNG
        }
    }
}

/// 从图片名称解析出的生成配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    /// 名称中是否带有 `-RRGGBB`
    pub custom_background: bool,
    pub format: ImageFormat,
}

impl ImageConfig {
    /// 解析图片名称，未指定颜色或颜色无法解码时使用 fallback
    pub fn parse_with_fallback(name: &str, fallback: Color) -> Result<Self, ParseError> {
        let invalid = || ParseError::InvalidName(name.to_string());
        let caps = IMAGE_NAME.captures(name).ok_or_else(invalid)?;
        if caps.len() != 5 {
            return Err(invalid());
        }

        let width = parse_dimension(name, &caps[1])?;
        let height = parse_dimension(name, &caps[2])?;
        let background = match caps.get(3) {
            Some(m) => Color::parse_or(&m.as_str()[1..], fallback),
            None => fallback,
        };
        let format = ImageFormat::from_ext(&caps[4]).ok_or_else(invalid)?;

        Ok(Self {
            width,
            height,
            background,
            custom_background: caps.get(3).is_some(),
            format,
        })
    }
}

/// 使用默认背景色解析图片名称
impl TryFrom<&str> for ImageConfig {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse_with_fallback(value, DEFAULT_BACKGROUND)
    }
}

fn parse_dimension(name: &str, value: &str) -> Result<u32, ParseError> {
    let n: u32 = value.parse().map_err(|_| ParseError::InvalidDimension {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    if n == 0 {
        return Err(ParseError::ZeroDimension(name.to_string()));
    }
    Ok(n)
}
