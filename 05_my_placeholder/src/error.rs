use thiserror::Error;

/// 图片名称解析错误，对外表现为 404
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("fail to parse name: {0}")]
    InvalidName(String),

    #[error("invalid dimension {value:?} in {name}")]
    InvalidDimension { name: String, value: String },

    #[error("dimension must be positive: {0}")]
    ZeroDimension(String),
}

/// 颜色解码错误，只在本地恢复，不会返回给客户端
#[derive(Debug, Error, PartialEq, Eq)]
#[error("fail to parse color: {0:?}")]
pub struct ColorDecodeError(pub String);

/// 图片尺寸超出服务限制
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    #[error("{width}x{height} exceeds the limit of {max} pixels")]
    TooManyPixels { width: u32, height: u32, max: u64 },

    #[error("{width}x{height} is too large for JPEG (max side {max})")]
    JpegTooLarge { width: u32, height: u32, max: u32 },
}

/// 编码失败，属于服务端故障
#[derive(Debug, Error)]
#[error("encode failed: {0}")]
pub struct EncodeError(#[from] pub image::ImageError);
