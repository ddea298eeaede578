use crate::{
    error::{EncodeError, LimitError},
    name::{ImageConfig, ImageFormat},
};

mod solid;
pub use solid::SolidFill;

/// JPEG 编码质量
pub const DEFAULT_QUALITY: u8 = 80;

/// JPEG 单边最大像素
pub const JPEG_MAX_DIMENSION: u32 = u16::MAX as u32;

/// 图片生成引擎trait
pub trait Engine {
    /// 从engine生成指定格式的图片
    fn generate(self, format: ImageFormat) -> Result<Vec<u8>, EncodeError>;
}

/// 生成前检查尺寸，避免分配过大的缓冲区
pub fn check_limits(config: &ImageConfig, max_pixels: u64) -> Result<(), LimitError> {
    let (width, height) = (config.width, config.height);
    if width as u64 * height as u64 > max_pixels {
        return Err(LimitError::TooManyPixels {
            width,
            height,
            max: max_pixels,
        });
    }
    if config.format.is_jpeg() && (width > JPEG_MAX_DIMENSION || height > JPEG_MAX_DIMENSION) {
        return Err(LimitError::JpegTooLarge {
            width,
            height,
            max: JPEG_MAX_DIMENSION,
        });
    }
    Ok(())
}
