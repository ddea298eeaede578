use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use super::{Engine, DEFAULT_QUALITY};
use crate::{
    error::EncodeError,
    name::{Color, ImageFormat},
};

/// 纯色填充的图片
#[derive(Debug)]
pub struct SolidFill(RgbaImage);

impl SolidFill {
    /// 分配 width x height 的缓冲区，每个像素都是 color
    pub fn new(width: u32, height: u32, color: Color) -> Self {
        Self(RgbaImage::from_pixel(width, height, color.into()))
    }

    #[cfg(test)]
    pub fn buffer(&self) -> &RgbaImage {
        &self.0
    }
}

impl Engine for SolidFill {
    fn generate(self, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Cursor::new(Vec::new());
        if format.is_jpeg() {
            // JPEG 不支持 alpha 通道
            let img = DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(self.0).to_rgb8());
            img.write_to(&mut buf, ImageOutputFormat::Jpeg(DEFAULT_QUALITY))?;
        } else {
            DynamicImage::ImageRgba8(self.0).write_to(&mut buf, ImageOutputFormat::Png)?;
        }
        Ok(buf.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use image::{GenericImageView, Rgba};

    use super::*;

    #[test]
    fn solid_fill_should_cover_every_pixel() {
        let fill = SolidFill::new(200, 300, Color::rgb(10, 20, 30));
        let buffer = fill.buffer();
        assert_eq!(buffer.dimensions(), (200, 300));
        assert_eq!(buffer.pixels().count(), 200 * 300);
        assert!(buffer.pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
        assert_eq!(buffer.as_raw().len(), 200 * 300 * 4);
    }

    #[test]
    fn zero_dimension_should_give_empty_buffer() {
        let fill = SolidFill::new(0, 5, Color::rgb(1, 2, 3));
        assert_eq!(fill.buffer().pixels().count(), 0);
        assert!(fill.buffer().as_raw().is_empty());
    }

    #[test]
    fn jpeg_should_be_generated() {
        let data = SolidFill::new(20, 10, Color::rgb(255, 0, 0))
            .generate(ImageFormat::Jpg)
            .unwrap();
        // JPEG 魔数
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
        let img = image::load_from_memory(&data).unwrap();
        assert_eq!(img.dimensions(), (20, 10));
    }

    #[test]
    fn png_should_keep_exact_pixels() {
        let color = Color {
            alpha: 0xCC,
            ..Color::rgb(0, 255, 0)
        };
        let data = SolidFill::new(3, 4, color).generate(ImageFormat::Png).unwrap();
        assert_eq!(&data[0..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);
        let img = image::load_from_memory(&data).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (3, 4));
        assert!(img.pixels().all(|p| *p == Rgba([0, 255, 0, 0xCC])));
    }
}
