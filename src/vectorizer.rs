//! 图片向量化
//!
//! 将上传的图片转换为特征向量，步骤固定：
//!
//! 1. 解码图片，格式由内容自动识别
//! 2. 转换为 8 位灰度图
//! 3. 按行展开为一维序列
//! 4. 每个元素除以 255，归一化到 `[0, 1]`
//! 5. 只保留前 `len / 100` 个元素
//!
//! 不做任何缩放和裁剪，相同的输入总是得到相同的向量。

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageError, ImageReader, Luma};
use log::debug;
use thiserror::Error;

/// 每多少个像素保留一个向量元素
pub const PIXELS_PER_ELEMENT: usize = 100;

#[derive(Debug, Error)]
pub enum VectorizeError {
    /// 图片格式无法识别或者数据损坏
    #[error("failed to decode image: {0}")]
    Decode(#[from] ImageError),
}

/// 从图片的原始字节计算特征向量
///
/// 像素数量少于 [`PIXELS_PER_ELEMENT`] 时返回空向量而不是错误，由调用方决定如何处理。
pub fn derive(bytes: &[u8]) -> Result<Vec<f64>, VectorizeError> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(ImageError::IoError)?
        .decode()?;
    debug!("解码图片: {}x{} {:?}", img.width(), img.height(), img.color());
    Ok(vectorize(img))
}

/// 对已解码的图片计算特征向量
pub fn vectorize(img: DynamicImage) -> Vec<f64> {
    let gray = to_luma(img);
    let pixels = gray.as_raw();
    let keep = pixels.len() / PIXELS_PER_ELEMENT;
    pixels[..keep].iter().map(|&v| v as f64 / 255.0).collect()
}

/// 转换为灰度图，透明通道直接丢弃
///
/// 使用 ITU-R 601-2 亮度公式的定点实现：
/// `L = (R * 19595 + G * 38470 + B * 7471 + 0x8000) >> 16`
fn to_luma(img: DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray,
        other => {
            let rgb = other.to_rgb8();
            GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
                let [r, g, b] = rgb.get_pixel(x, y).0;
                Luma([luma(r, g, b)])
            })
        }
    }
}

#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

#[cfg(test)]
mod tests {
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

    use super::*;

    fn encode(img: impl Into<DynamicImage>) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.into().write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn white_10x10_gives_single_one() {
        let bytes = encode(GrayImage::from_pixel(10, 10, Luma([255])));
        assert_eq!(derive(&bytes).unwrap(), vec![1.0]);
    }

    #[test]
    fn small_image_gives_empty_vector() {
        let bytes = encode(GrayImage::from_pixel(5, 5, Luma([255])));
        assert!(derive(&bytes).unwrap().is_empty());
    }

    #[test]
    fn length_is_pixel_count_over_100() {
        for (w, h) in [(33, 7), (99, 1), (100, 1), (17, 23), (64, 48)] {
            let bytes = encode(GrayImage::from_pixel(w, h, Luma([128])));
            let vector = derive(&bytes).unwrap();
            assert_eq!(vector.len(), (w * h) as usize / 100, "{w}x{h}");
            assert!(vector.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn flattens_row_major() {
        // 20x10，第一行的前两个像素分别为 0 和 1
        let img = GrayImage::from_fn(20, 10, |x, y| Luma([(y * 20 + x) as u8]));
        let vector = derive(&encode(img)).unwrap();
        assert_eq!(vector, vec![0.0, 1.0 / 255.0]);
    }

    #[test]
    fn rgb_uses_601_luma() {
        assert_eq!(luma(255, 0, 0), 76);
        assert_eq!(luma(0, 255, 0), 150);
        assert_eq!(luma(0, 0, 255), 29);
        assert_eq!(luma(255, 255, 255), 255);

        let bytes = encode(RgbImage::from_pixel(10, 10, Rgb([255, 0, 0])));
        assert_eq!(derive(&bytes).unwrap(), vec![76.0 / 255.0]);
    }

    #[test]
    fn alpha_is_ignored() {
        let bytes = encode(RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 0])));
        assert_eq!(derive(&bytes).unwrap(), vec![1.0]);
    }

    #[test]
    fn derive_is_deterministic() {
        let img = RgbImage::from_fn(40, 30, |x, y| Rgb([x as u8 * 3, y as u8 * 5, 77]));
        let bytes = encode(img);
        assert_eq!(derive(&bytes).unwrap(), derive(&bytes).unwrap());
    }

    #[test]
    fn garbage_is_decode_error() {
        let err = derive(b"definitely not an image").unwrap_err();
        assert!(matches!(err, VectorizeError::Decode(_)));
        assert!(matches!(derive(&[]), Err(VectorizeError::Decode(_))));
    }

    #[test]
    fn truncated_png_is_decode_error() {
        let bytes = encode(GrayImage::from_pixel(50, 50, Luma([10])));
        assert!(derive(&bytes[..bytes.len() / 2]).is_err());
    }
}
