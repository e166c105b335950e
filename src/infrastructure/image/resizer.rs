use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageFormat};
use strum::{Display, EnumString};
use thiserror::Error;
use tracing::info;

/// 出力JPEGの品質
pub const JPEG_QUALITY: u8 = 80;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("source image has no pixels")]
    EmptySource,

    #[error("invalid target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// 入力画像の形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ImageKind {
    Gif,
    Png,
    #[strum(to_string = "jpeg", serialize = "jpg")]
    Jpeg,
}

impl ImageKind {
    /// gif と png 以外はすべて JPEG として扱う
    pub fn from_extension(ext: &str) -> Self {
        ext.parse().unwrap_or(ImageKind::Jpeg)
    }

    fn format(self) -> ImageFormat {
        match self {
            ImageKind::Gif => ImageFormat::Gif,
            ImageKind::Png => ImageFormat::Png,
            ImageKind::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// 縦横比を保ったまま `box_w` x `box_h` に収まる大きさ
pub fn fit_dimensions(orig_w: u32, orig_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    let ratio = orig_w as f64 / orig_h as f64;
    let (mut width, mut height) = (box_w as f64, box_h as f64);

    if width / height > ratio {
        width = height * ratio;
    } else {
        height = width / ratio;
    }

    ((width as u32).max(1), (height as u32).max(1))
}

/// 画像を縮小してJPEG (品質80) で保存する
pub fn img_resize(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    width: u32,
    height: u32,
    format: &str,
) -> Result<(), ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidSize { width, height });
    }

    let kind = ImageKind::from_extension(format);
    let reader = BufReader::new(File::open(source.as_ref())?);
    let original = image::load(reader, kind.format())?;

    let (orig_w, orig_h) = original.dimensions();
    if orig_w == 0 || orig_h == 0 {
        return Err(ResizeError::EmptySource);
    }

    let (new_w, new_h) = fit_dimensions(orig_w, orig_h, width, height);
    let resized = original
        .resize_exact(new_w, new_h, FilterType::Triangle)
        .to_rgb8();

    let mut out = BufWriter::new(File::create(dest.as_ref())?);
    JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY).encode_image(&resized)?;
    out.flush()?;

    info!(
        source = %source.as_ref().display(),
        dest = %dest.as_ref().display(),
        %kind,
        from = ?(orig_w, orig_h),
        to = ?(new_w, new_h),
        "画像を縮小しました"
    );
    Ok(())
}
