//! Decode/encode boundary around the `image` crate.
//!
//! Inputs are sniffed by content (the on-disk bytes decide the decoder, not
//! the filename); outputs are encoded in the format named by the output
//! file's extension, with a hard error for extensions no compiled-in encoder
//! claims. All pixel work elsewhere in the crate happens between these two
//! calls.

use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown or unwritable file extension: {0}")]
    UnsupportedExtension(String),
    #[error("codec error: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode an image file into memory, sniffing the format from its bytes.
pub fn load(path: &Path) -> Result<DynamicImage, CodecError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    Ok(image)
}

/// Resolve the encode format for an output path from its extension.
pub fn format_for_output(path: &Path) -> Result<ImageFormat, CodecError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    ImageFormat::from_extension(extension)
        .filter(|format| format.writing_enabled())
        .ok_or_else(|| CodecError::UnsupportedExtension(extension.to_string()))
}

/// Encode `image` to `path` in the format named by the path's extension.
///
/// JPEG carries no alpha channel, so alpha-bearing buffers are flattened to
/// RGB first; every other format receives the buffer as-is.
pub fn save(image: &DynamicImage, path: &Path) -> Result<(), CodecError> {
    let format = format_for_output(path)?;
    if format == ImageFormat::Jpeg && image.color().has_alpha() {
        DynamicImage::ImageRgb8(image.to_rgb8()).save_with_format(path, format)?;
    } else {
        image.save_with_format(path, format)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        })
    }

    #[test]
    fn format_for_output_known_extensions() {
        assert_eq!(
            format_for_output(Path::new("out.png")).unwrap(),
            ImageFormat::Png
        );
        assert_eq!(
            format_for_output(Path::new("out.JPG")).unwrap(),
            ImageFormat::Jpeg
        );
        assert_eq!(
            format_for_output(Path::new("dir/out.gif")).unwrap(),
            ImageFormat::Gif
        );
    }

    #[test]
    fn format_for_output_rejects_unknown_extension() {
        let err = format_for_output(Path::new("out.xyz")).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedExtension(ext) if ext == "xyz"));
    }

    #[test]
    fn format_for_output_rejects_missing_extension() {
        assert!(format_for_output(Path::new("no-extension")).is_err());
    }

    #[test]
    fn save_and_load_png_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("image.png");
        let original = gradient_rgba(64, 48);

        save(&DynamicImage::ImageRgba8(original.clone()), &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!((loaded.width(), loaded.height()), (64, 48));
        // PNG is lossless: pixel content survives the roundtrip.
        assert_eq!(loaded.to_rgba8(), original);
    }

    #[test]
    fn save_alpha_buffer_as_jpeg_flattens() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("image.jpg");

        save(&DynamicImage::ImageRgba8(gradient_rgba(32, 32)), &path).unwrap();
        let loaded = load(&path).unwrap();
        assert!(!loaded.color().has_alpha());
        assert_eq!((loaded.width(), loaded.height()), (32, 32));
    }

    #[test]
    fn load_sniffs_content_not_extension() {
        // PNG bytes behind a .jpg name still decode.
        let tmp = tempfile::TempDir::new().unwrap();
        let png_path = tmp.path().join("real.png");
        save(&DynamicImage::ImageRgba8(gradient_rgba(16, 16)), &png_path).unwrap();

        let lying_path = tmp.path().join("mislabeled.jpg");
        std::fs::copy(&png_path, &lying_path).unwrap();

        let loaded = load(&lying_path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (16, 16));
    }

    #[test]
    fn load_nonexistent_file_errors() {
        let err = load(Path::new("/nonexistent/image.png")).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn load_non_image_bytes_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("garbage.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(load(&path).is_err());
    }
}
