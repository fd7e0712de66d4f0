//! Multi-frame inspection.
//!
//! Answers one question about a file: does it hold more than one frame?
//! GIF, animated PNG, and animated WebP are recognized; every other
//! decodable format is single-frame by construction. Frames are counted,
//! never extracted or re-encoded.

use crate::codec::{self, CodecError};
use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{AnimationDecoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Whether the file holds more than one frame.
///
/// Unreadable or undecodable files report `false` — callers asking "should
/// I treat this as animated?" get a usable answer either way. Use
/// [`frame_count`] when the failure itself matters.
pub fn is_animated(path: &Path) -> bool {
    frame_count(path).is_ok_and(|frames| frames > 1)
}

/// Count the frames in an image file.
///
/// Static formats always report 1. The animated containers are scanned to
/// the end, so the count is exact rather than a "more than one" flag.
pub fn frame_count(path: &Path) -> Result<u32, CodecError> {
    let format = ImageReader::open(path)?.with_guessed_format()?.format();

    let frames = match format {
        Some(ImageFormat::Gif) => {
            let decoder = GifDecoder::new(reader(path)?)?;
            decoder.into_frames().collect_frames()?.len()
        }
        Some(ImageFormat::Png) => {
            let decoder = PngDecoder::new(reader(path)?)?;
            if decoder.is_apng()? {
                decoder.apng()?.into_frames().collect_frames()?.len()
            } else {
                1
            }
        }
        Some(ImageFormat::WebP) => {
            let decoder = WebPDecoder::new(reader(path)?)?;
            if decoder.has_animation() {
                decoder.into_frames().collect_frames()?.len()
            } else {
                1
            }
        }
        // Single-frame format, or bytes no decoder claims. Decoding settles
        // which: a valid image counts 1, anything else is the decode error.
        _ => {
            codec::load(path)?;
            1
        }
    };

    Ok(frames as u32)
}

fn reader(path: &Path) -> Result<BufReader<File>, CodecError> {
    Ok(BufReader::new(File::open(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::gif::GifEncoder;
    use image::{Frame, Rgba, RgbaImage};

    fn solid(rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(16, 16, Rgba(rgba))
    }

    fn write_gif(path: &Path, frames: Vec<RgbaImage>) {
        let file = std::fs::File::create(path).unwrap();
        let mut encoder = GifEncoder::new(file);
        encoder
            .encode_frames(frames.into_iter().map(Frame::new))
            .unwrap();
    }

    #[test]
    fn static_png_is_not_animated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("still.png");
        solid([10, 20, 30, 255]).save(&path).unwrap();

        assert!(!is_animated(&path));
        assert_eq!(frame_count(&path).unwrap(), 1);
    }

    #[test]
    fn single_frame_gif_is_not_animated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("single.gif");
        write_gif(&path, vec![solid([255, 0, 0, 255])]);

        assert!(!is_animated(&path));
        assert_eq!(frame_count(&path).unwrap(), 1);
    }

    #[test]
    fn multi_frame_gif_is_animated() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("anim.gif");
        write_gif(
            &path,
            vec![
                solid([255, 0, 0, 255]),
                solid([0, 255, 0, 255]),
                solid([0, 0, 255, 255]),
            ],
        );

        assert!(is_animated(&path));
        assert_eq!(frame_count(&path).unwrap(), 3);
    }

    #[test]
    fn animated_gif_detected_behind_wrong_extension() {
        // Detection follows the bytes, not the filename.
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("anim.png");
        write_gif(&path, vec![solid([255, 0, 0, 255]), solid([0, 255, 0, 255])]);

        assert!(is_animated(&path));
        assert_eq!(frame_count(&path).unwrap(), 2);
    }

    #[test]
    fn unreadable_file_reports_not_animated() {
        assert!(!is_animated(Path::new("/nonexistent/image.gif")));
    }

    #[test]
    fn unreadable_file_fails_frame_count() {
        assert!(frame_count(Path::new("/nonexistent/image.gif")).is_err());
    }

    #[test]
    fn garbage_bytes_report_not_animated_but_fail_frame_count() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("garbage.gif");
        std::fs::write(&path, b"not a gif at all").unwrap();

        assert!(!is_animated(&path));
        assert!(frame_count(&path).is_err());
    }
}
