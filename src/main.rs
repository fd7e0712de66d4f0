use clap::{Parser, Subcommand};
use pixelpress::{animation, codec, overlay, resample};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pixelpress")]
#[command(about = "Overlay, thumbnail, and inspect raster images")]
#[command(long_about = "\
Overlay, thumbnail, and inspect raster images

Input files are decoded by sniffing their bytes, so a mislabeled extension
does not matter. Output files are encoded in the format named by the output
path's extension (.png, .jpg, .gif, .webp, .tif, .bmp).

Thumbnails use progressive bilinear resampling: reductions beyond 2:1 are
performed as repeated halvings so the result does not alias. Output is
stretched to the exact requested dimensions; no aspect-ratio crop is done.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Composite a translucent overlay centered on a base image
    Overlay {
        /// Base image
        input: PathBuf,
        /// Image to composite on top
        overlay: PathBuf,
        /// Output image path (extension selects the format)
        output: PathBuf,
        /// Overlay opacity, 0.0 (invisible) to 1.0 (opaque)
        #[arg(long, default_value_t = 0.8)]
        opacity: f32,
    },
    /// Resize an image to exact thumbnail dimensions
    Thumbnail {
        /// Source image
        input: PathBuf,
        /// Output image path (extension selects the format)
        output: PathBuf,
        /// Target width in pixels
        #[arg(long)]
        width: u32,
        /// Target height in pixels
        #[arg(long)]
        height: u32,
    },
    /// Report how many frames an image file contains
    Frames {
        /// Image to inspect
        input: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Overlay {
            input,
            overlay: overlay_path,
            output,
            opacity,
        } => {
            println!("Animated input: {}", animation::is_animated(&input));
            let base = codec::load(&input)?.to_rgba8();
            let mark = codec::load(&overlay_path)?.to_rgba8();
            let composited =
                overlay::overlay_centered(&base, &mark, overlay::Opacity::new(opacity));
            codec::save(&image::DynamicImage::ImageRgba8(composited), &output)?;
            println!("Wrote {}", output.display());
        }
        Command::Thumbnail {
            input,
            output,
            width,
            height,
        } => {
            let source = codec::load(&input)?.to_rgba8();
            let thumb = resample::resize(&source, width, height)?;
            codec::save(&image::DynamicImage::ImageRgba8(thumb), &output)?;
            println!("Wrote {} ({}x{})", output.display(), width, height);
        }
        Command::Frames { input } => {
            let frames = animation::frame_count(&input)?;
            println!("Frames: {}", frames);
            println!("Animated: {}", frames > 1);
        }
    }

    Ok(())
}
