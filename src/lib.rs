//! # pixelpress
//!
//! A small utility library for raster image manipulation: composite a
//! translucent overlay centered atop a base image, resize an image to
//! thumbnail dimensions with a quality-preserving progressive algorithm,
//! and detect whether an image file is animated.
//!
//! All three operations are thin orchestrations around the `image` crate —
//! no pixel codecs, color-space math, or file-format parsing of our own.
//! The substantive piece is the progressive bilinear resampler, which
//! avoids the aliasing a single large-ratio bilinear pass produces by never
//! reducing more than 2:1 per step.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`resample`] | Progressive bilinear resize: pure step planning + execution over pixel buffers |
//! | [`overlay`] | Centered translucent compositing with clamped placement |
//! | [`animation`] | Frame counting and animated-image detection (GIF, APNG, WebP) |
//! | [`codec`] | Decode by content sniffing, encode by output-extension lookup |
//!
//! # Design Decisions
//!
//! ## Pure Functions Over Buffers
//!
//! Every operation is a pure function from immutable inputs to a fresh
//! buffer. There is no builder object, no lazily-read state, and no manual
//! resource disposal: decode handles live inside [`codec`] calls and are
//! released on every exit path by ordinary scoping.
//!
//! ## Plans Separated From Pixels
//!
//! The resampler's step sequence is derived by [`resample::resample_plan`],
//! a pure function over dimension pairs. Tests assert step counts and
//! convergence on the plan alone; the pixel-pushing executor stays a thin
//! loop over bilinear passes.
//!
//! ## Stretch, Not Crop
//!
//! [`resample::resize`] always produces exactly the requested dimensions.
//! A source with a different aspect ratio is stretched, never cropped —
//! cropping policy is the caller's decision, not the resampler's.

pub mod animation;
pub mod codec;
pub mod overlay;
pub mod resample;

pub use animation::{frame_count, is_animated};
pub use codec::CodecError;
pub use overlay::{Opacity, overlay_centered};
pub use resample::{Dimensions, ResampleError, ResamplePlan, resample_plan, resize};
