//! Progressive bilinear resampling.
//!
//! A single bilinear pass looks fine until the reduction ratio passes 2:1 —
//! beyond that the filter only reads the four nearest source pixels per
//! output pixel, under-samples the rest, and the result aliases. The fix is
//! to never ask the filter for more than a 2:1 reduction per step: halve the
//! working dimensions repeatedly until within 2:1 of the target, then do one
//! exact final pass.
//!
//! The module is split the same way as the rest of the crate's pixel work:
//!
//! - **Plan**: [`resample_plan`] is pure dimension math. Given source and
//!   target sizes it returns the exact sequence of bilinear steps, so tests
//!   can assert step counts and monotonic convergence without touching a
//!   single pixel.
//! - **Execution**: [`resize`] walks the plan with
//!   `image::imageops::resize` (`FilterType::Triangle`, i.e. bilinear),
//!   holding at most two buffers alive at any point.
//!
//! No aspect-ratio correction is performed: the output is stretched to
//! exactly the requested dimensions regardless of the source's shape. That
//! is intentional; cropping policy belongs to the caller.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResampleError {
    /// Target dimensions must both be positive. Dimensions are `u32`, so
    /// negative values are unrepresentable; zero is rejected here.
    #[error("target dimensions must be positive, got {width}x{height}")]
    InvalidTarget { width: u32, height: u32 },
    /// The requested buffer either overflows the addressable byte count or
    /// the allocator refused it.
    #[error("cannot allocate a {width}x{height} pixel buffer")]
    Allocation { width: u32, height: u32 },
}

/// A width/height pair. Plans are sequences of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The resolved strategy for one resize request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResamplePlan {
    /// Source already matches the target: copy pixels, no filter.
    Copy,
    /// Reduction is within 2:1 on both axes (all upscales included): one
    /// bilinear pass straight to the target.
    Direct,
    /// Reduction exceeds 2:1 on at least one axis: the listed stages are
    /// performed in order, each a bilinear pass from the previous stage's
    /// buffer. The last stage is always exactly the target.
    Progressive(Vec<Dimensions>),
}

/// Derive the bilinear step sequence for resizing `source` to `target`.
///
/// Three cases, evaluated in order:
///
/// 1. dimensions already equal → [`ResamplePlan::Copy`]
/// 2. `target * 2 >= source` on both axes → [`ResamplePlan::Direct`]
/// 3. otherwise → [`ResamplePlan::Progressive`]
///
/// The progressive start size is the smallest `target * 2^k` (same `k` for
/// both axes) whose next doubling meets or exceeds the source; the first
/// stage jumps to half of it in one pass. That first jump may itself exceed
/// 2:1 — it is the one accepted large step, taken first while the source
/// still has the most detail to sample from. After that the stages halve in
/// lockstep, clamping each axis to the target rather than undershooting, and
/// a final corrective stage lands on the exact target.
///
/// Both axes share the same halving schedule. When the per-axis ratios
/// differ, one axis over- or under-shoots relative to the other until the
/// final stage corrects it.
pub fn resample_plan(source: Dimensions, target: Dimensions) -> ResamplePlan {
    if source == target {
        return ResamplePlan::Copy;
    }

    // u64 throughout: doubling the start size can exceed u32 before the
    // derivation loop exits, even though every emitted stage fits.
    let (src_w, src_h) = (u64::from(source.width), u64::from(source.height));
    let (tgt_w, tgt_h) = (u64::from(target.width), u64::from(target.height));

    if tgt_w * 2 >= src_w && tgt_h * 2 >= src_h {
        return ResamplePlan::Direct;
    }

    let (mut start_w, mut start_h) = (tgt_w, tgt_h);
    while start_w < src_w && start_h < src_h {
        start_w *= 2;
        start_h *= 2;
    }

    // Clamp to 1 so a degenerate axis (target upscaled past the source while
    // the other axis shrinks) never produces a zero-sized stage.
    let mut cur_w = (start_w / 2).max(1);
    let mut cur_h = (start_h / 2).max(1);

    let mut stages = vec![Dimensions::new(cur_w as u32, cur_h as u32)];

    while cur_w >= tgt_w * 2 && cur_h >= tgt_h * 2 {
        cur_w = (cur_w / 2).max(tgt_w);
        cur_h = (cur_h / 2).max(tgt_h);
        stages.push(Dimensions::new(cur_w as u32, cur_h as u32));
    }

    // Final corrective stage: the loop's clamping can leave a residual
    // sub-2:1 ratio that still has to be resolved to the exact target.
    stages.push(target);
    ResamplePlan::Progressive(stages)
}

/// Resize `source` to exactly `target_width x target_height`.
///
/// Pure in-memory transformation: no I/O, no shared state, and the returned
/// buffer always has exactly the requested dimensions and the source's pixel
/// format. Fails with [`ResampleError::InvalidTarget`] before allocating
/// anything if either target dimension is zero.
pub fn resize<P>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    target_width: u32,
    target_height: u32,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, ResampleError>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    if target_width == 0 || target_height == 0 {
        return Err(ResampleError::InvalidTarget {
            width: target_width,
            height: target_height,
        });
    }

    let src_dims = Dimensions::new(source.width(), source.height());
    let target = Dimensions::new(target_width, target_height);

    match resample_plan(src_dims, target) {
        ResamplePlan::Copy => {
            ensure_allocatable::<P>(target)?;
            Ok(source.clone())
        }
        ResamplePlan::Direct => bilinear_step(source, target),
        ResamplePlan::Progressive(stages) => {
            let mut current = bilinear_step(source, stages[0])?;
            for &stage in &stages[1..] {
                // Reassignment drops the previous intermediate as soon as
                // the next one exists; only two buffers are ever alive.
                current = bilinear_step(&current, stage)?;
            }
            Ok(current)
        }
    }
}

/// One bilinear pass from `source` to a freshly allocated buffer at `dims`.
fn bilinear_step<P>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    dims: Dimensions,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, ResampleError>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    ensure_allocatable::<P>(dims)?;
    Ok(imageops::resize(
        source,
        dims.width,
        dims.height,
        FilterType::Triangle,
    ))
}

/// Verify a `dims`-sized buffer of `P` pixels is allocatable right now.
///
/// `imageops::resize` allocates internally and aborts the process on
/// failure; checking the byte count and reserving up front turns an absurd
/// target into a recoverable [`ResampleError::Allocation`] instead.
fn ensure_allocatable<P: Pixel>(dims: Dimensions) -> Result<(), ResampleError> {
    let err = ResampleError::Allocation {
        width: dims.width,
        height: dims.height,
    };
    let bytes = u64::from(dims.width)
        .checked_mul(u64::from(dims.height))
        .and_then(|n| n.checked_mul(u64::from(P::CHANNEL_COUNT)))
        .and_then(|n| n.checked_mul(std::mem::size_of::<P::Subpixel>() as u64))
        .and_then(|n| usize::try_from(n).ok())
        .ok_or(err)?;
    let mut probe: Vec<u8> = Vec::new();
    probe.try_reserve_exact(bytes).map_err(|_| err)?;
    Ok(())
}
