use num_traits::clamp;

use crate::color_matrix::{rgb_to_yuv_basis, tv_yuv_to_full_rgb, ConversionMatrix};
use crate::errors::ConversionError;
use crate::format::{BitDepth, Standard};
use crate::pixel::{max_sample, Pixel, PixelMatrix, Sample};

/// Which way [`convert`] transforms the pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Full range RGB to YUV.
    RgbToYuv,
    /// TV range YUV to full range RGB.
    TvYuvToRgb,
}

/// Converts every pixel of `input` between RGB and YUV under `standard`.
///
/// Samples are `quant` bits wide on both sides. Results are clipped to
/// `0..=2^quant - 1` and truncated; saturation is not an error.
///
/// # Errors
/// - If any input sample does not fit into `quant` bits
/// - If `direction` is [`Direction::TvYuvToRgb`] and `quant` is neither 8 nor 10,
///   or no TV range calibration exists for `standard` at that depth
pub fn convert(
    input: &PixelMatrix,
    standard: Standard,
    direction: Direction,
    quant: u8,
) -> Result<PixelMatrix, ConversionError> {
    input.check_samples(quant)?;

    let transform = match direction {
        Direction::RgbToYuv => {
            ConversionMatrix::new(rgb_to_yuv_basis(standard), nalgebra::Vector3::zeros())
        }
        Direction::TvYuvToRgb => tv_yuv_to_full_rgb(standard, BitDepth::try_from(quant)?)?,
    };

    let max = f64::from(max_sample::<Sample>(quant));
    let mut saturated = 0usize;
    let data = input
        .data()
        .iter()
        .map(|pix| {
            let normalized = pix.map(|v| f64::from(v) / max);
            transform
                .apply(normalized)
                .map(|v| quantize(v * max, max, &mut saturated))
        })
        .collect::<Vec<Pixel>>();

    if saturated > 0 {
        log::warn!(
            "{:?} under {} saturated {} samples to 0..={}",
            direction,
            standard,
            saturated,
            max
        );
    }

    Ok(PixelMatrix {
        data,
        width: input.width(),
    })
}

#[inline(always)]
fn quantize(val: f64, max: f64, saturated: &mut usize) -> Sample {
    if !(0.0..=max).contains(&val) {
        *saturated += 1;
    }
    clamp(val, 0.0, max) as Sample
}
