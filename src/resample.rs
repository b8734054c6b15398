//! Chroma resampling between 4:4:4, 4:2:2 and 4:2:0.
//!
//! Every layout keeps one full [`Pixel`] per position. Positions that a
//! subsampled format does not carry chroma for hold zero chroma, which is
//! exactly what [`crate::codec::PixelCodec::unpack`] produces.

use crate::errors::CreationError;
use crate::format::ColorFormat;
use crate::pixel::{Pixel, PixelMatrix, Sample};

/// Averages the chroma of each sequential pixel pair into the even pixel.
///
/// The average is `a / 2 + b / 2`, floor-dividing each sample before the
/// sum. This loses one code when both samples are odd and has to be kept
/// as is for bit exact agreement with existing hardware models. Chroma of
/// the odd pixel is dropped. Luma is untouched.
#[must_use]
pub fn downsample_444_to_422(input: &PixelMatrix) -> PixelMatrix {
    let mut data = input.data().to_vec();
    for pair in data.chunks_mut(2) {
        if let [ref mut even, ref mut odd] = *pair {
            even[1] = even[1] / 2 + odd[1] / 2;
            even[2] = even[2] / 2 + odd[2] / 2;
            odd[1] = 0;
            odd[2] = 0;
        }
    }

    PixelMatrix {
        data,
        width: input.width(),
    }
}

/// Drops chroma on every odd row of `input`.
#[must_use]
pub fn downsample_422_to_420(input: &PixelMatrix) -> PixelMatrix {
    let mut data = input.data().to_vec();
    for row in data.chunks_mut(input.width()).skip(1).step_by(2) {
        for pix in row {
            pix[1] = 0;
            pix[2] = 0;
        }
    }

    PixelMatrix {
        data,
        width: input.width(),
    }
}

/// Rebuilds chroma on odd rows from the rows above and below.
///
/// Rows are `row_stride` pixels long. An odd row gets the floor average of
/// its vertical neighbours; the last row has no neighbour below and copies
/// the row above. Even rows pass through unchanged.
///
/// # Errors
/// - If `row_stride` is zero or does not divide the matrix length
pub fn upsample_420_to_422(
    input: &PixelMatrix,
    row_stride: usize,
) -> Result<PixelMatrix, CreationError> {
    if row_stride == 0 {
        return Err(CreationError::ZeroWidth);
    }
    let src = input.data();
    if src.len() % row_stride != 0 {
        return Err(CreationError::ResolutionMismatch);
    }

    let rows = src.len() / row_stride;
    let mut data = src.to_vec();
    for row in (1..rows).step_by(2) {
        for col in 0..row_stride {
            let i = row * row_stride + col;
            let above = src[i - row_stride];
            let [u, v] = if row + 1 < rows {
                let below = src[i + row_stride];
                [average(above[1], below[1]), average(above[2], below[2])]
            } else {
                [above[1], above[2]]
            };
            data[i][1] = u;
            data[i][2] = v;
        }
    }

    Ok(PixelMatrix {
        data,
        width: input.width(),
    })
}

/// Applies the chroma mask of `format` to a full 4:4:4 matrix.
///
/// Chroma is zeroed on odd sequential pixels for 4:2:2, and additionally
/// on odd rows for 4:2:0. No averaging takes place.
#[must_use]
pub fn subsample(input: &PixelMatrix, format: ColorFormat) -> PixelMatrix {
    let width = input.width();
    let data = input
        .data()
        .iter()
        .enumerate()
        .map(|(i, &pix)| mask(pix, format.has_chroma(i, i / width)))
        .collect();

    PixelMatrix { data, width }
}

#[inline(always)]
const fn mask(pix: Pixel, keep_chroma: bool) -> Pixel {
    if keep_chroma {
        pix
    } else {
        [pix[0], 0, 0]
    }
}

#[inline(always)]
fn average(a: Sample, b: Sample) -> Sample {
    ((u32::from(a) + u32::from(b)) / 2) as Sample
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chroma_ramp(values: &[Sample], width: usize) -> PixelMatrix {
        PixelMatrix::new(values.iter().map(|&c| [7, c, c + 1]).collect(), width).unwrap()
    }

    #[test]
    fn downsample_floors_each_sample() {
        let out = downsample_444_to_422(&chroma_ramp(&[10, 20, 30, 40], 4));
        assert_eq!(out.data()[0], [7, 15, 15]);
        assert_eq!(out.data()[1], [7, 0, 0]);
        assert_eq!(out.data()[2], [7, 35, 35]);
        assert_eq!(out.data()[3], [7, 0, 0]);
    }

    #[test]
    fn downsample_bias_on_odd_samples() {
        // (11 + 13) / 2 would be 12; floor-then-sum gives 11.
        let out = downsample_444_to_422(&chroma_ramp(&[11, 13], 2));
        assert_eq!(out.data()[0][1], 11);
    }

    #[test]
    fn downsample_keeps_trailing_pixel() {
        let out = downsample_444_to_422(&chroma_ramp(&[10, 20, 30], 3));
        assert_eq!(out.data()[2], [7, 30, 31]);
    }

    #[test]
    fn upsample_averages_neighbours() {
        // Three rows of two pixels; the middle row is rebuilt.
        let input = chroma_ramp(&[10, 20, 0, 0, 30, 41], 2);
        let out = upsample_420_to_422(&input, 2).unwrap();
        assert_eq!(out.data()[2], [7, 20, 21]);
        assert_eq!(out.data()[3], [7, 30, 31]);
        assert_eq!(&out.data()[..2], &input.data()[..2]);
        assert_eq!(&out.data()[4..], &input.data()[4..]);
    }

    #[test]
    fn upsample_copies_into_last_row() {
        let input = chroma_ramp(&[10, 20, 0, 0], 2);
        let out = upsample_420_to_422(&input, 2).unwrap();
        assert_eq!(out.data()[2], [7, 10, 11]);
        assert_eq!(out.data()[3], [7, 20, 21]);
    }

    #[test]
    fn upsample_rejects_bad_stride() {
        let input = chroma_ramp(&[1, 2, 3, 4, 5, 6], 6);
        assert_eq!(
            upsample_420_to_422(&input, 0),
            Err(CreationError::ZeroWidth)
        );
        assert_eq!(
            upsample_420_to_422(&input, 4),
            Err(CreationError::ResolutionMismatch)
        );
    }

    #[test]
    fn upsample_does_not_overflow() {
        let input = PixelMatrix::new(vec![[0, 1023, 1023], [0, 0, 0], [0, 1023, 1023]], 1).unwrap();
        let out = upsample_420_to_422(&input, 1).unwrap();
        assert_eq!(out.data()[1], [0, 1023, 1023]);
    }

    #[test]
    fn subsample_masks() {
        let input = PixelMatrix::new(vec![[1, 2, 3]; 8], 4).unwrap();
        let yuv422 = subsample(&input, ColorFormat::Yuv422);
        let yuv420 = subsample(&input, ColorFormat::Yuv420);
        for (i, pix) in yuv422.data().iter().enumerate() {
            let expected = if i % 2 == 0 { [1, 2, 3] } else { [1, 0, 0] };
            assert_eq!(*pix, expected);
        }
        assert_eq!(yuv420.data()[0], [1, 2, 3]);
        assert_eq!(yuv420.data()[4], [1, 0, 0]);
        assert_eq!(subsample(&input, ColorFormat::Yuv444), input);
        assert_eq!(downsample_422_to_420(&yuv422), yuv420);
    }
}
