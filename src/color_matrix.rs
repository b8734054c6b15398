//! RGB <-> YUV basis matrices and the affine matrix that takes TV range
//! ("limited range") YUV straight to full range RGB.
//!
//! The affine matrix is returned in scale-and-shift form: for a raw
//! `(Y', U', V')` triple in TV range,
//!
//! ```text
//! rgb = M[:, 0..3] * yuv + M[:, 3]
//! ```
//!
//! so the range expansion costs nothing at conversion time.


use nalgebra::{Matrix3, Matrix3x4, Vector3};

use crate::errors::ConversionError;
use crate::format::{BitDepth, Standard};

/// Components smaller than this are considered inversion noise.
const SHAVE_EPSILON: f64 = 1e-8;

/// Luma weights `(kr, kg, kb)` and the Cb/Cr normalization divisors.
const fn coefficients(standard: Standard) -> ([f64; 3], f64, f64) {
    match standard {
        // ITU-R BT.601-7, §2.5.1 and §2.5.2
        Standard::Bt601 => ([0.299, 0.587, 0.114], 1.772, 1.402),
        // ITU-R BT.709-5, item 3.3
        Standard::Bt709 => ([0.2126, 0.7152, 0.0722], 1.8556, 1.5748),
        // ITU-R BT.2020-1, item 3.3
        Standard::Bt2020 => ([0.2627, 0.6780, 0.0593], 1.8814, 1.4746),
    }
}

/// Returns the full range RGB to YUV matrix for `standard`.
///
/// Rows are Y, B - Y and R - Y, with the color difference rows rescaled so
/// that U and V fall into `-0.5..=0.5` for RGB in `0.0..=1.0`.
#[must_use]
pub fn rgb_to_yuv_basis(standard: Standard) -> Matrix3<f64> {
    let ([kr, kg, kb], cb_norm, cr_norm) = coefficients(standard);
    let mut r2y = Matrix3::from_row_slice(&[
        kr,
        kg,
        kb,
        -kr,
        -kg,
        1.0 - kb,
        1.0 - kr,
        -kg,
        -kb,
    ]);
    r2y.row_mut(1).unscale_mut(cb_norm);
    r2y.row_mut(2).unscale_mut(cr_norm);
    r2y
}

/// Returns the inverse of [`rgb_to_yuv_basis`] with inversion noise removed.
///
/// # Errors
/// - If the basis is singular, which none of the supported standards are
pub fn yuv_to_rgb_basis(standard: Standard) -> Result<Matrix3<f64>, ConversionError> {
    rgb_to_yuv_basis(standard)
        .try_inverse()
        .map(shave_epsilons)
        .ok_or(ConversionError::SingularMatrix)
}

/// Zeroes every component whose magnitude is below `1e-8`.
#[must_use]
pub fn shave_epsilons(m: Matrix3<f64>) -> Matrix3<f64> {
    m.map(|v| if v.abs() < SHAVE_EPSILON { 0.0 } else { v })
}

/// TV range levels, as fractions of the full scale code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    pub black_y: f64,
    pub white_y: f64,
    pub chroma_min: f64,
    pub chroma_max: f64,
    pub achromatic: f64,
}

impl Calibration {
    #[must_use]
    pub fn luma_range(&self) -> f64 {
        self.white_y - self.black_y
    }

    #[must_use]
    pub fn chroma_range(&self) -> f64 {
        self.chroma_max - self.chroma_min
    }
}

/// Returns the TV range calibration for `standard` at `depth`.
///
/// # Errors
/// - If `depth` is 10 bit and `standard` is BT.601, which only defines 8 bit levels
pub fn calibrate(standard: Standard, depth: BitDepth) -> Result<Calibration, ConversionError> {
    match (standard, depth) {
        // BT.709-5 section 5 item 5.6; BT.601-7 table 3 and 4 item 8.
        // Chroma levels follow mplayer2/VDPAU/CoreVideo rather than VLC.
        (_, BitDepth::Eight) => Ok(Calibration {
            black_y: 16. / 255.,
            white_y: 235. / 255.,
            chroma_min: 16. / 255.,
            chroma_max: 240. / 255.,
            achromatic: 128. / 255.,
        }),
        (Standard::Bt709 | Standard::Bt2020, BitDepth::Ten) => Ok(Calibration {
            black_y: 64. / 1023.,
            white_y: 940. / 1023.,
            chroma_min: 64. / 1023.,
            chroma_max: 960. / 1023.,
            achromatic: 512. / 1023.,
        }),
        (Standard::Bt601, BitDepth::Ten) => {
            Err(ConversionError::UnsupportedCalibration { standard, depth })
        }
    }
}

/// A 3x4 affine color transform: three scale columns and one shift column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionMatrix(pub(crate) Matrix3x4<f64>);

impl ConversionMatrix {
    #[must_use]
    pub fn new(scale: Matrix3<f64>, shift: Vector3<f64>) -> Self {
        Self(Matrix3x4::from_fn(|r, c| {
            if c < 3 {
                scale[(r, c)]
            } else {
                shift[r]
            }
        }))
    }

    #[must_use]
    pub fn scale(&self) -> Matrix3<f64> {
        Matrix3::from_fn(|r, c| self.0[(r, c)])
    }

    #[must_use]
    pub fn shift(&self) -> Vector3<f64> {
        Vector3::new(self.0[(0, 3)], self.0[(1, 3)], self.0[(2, 3)])
    }

    #[must_use]
    pub const fn matrix(&self) -> &Matrix3x4<f64> {
        &self.0
    }

    /// Computes `scale * input + shift`.
    #[must_use]
    #[inline]
    pub fn apply(&self, input: [f64; 3]) -> [f64; 3] {
        let m = &self.0;
        let mut out = [0.0; 3];
        for (r, o) in out.iter_mut().enumerate() {
            *o = m[(r, 0)].mul_add(
                input[0],
                m[(r, 1)].mul_add(input[1], m[(r, 2)].mul_add(input[2], m[(r, 3)])),
            );
        }
        out
    }
}

/// Produces the matrix taking TV range YUV of `standard` at `depth` to full
/// range RGB.
///
/// # Errors
/// - If no calibration exists for `standard` at `depth`
pub fn tv_yuv_to_full_rgb(
    standard: Standard,
    depth: BitDepth,
) -> Result<ConversionMatrix, ConversionError> {
    let cal = calibrate(standard, depth)?;
    let mut scale = yuv_to_rgb_basis(standard)?;

    // Y = (Y' - black) / luma_range, U = (U' - achromatic) / chroma_range,
    // likewise for V.
    scale.column_mut(0).unscale_mut(cal.luma_range());
    scale.column_mut(1).unscale_mut(cal.chroma_range());
    scale.column_mut(2).unscale_mut(cal.chroma_range());

    let shift = -(scale.column(0) * cal.black_y)
        - scale.column(1) * cal.achromatic
        - scale.column(2) * cal.achromatic;

    let matrix = ConversionMatrix::new(scale, shift);
    log::trace!("{} {} TV YUV -> full RGB: {}", standard, depth, matrix.0);
    Ok(matrix)
}
