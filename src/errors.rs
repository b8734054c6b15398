use thiserror::Error;

use crate::format::{BitDepth, ColorFormat, Standard};

/// Error type for when building a [`PixelMatrix`] or validating its samples fails.
///
/// # Example
/// ```
/// use vidio::{CreationError, PixelMatrix};
///
/// // 10 pixels cannot be split into rows of 4
/// let result = PixelMatrix::new(vec![[0u16; 3]; 10], 4);
///
/// assert_eq!(result.unwrap_err(), CreationError::ResolutionMismatch);
/// ```
///
/// [`PixelMatrix`]: crate::PixelMatrix
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CreationError {
    /// There is a mismatch between the supplied data and the supplied width.
    ///
    /// Generally, data.len() should be a multiple of width.
    #[error("Data length is not a multiple of the specified width.")]
    ResolutionMismatch,
    #[error("Width must be greater than zero.")]
    ZeroWidth,
    #[error("Quantization of {0} bits is not supported; valid are 1 to 10 bits.")]
    UnsupportedQuantization(u8),
    /// A sample does not fit into the requested number of bits.
    #[error("Sample {value} at pixel {index} does not fit into {quant} bits.")]
    SampleOverflow { index: usize, value: u16, quant: u8 },
}

/// Error type for when converting data from one color space to another fails.
///
/// Saturation of out-of-range results is not an error; the converter clamps.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("No TV range calibration is defined for {standard} at {depth}.")]
    UnsupportedCalibration { standard: Standard, depth: BitDepth },
    #[error("Cannot pick a calibration for {0}-bit samples; valid are 8 and 10 bits.")]
    UnsupportedQuantization(u8),
    #[error("Cannot convert between YUV and RGB using these matrix coefficients.")]
    UnsupportedMatrixCoefficients,
    #[error("Conversion from {from} to {to} is not supported.")]
    UnsupportedConversion { from: ColorFormat, to: ColorFormat },
    #[error("The RGB to YUV basis cannot be inverted.")]
    SingularMatrix,
    #[error(transparent)]
    Creation(#[from] CreationError),
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Error type for when packing or unpacking transfer units fails.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("Lane width {0} is not supported; valid are 2 and 4.")]
    UnsupportedLaneWidth(usize),
    #[error("Width {width} is not a non-zero multiple of the lane width {lane_width}.")]
    UnalignedWidth { width: usize, lane_width: usize },
    /// A transfer unit does not carry exactly one scan line of packed words.
    #[error("Transfer unit for line {line} has {actual} bytes, expected {expected}.")]
    UnitLength {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Creation(#[from] CreationError),
}
