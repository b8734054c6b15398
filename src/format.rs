use std::fmt;

use av_data::pixel::MatrixCoefficients;

use crate::errors::{CodecError, ConversionError};

/// Layout of the three components of every pixel.
///
/// Component order is fixed: index 0, 1 and 2 are R, G, B for [`ColorFormat::Rgb`]
/// and Y, U, V for every YUV format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    Rgb,
    Yuv444,
    /// Chroma is only carried by the even pixel of each horizontal pair.
    Yuv422,
    /// As [`ColorFormat::Yuv422`], and chroma is dropped on odd lines.
    Yuv420,
}

impl ColorFormat {
    #[must_use]
    pub const fn is_subsampled(self) -> bool {
        matches!(self, Self::Yuv422 | Self::Yuv420)
    }

    /// Whether pixel `index` (sequential, row-major) on line `line` carries chroma.
    #[must_use]
    pub const fn has_chroma(self, index: usize, line: usize) -> bool {
        match self {
            Self::Rgb | Self::Yuv444 => true,
            Self::Yuv422 => index % 2 == 0,
            Self::Yuv420 => index % 2 == 0 && line % 2 == 0,
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Self::Rgb => "RGB",
            Self::Yuv444 => "YUV 4:4:4",
            Self::Yuv422 => "YUV 4:2:2",
            Self::Yuv420 => "YUV 4:2:0",
        })
    }
}

/// Television standard selecting the RGB/YUV basis and the TV range calibration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Standard {
    /// ITU-R BT.601-7, standard definition
    Bt601,
    /// ITU-R BT.709-5, high definition
    Bt709,
    /// ITU-R BT.2020-1, ultra high definition
    Bt2020,
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Self::Bt601 => "BT.601",
            Self::Bt709 => "BT.709",
            Self::Bt2020 => "BT.2020",
        })
    }
}

impl From<Standard> for MatrixCoefficients {
    fn from(standard: Standard) -> Self {
        match standard {
            Standard::Bt601 => MatrixCoefficients::ST170M,
            Standard::Bt709 => MatrixCoefficients::BT709,
            Standard::Bt2020 => MatrixCoefficients::BT2020NonConstantLuminance,
        }
    }
}

impl TryFrom<MatrixCoefficients> for Standard {
    type Error = ConversionError;

    fn try_from(matrix: MatrixCoefficients) -> Result<Self, Self::Error> {
        match matrix {
            MatrixCoefficients::ST170M | MatrixCoefficients::BT470BG => Ok(Self::Bt601),
            MatrixCoefficients::BT709 => Ok(Self::Bt709),
            MatrixCoefficients::BT2020NonConstantLuminance
            | MatrixCoefficients::BT2020ConstantLuminance => Ok(Self::Bt2020),
            _ => Err(ConversionError::UnsupportedMatrixCoefficients),
        }
    }
}

/// Signal depth used to pick the TV range calibration levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitDepth {
    Eight,
    Ten,
}

impl BitDepth {
    #[must_use]
    pub const fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Ten => 10,
        }
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = ConversionError;

    fn try_from(quant: u8) -> Result<Self, Self::Error> {
        match quant {
            8 => Ok(Self::Eight),
            10 => Ok(Self::Ten),
            other => Err(ConversionError::UnsupportedQuantization(other)),
        }
    }
}

impl fmt::Display for BitDepth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}bit", self.bits())
    }
}

/// Number of pixels carried by one group of bus words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneWidth {
    Two,
    Four,
}

impl LaneWidth {
    /// Size in bytes of a single bus word.
    pub const WORD_BYTES: usize = 8;

    #[must_use]
    pub const fn pixels(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Four => 4,
        }
    }

    /// Bus words emitted per group of [`LaneWidth::pixels`] pixels.
    #[must_use]
    pub const fn words(self) -> usize {
        self.pixels() / 2
    }

    #[must_use]
    pub const fn group_bytes(self) -> usize {
        self.words() * Self::WORD_BYTES
    }
}

impl TryFrom<usize> for LaneWidth {
    type Error = CodecError;

    fn try_from(pixels: usize) -> Result<Self, Self::Error> {
        match pixels {
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(CodecError::UnsupportedLaneWidth(other)),
        }
    }
}

impl fmt::Display for LaneWidth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} pixels/clock", self.pixels())
    }
}
