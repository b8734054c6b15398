//! Packing of pixel matrices into bus transfer units and back.
//!
//! Each scan line becomes one [`TransferUnit`]. A line is walked in groups
//! of [`LaneWidth::pixels`] pixels, and every group is packed into one
//! (two pixels) or two (four pixels) 64-bit little endian words. Samples
//! sit back to back, `quant` bits each, starting at the LSB of the first
//! word, in the order given by the layout of the color format:
//!
//! | format         | lane | fields, LSB first                             |
//! |----------------|------|-----------------------------------------------|
//! | RGB, 4:4:4     | 2    | `P0.c0 P0.c1 P0.c2 P1.c0 P1.c1 P1.c2`           |
//! | RGB, 4:4:4     | 4    | as above, then `P2.c0 .. P3.c2`; `P2.c0` straddles the words |
//! | 4:2:2, 4:2:0   | 2    | `P0.c0 P0.c1 P1.c0 P0.c2`                       |
//! | 4:2:2, 4:2:0   | 4    | as above, then `P2.c0 P2.c1 P3.c0 P2.c2`        |
//!
//! 4:2:0 lines with an odd index carry zero in every chroma field.


#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::errors::{CodecError, CreationError};
use crate::format::{ColorFormat, LaneWidth};
use crate::pixel::{check_quant, max_sample, Pixel, PixelMatrix, Sample};

/// One packed field: pixel offset within the group and component index.
type Field = (usize, usize);

const FULL_2: [Field; 6] = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)];
const FULL_4: [Field; 12] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 0),
    (1, 1),
    (1, 2),
    (2, 0),
    (2, 1),
    (2, 2),
    (3, 0),
    (3, 1),
    (3, 2),
];
const HALF_2: [Field; 4] = [(0, 0), (0, 1), (1, 0), (0, 2)];
const HALF_4: [Field; 8] = [
    (0, 0),
    (0, 1),
    (1, 0),
    (0, 2),
    (2, 0),
    (2, 1),
    (3, 0),
    (2, 2),
];

const fn layout(format: ColorFormat, lane_width: LaneWidth) -> &'static [Field] {
    match (format, lane_width) {
        (ColorFormat::Rgb | ColorFormat::Yuv444, LaneWidth::Two) => &FULL_2,
        (ColorFormat::Rgb | ColorFormat::Yuv444, LaneWidth::Four) => &FULL_4,
        (ColorFormat::Yuv422 | ColorFormat::Yuv420, LaneWidth::Two) => &HALF_2,
        (ColorFormat::Yuv422 | ColorFormat::Yuv420, LaneWidth::Four) => &HALF_4,
    }
}

/// One scan line of packed words and its per-byte sideband markers.
///
/// The sideband is all clear except on the first line of a frame, where
/// the bytes of the first word group are flagged as start of frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferUnit {
    pub data: Vec<u8>,
    pub sideband: Vec<bool>,
}

impl TransferUnit {
    #[must_use]
    pub fn new(data: Vec<u8>, sideband: Vec<bool>) -> Self {
        Self { data, sideband }
    }

    #[must_use]
    pub fn is_frame_start(&self) -> bool {
        self.sideband.first().copied().unwrap_or(false)
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Vec<bool>) {
        (self.data, self.sideband)
    }
}

/// Frame geometry and sample layout shared by both ends of the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    pub width: usize,
    pub lane_width: LaneWidth,
    pub quant: u8,
    pub format: ColorFormat,
}

impl CodecConfig {
    /// # Errors
    /// - If `quant` is zero or wider than 10 bits
    /// - If `width` is not a non-zero multiple of the lane width
    pub fn validate(self) -> Result<Self, CodecError> {
        check_quant(self.quant)?;
        let lane = self.lane_width.pixels();
        if self.width == 0 || self.width % lane != 0 {
            return Err(CodecError::UnalignedWidth {
                width: self.width,
                lane_width: lane,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub const fn groups_per_line(&self) -> usize {
        self.width / self.lane_width.pixels()
    }

    /// Size in bytes of every transfer unit.
    #[must_use]
    pub const fn line_bytes(&self) -> usize {
        self.groups_per_line() * self.lane_width.group_bytes()
    }
}

/// Bit exact packer and unpacker for one [`CodecConfig`].
#[derive(Debug, Clone, Copy)]
pub struct PixelCodec {
    config: CodecConfig,
    layout: &'static [Field],
}

impl PixelCodec {
    /// # Errors
    /// - If the configuration does not validate
    pub fn new(config: CodecConfig) -> Result<Self, CodecError> {
        let config = config.validate()?;
        Ok(Self {
            config,
            layout: layout(config.format, config.lane_width),
        })
    }

    #[must_use]
    pub const fn config(&self) -> CodecConfig {
        self.config
    }

    /// Packs `input` into one transfer unit per scan line.
    ///
    /// Lines are cut every `config.width` pixels regardless of the width
    /// stored in `input`. Chroma that the format omits is dropped.
    ///
    /// # Errors
    /// - If the input length is not a multiple of the configured width
    /// - If any sample does not fit into `quant` bits
    pub fn pack(&self, input: &PixelMatrix) -> Result<Vec<TransferUnit>, CodecError> {
        let width = self.config.width;
        let data = input.data();
        if data.len() % width != 0 {
            return Err(CreationError::ResolutionMismatch.into());
        }
        input.check_samples(self.config.quant)?;

        #[cfg(feature = "rayon")]
        let units: Vec<TransferUnit> = data
            .par_chunks_exact(width)
            .enumerate()
            .map(|(line, row)| self.pack_line(line, row))
            .collect();
        #[cfg(not(feature = "rayon"))]
        let units: Vec<TransferUnit> = data
            .chunks_exact(width)
            .enumerate()
            .map(|(line, row)| self.pack_line(line, row))
            .collect();

        log::debug!(
            "Packed {} lines of {} bytes ({}, {}, {} bit)",
            units.len(),
            self.config.line_bytes(),
            self.config.format,
            self.config.lane_width,
            self.config.quant
        );
        Ok(units)
    }

    /// Unpacks transfer units produced by [`PixelCodec::pack`].
    ///
    /// Chroma the format does not carry comes back as zero, so 4:2:2 and
    /// 4:2:0 data never round trips to the original 4:4:4 chroma.
    ///
    /// # Errors
    /// - If a unit is not exactly one packed line long
    pub fn unpack(&self, units: &[TransferUnit]) -> Result<PixelMatrix, CodecError> {
        #[cfg(feature = "rayon")]
        let rows = units
            .par_iter()
            .enumerate()
            .map(|(line, unit)| self.unpack_line(line, unit))
            .collect::<Result<Vec<_>, _>>()?;
        #[cfg(not(feature = "rayon"))]
        let rows = units
            .iter()
            .enumerate()
            .map(|(line, unit)| self.unpack_line(line, unit))
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Unpacked {} lines ({}, {}, {} bit)",
            rows.len(),
            self.config.format,
            self.config.lane_width,
            self.config.quant
        );
        Ok(PixelMatrix::new(rows.concat(), self.config.width)?)
    }

    /// 4:2:0 only carries chroma on even lines; both directions use this.
    #[inline(always)]
    const fn line_has_chroma(&self, line: usize) -> bool {
        !matches!(self.config.format, ColorFormat::Yuv420) || line % 2 == 0
    }

    fn pack_line(&self, line: usize, row: &[Pixel]) -> TransferUnit {
        let quant = usize::from(self.config.quant);
        let group_bytes = self.config.lane_width.group_bytes();
        let chroma = self.line_has_chroma(line);

        let mut data = Vec::with_capacity(self.config.line_bytes());
        for group in row.chunks_exact(self.config.lane_width.pixels()) {
            let mut packed = 0u128;
            for (slot, &(pixel, component)) in self.layout.iter().enumerate() {
                if component == 0 || chroma {
                    packed |= u128::from(group[pixel][component]) << (slot * quant);
                }
            }
            // Words are little endian with word 0 holding the low bits, so
            // the whole group serializes as one little endian integer.
            data.extend_from_slice(&packed.to_le_bytes()[..group_bytes]);
        }

        let mut sideband = vec![false; data.len()];
        if line == 0 {
            let marked = group_bytes.min(sideband.len());
            sideband[..marked].fill(true);
        }
        TransferUnit { data, sideband }
    }

    fn unpack_line(&self, line: usize, unit: &TransferUnit) -> Result<Vec<Pixel>, CodecError> {
        let expected = self.config.line_bytes();
        if unit.data.len() != expected {
            return Err(CodecError::UnitLength {
                line,
                expected,
                actual: unit.data.len(),
            });
        }

        let quant = usize::from(self.config.quant);
        let mask = max_sample::<u128>(self.config.quant);
        let lanes = self.config.lane_width.pixels();
        let chroma = self.line_has_chroma(line);

        let mut row = vec![[0; 3]; self.config.width];
        for (group, bytes) in row
            .chunks_exact_mut(lanes)
            .zip(unit.data.chunks_exact(self.config.lane_width.group_bytes()))
        {
            let mut buf = [0u8; 16];
            buf[..bytes.len()].copy_from_slice(bytes);
            let packed = u128::from_le_bytes(buf);
            for (slot, &(pixel, component)) in self.layout.iter().enumerate() {
                if component == 0 || chroma {
                    group[pixel][component] = ((packed >> (slot * quant)) & mask) as Sample;
                }
            }
        }
        Ok(row)
    }
}

/// Packs `input` with the given geometry.
///
/// # Errors
/// - If `lane_width` is not 2 or 4
/// - See [`PixelCodec::pack`]
pub fn pack(
    input: &PixelMatrix,
    width: usize,
    lane_width: usize,
    quant: u8,
    format: ColorFormat,
) -> Result<Vec<TransferUnit>, CodecError> {
    PixelCodec::new(CodecConfig {
        width,
        lane_width: LaneWidth::try_from(lane_width)?,
        quant,
        format,
    })?
    .pack(input)
}

/// Unpacks `units` with the given geometry.
///
/// # Errors
/// - If `lane_width` is not 2 or 4
/// - See [`PixelCodec::unpack`]
pub fn unpack(
    units: &[TransferUnit],
    width: usize,
    lane_width: usize,
    quant: u8,
    format: ColorFormat,
) -> Result<PixelMatrix, CodecError> {
    PixelCodec::new(CodecConfig {
        width,
        lane_width: LaneWidth::try_from(lane_width)?,
        quant,
        format,
    })?
    .unpack(units)
}
