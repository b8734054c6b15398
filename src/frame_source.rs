use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::codec::{PixelCodec, TransferUnit};
use crate::errors::{CodecError, CreationError};
use crate::format::ColorFormat;
use crate::pixel::{check_quant, max_sample, PixelMatrix, Sample};
use crate::resample::subsample;

/// Fill pattern of a synthetic frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// A counter incremented on every sample, row-major, wrapping at `2^quant`.
    SequentialIncrement,
    /// Uniform noise in `0..2^quant - 1`.
    Random,
    /// Every component of a pixel holds its column index, wrapping at `2^quant`.
    HorizontalIncrement,
}

/// Builds test frames from a [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSource {
    pub width: usize,
    pub height: usize,
    pub quant: u8,
    pub pattern: Pattern,
    seed: Option<u64>,
}

impl FrameSource {
    #[must_use]
    pub const fn new(width: usize, height: usize, quant: u8, pattern: Pattern) -> Self {
        Self {
            width,
            height,
            quant,
            pattern,
            seed: None,
        }
    }

    /// Makes [`Pattern::Random`] frames reproducible.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Produces a full 4:4:4 frame.
    ///
    /// # Errors
    /// - If `width` is zero or `quant` is not supported
    pub fn generate(&self) -> Result<PixelMatrix, CreationError> {
        let quant = check_quant(self.quant)?;
        let modulus = 1usize << quant;
        let width = self.width;

        match self.pattern {
            Pattern::SequentialIncrement => PixelMatrix::from_fn(width, self.height, |y, x| {
                let base = (y * width + x) * 3;
                [0, 1, 2].map(|k| ((base + k) % modulus) as Sample)
            }),
            Pattern::Random => {
                let mut rng = match self.seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let max = f64::from(max_sample::<Sample>(quant));
                PixelMatrix::from_fn(width, self.height, |_, _| {
                    [0; 3].map(|_: Sample| (rng.gen::<f64>() * max) as Sample)
                })
            }
            Pattern::HorizontalIncrement => PixelMatrix::from_fn(width, self.height, |_, x| {
                [(x % modulus) as Sample; 3]
            }),
        }
    }

    /// Produces a frame with the chroma that `format` does not carry zeroed.
    ///
    /// The full frame is generated first and masked afterwards, in that
    /// order, for every pattern.
    ///
    /// # Errors
    /// - See [`FrameSource::generate`]
    pub fn generate_for(&self, format: ColorFormat) -> Result<PixelMatrix, CreationError> {
        if self.pattern == Pattern::Random && format.is_subsampled() {
            log::warn!(
                "Random {} frames are known to disagree with simulation data",
                format
            );
        }
        Ok(subsample(&self.generate()?, format))
    }

    /// Generates a frame for `codec` and packs it.
    ///
    /// Returns the transfer units together with the masked matrix they were
    /// packed from.
    ///
    /// # Errors
    /// - If the codec width differs from the source width
    /// - See [`FrameSource::generate`] and [`PixelCodec::pack`]
    pub fn generate_stream(
        &self,
        codec: &PixelCodec,
    ) -> Result<(Vec<TransferUnit>, PixelMatrix), CodecError> {
        let config = codec.config();
        if config.width != self.width {
            return Err(CreationError::ResolutionMismatch.into());
        }
        let frame = self.generate_for(config.format)?;
        let units = codec.pack(&frame)?;
        Ok((units, frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecConfig;
    use crate::format::LaneWidth;

    #[test]
    fn sequential_counts_every_sample() {
        let m = FrameSource::new(4, 2, 10, Pattern::SequentialIncrement)
            .generate()
            .unwrap();
        assert_eq!(m.data()[0], [0, 1, 2]);
        assert_eq!(m.data()[1], [3, 4, 5]);
        assert_eq!(m.data()[4], [12, 13, 14]);
        assert_eq!(m.height(), 2);
    }

    #[test]
    fn sequential_wraps_at_quant() {
        let m = FrameSource::new(100, 1, 8, Pattern::SequentialIncrement)
            .generate()
            .unwrap();
        // Sample 256 wraps to 0.
        assert_eq!(m.data()[85], [255, 0, 1]);
    }

    #[test]
    fn horizontal_increment() {
        let m = FrameSource::new(5, 3, 10, Pattern::HorizontalIncrement)
            .generate()
            .unwrap();
        for row in m.rows() {
            for (x, pix) in row.iter().enumerate() {
                assert_eq!(*pix, [x as Sample; 3]);
            }
        }
    }

    #[test]
    fn random_is_seeded_and_bounded() {
        let source = FrameSource::new(16, 16, 10, Pattern::Random).with_seed(7);
        let a = source.generate().unwrap();
        let b = source.generate().unwrap();
        assert_eq!(a, b);
        assert!(a.data().iter().flatten().all(|&v| v < 1023));
        assert_ne!(a, FrameSource::new(16, 16, 10, Pattern::Random).with_seed(8).generate().unwrap());
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            FrameSource::new(0, 4, 10, Pattern::Random).generate(),
            Err(CreationError::ZeroWidth)
        );
        assert_eq!(
            FrameSource::new(4, 4, 12, Pattern::Random).generate(),
            Err(CreationError::UnsupportedQuantization(12))
        );
    }

    #[test]
    fn masks_for_subsampled_formats() {
        let m = FrameSource::new(4, 2, 10, Pattern::SequentialIncrement)
            .generate_for(ColorFormat::Yuv420)
            .unwrap();
        assert_eq!(m.data()[0], [0, 1, 2]);
        assert_eq!(m.data()[1], [3, 0, 0]);
        assert_eq!(m.data()[4], [12, 0, 0]);
    }

    #[test]
    fn stream_of_eight_by_eight_frame() {
        let codec = PixelCodec::new(CodecConfig {
            width: 8,
            lane_width: LaneWidth::Two,
            quant: 10,
            format: ColorFormat::Rgb,
        })
        .unwrap();
        let (units, frame) = FrameSource::new(8, 8, 10, Pattern::SequentialIncrement)
            .generate_stream(&codec)
            .unwrap();
        assert_eq!(units.len(), 8);
        assert_eq!(units[0].sideband[..8], [true; 8]);
        assert!(units[0].sideband[8..].iter().all(|&b| !b));
        assert!(units[1..].iter().all(|u| u.sideband.iter().all(|&b| !b)));
        assert_eq!(codec.unpack(&units).unwrap(), frame);
    }

    #[test]
    fn stream_width_must_match_codec() {
        let codec = PixelCodec::new(CodecConfig {
            width: 4,
            lane_width: LaneWidth::Two,
            quant: 10,
            format: ColorFormat::Rgb,
        })
        .unwrap();
        assert_eq!(
            FrameSource::new(8, 8, 10, Pattern::HorizontalIncrement).generate_stream(&codec),
            Err(CodecError::Creation(CreationError::ResolutionMismatch))
        );
    }
}
