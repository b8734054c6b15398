use num_traits::{PrimInt, Unsigned};
use v_frame::{frame::Frame, plane::Plane};

use crate::errors::CreationError;

/// Widest sample the packer can fit six of into one 64-bit bus word.
pub const MAX_QUANT: u8 = 10;

/// One color component of `quant` bits.
pub type Sample = u16;

/// Three samples, either (R, G, B) or (Y, U, V).
pub type Pixel = [Sample; 3];

/// Largest value representable with `quant` bits.
#[must_use]
#[inline(always)]
pub fn max_sample<T: PrimInt + Unsigned>(quant: u8) -> T {
    (T::one() << usize::from(quant)) - T::one()
}

/// Checks that `quant` is one of the sample widths this crate handles.
///
/// # Errors
/// - If `quant` is zero or wider than [`MAX_QUANT`]
pub const fn check_quant(quant: u8) -> Result<u8, CreationError> {
    if quant == 0 || quant > MAX_QUANT {
        Err(CreationError::UnsupportedQuantization(quant))
    } else {
        Ok(quant)
    }
}

/// A row-major frame of pixels.
///
/// The height is implied by `data.len() / width`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    pub(crate) data: Vec<Pixel>,
    pub(crate) width: usize,
}

impl PixelMatrix {
    /// # Errors
    /// - If `width` is zero
    /// - If data length is not a multiple of `width`
    pub fn new(data: Vec<Pixel>, width: usize) -> Result<Self, CreationError> {
        if width == 0 {
            return Err(CreationError::ZeroWidth);
        }
        if data.len() % width != 0 {
            return Err(CreationError::ResolutionMismatch);
        }

        Ok(Self { data, width })
    }

    /// Builds a `width` x `height` matrix from a function of `(row, column)`.
    ///
    /// # Errors
    /// - If `width` is zero
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, CreationError>
    where
        F: FnMut(usize, usize) -> Pixel,
    {
        if width == 0 {
            return Err(CreationError::ZeroWidth);
        }
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Ok(Self { data, width })
    }

    #[must_use]
    #[inline(always)]
    pub fn data(&self) -> &[Pixel] {
        &self.data
    }

    #[must_use]
    #[inline(always)]
    pub fn into_data(self) -> Vec<Pixel> {
        self.data
    }

    #[must_use]
    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    #[inline(always)]
    pub fn height(&self) -> usize {
        self.data.len() / self.width
    }

    #[must_use]
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Pixel> {
        self.data.chunks_exact(self.width)
    }

    /// Verifies that every sample fits into `quant` bits.
    ///
    /// # Errors
    /// - If `quant` is not supported
    /// - If any sample is `2^quant` or larger
    pub fn check_samples(&self, quant: u8) -> Result<(), CreationError> {
        let max = max_sample::<Sample>(check_quant(quant)?);
        match self
            .data
            .iter()
            .enumerate()
            .find_map(|(index, pix)| pix.iter().find(|&&v| v > max).map(|&v| (index, v)))
        {
            Some((index, value)) => Err(CreationError::SampleOverflow {
                index,
                value,
                quant,
            }),
            None => Ok(()),
        }
    }

    /// Splits the matrix into three full resolution planes.
    #[must_use]
    pub fn to_frame(&self) -> Frame<u16> {
        let width = self.width;
        let height = self.height();
        let mut frame: Frame<u16> = Frame {
            planes: [
                Plane::new(width, height, 0, 0, 0, 0),
                Plane::new(width, height, 0, 0, 0, 0),
                Plane::new(width, height, 0, 0, 0, 0),
            ],
        };

        for (c, plane) in frame.planes.iter_mut().enumerate() {
            let stride = plane.cfg.stride;
            let origin = plane.data_origin_mut();
            for (y, row) in self.rows().enumerate() {
                for (x, pix) in row.iter().enumerate() {
                    origin[y * stride + x] = pix[c];
                }
            }
        }
        frame
    }

    /// Interleaves three planes back into a matrix.
    ///
    /// Subsampled chroma planes are expanded by repeating each chroma sample
    /// over the pixels it covers.
    ///
    /// # Errors
    /// - If the luma plane has zero width
    pub fn from_frame(frame: &Frame<u16>) -> Result<Self, CreationError> {
        let [ref y_plane, ref u_plane, ref v_plane] = frame.planes;
        let width = y_plane.cfg.width;
        let height = y_plane.cfg.height;
        let y_stride = y_plane.cfg.stride;
        let u_stride = u_plane.cfg.stride;
        let v_stride = v_plane.cfg.stride;
        let (ss_x, ss_y) = (u_plane.cfg.xdec, u_plane.cfg.ydec);
        let y_origin = y_plane.data_origin();
        let u_origin = u_plane.data_origin();
        let v_origin = v_plane.data_origin();

        Self::from_fn(width, height, |y, x| {
            [
                y_origin[y * y_stride + x],
                u_origin[(y >> ss_y) * u_stride + (x >> ss_x)],
                v_origin[(y >> ss_y) * v_stride + (x >> ss_x)],
            ]
        })
    }
}
