#![deny(clippy::all)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::default_trait_access)]
#![allow(clippy::inconsistent_struct_constructor)]
#![allow(clippy::inline_always)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::similar_names)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::use_self)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::create_dir)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::default_numeric_fallback)]
#![warn(clippy::exit)]
#![warn(clippy::filetype_is_file)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::lossy_float_literal)]
#![warn(clippy::map_err_ignore)]
#![warn(clippy::mem_forget)]
#![warn(clippy::mod_module_files)]
#![warn(clippy::multiple_inherent_impl)]
#![warn(clippy::pattern_type_mismatch)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::rc_mutex)]
#![warn(clippy::rest_pat_in_fully_bound_structs)]
#![warn(clippy::same_name_method)]
#![warn(clippy::str_to_string)]
#![warn(clippy::string_to_string)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::unnecessary_self_imports)]
#![warn(clippy::unneeded_field_pattern)]
#![warn(clippy::use_debug)]
#![warn(clippy::verbose_file_reads)]

//! Synthetic video frames for hardware verification.
//!
//! Frames are [`PixelMatrix`] values of three samples per pixel. They can be
//! generated from a [`Pattern`], converted between RGB and YUV
//! ([`convert()`]), resampled between 4:4:4, 4:2:2 and 4:2:0
//! ([`resample`]), and packed into bus words one scan line at a time
//! ([`PixelCodec`]).
//!
//! ```
//! use vidio::{CodecConfig, ColorFormat, FrameSource, LaneWidth, Pattern, PixelCodec};
//!
//! let codec = PixelCodec::new(CodecConfig {
//!     width: 8,
//!     lane_width: LaneWidth::Two,
//!     quant: 10,
//!     format: ColorFormat::Rgb,
//! })
//! .unwrap();
//! let (units, frame) = FrameSource::new(8, 8, 10, Pattern::SequentialIncrement)
//!     .generate_stream(&codec)
//!     .unwrap();
//!
//! assert_eq!(units.len(), 8);
//! assert_eq!(codec.unpack(&units).unwrap(), frame);
//! ```

mod errors;
mod format;
mod frame_source;
mod pixel;
mod stream;

pub mod codec;
pub mod color_matrix;
pub mod convert;
pub mod resample;

pub use crate::codec::{CodecConfig, PixelCodec, TransferUnit};
pub use crate::color_matrix::{Calibration, ConversionMatrix};
pub use crate::convert::{convert, Direction};
pub use crate::errors::{CodecError, ConversionError, CreationError};
pub use crate::format::{BitDepth, ColorFormat, LaneWidth, Standard};
pub use crate::frame_source::{FrameSource, Pattern};
pub use crate::pixel::{Pixel, PixelMatrix, Sample, MAX_QUANT};
pub use crate::stream::convert_stream;
pub use av_data::pixel::MatrixCoefficients;
pub use v_frame::{frame::Frame, plane::Plane};
