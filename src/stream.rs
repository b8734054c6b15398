use crate::codec::{CodecConfig, PixelCodec, TransferUnit};
use crate::convert::{convert, Direction};
use crate::errors::ConversionError;
use crate::format::{ColorFormat, Standard};
use crate::pixel::PixelMatrix;
use crate::resample::{downsample_444_to_422, upsample_420_to_422};

/// Converts a packed frame to another color format.
///
/// The units are unpacked with `input`, converted, and packed again with
/// the same width, lane width and quantization. Supported are RGB to
/// 4:4:4 under `standard`, 4:4:4 to 4:2:2, 4:2:0 to 4:2:2, and repacking
/// into the same format.
///
/// Returns the new units together with the converted matrix.
///
/// # Errors
/// - If the format pair is not supported
/// - If the units do not unpack under `input`
pub fn convert_stream(
    units: &[TransferUnit],
    input: CodecConfig,
    output: ColorFormat,
    standard: Standard,
) -> Result<(Vec<TransferUnit>, PixelMatrix), ConversionError> {
    let unsupported = ConversionError::UnsupportedConversion {
        from: input.format,
        to: output,
    };
    // Reject before touching any data.
    match (input.format, output) {
        (ColorFormat::Rgb, ColorFormat::Yuv444)
        | (ColorFormat::Yuv444, ColorFormat::Yuv422)
        | (ColorFormat::Yuv420, ColorFormat::Yuv422) => {}
        (from, to) if from == to => {}
        _ => return Err(unsupported),
    }

    let decoder = PixelCodec::new(input)?;
    let encoder = PixelCodec::new(CodecConfig {
        format: output,
        ..input
    })?;
    let mat = decoder.unpack(units)?;

    let converted = match (input.format, output) {
        (ColorFormat::Rgb, ColorFormat::Yuv444) => {
            convert(&mat, standard, Direction::RgbToYuv, input.quant)?
        }
        (ColorFormat::Yuv444, ColorFormat::Yuv422) => downsample_444_to_422(&mat),
        (ColorFormat::Yuv420, ColorFormat::Yuv422) => upsample_420_to_422(&mat, input.width)?,
        (from, to) if from == to => mat,
        _ => return Err(unsupported),
    };

    let units = encoder.pack(&converted)?;
    Ok((units, converted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::LaneWidth;
    use crate::frame_source::{FrameSource, Pattern};

    fn config(format: ColorFormat) -> CodecConfig {
        CodecConfig {
            width: 8,
            lane_width: LaneWidth::Two,
            quant: 10,
            format,
        }
    }

    fn stream(format: ColorFormat) -> (Vec<TransferUnit>, PixelMatrix) {
        let codec = PixelCodec::new(config(format)).unwrap();
        FrameSource::new(8, 4, 10, Pattern::SequentialIncrement)
            .generate_stream(&codec)
            .unwrap()
    }

    #[test]
    fn rgb_to_yuv444_matches_direct_conversion() {
        let (units, frame) = stream(ColorFormat::Rgb);
        let (out, mat) =
            convert_stream(&units, config(ColorFormat::Rgb), ColorFormat::Yuv444, Standard::Bt2020)
                .unwrap();
        let direct = convert(&frame, Standard::Bt2020, Direction::RgbToYuv, 10).unwrap();
        assert_eq!(mat, direct);
        assert_eq!(out.len(), 4);
        assert!(out[0].is_frame_start());
    }

    #[test]
    fn yuv444_to_yuv422_decimates() {
        let (units, frame) = stream(ColorFormat::Yuv444);
        let (out, mat) =
            convert_stream(&units, config(ColorFormat::Yuv444), ColorFormat::Yuv422, Standard::Bt709)
                .unwrap();
        assert_eq!(mat, downsample_444_to_422(&frame));
        let back = PixelCodec::new(config(ColorFormat::Yuv422))
            .unwrap()
            .unpack(&out)
            .unwrap();
        assert_eq!(back, mat);
    }

    #[test]
    fn yuv420_to_yuv422_fills_odd_rows() {
        let (units, _) = stream(ColorFormat::Yuv420);
        let (_, mat) =
            convert_stream(&units, config(ColorFormat::Yuv420), ColorFormat::Yuv422, Standard::Bt709)
                .unwrap();
        // Row 1 pixel 0 averages rows 0 and 2: chroma 1 and 49 -> 25.
        assert_eq!(mat.data()[8][1], 25);
        // The last row copies row 2.
        assert_eq!(mat.data()[24][1], mat.data()[16][1]);
    }

    #[test]
    fn rejects_unsupported_pairs() {
        let (units, _) = stream(ColorFormat::Yuv422);
        assert_eq!(
            convert_stream(&units, config(ColorFormat::Yuv422), ColorFormat::Rgb, Standard::Bt709),
            Err(ConversionError::UnsupportedConversion {
                from: ColorFormat::Yuv422,
                to: ColorFormat::Rgb
            })
        );
    }

    #[test]
    fn same_format_repacks() {
        let (units, frame) = stream(ColorFormat::Yuv422);
        let (out, mat) =
            convert_stream(&units, config(ColorFormat::Yuv422), ColorFormat::Yuv422, Standard::Bt601)
                .unwrap();
        assert_eq!(out, units);
        assert_eq!(mat, frame);
    }
}
