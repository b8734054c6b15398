use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vidio::*;

const WIDTH: usize = 320;
const HEIGHT: usize = 240;

fn make_frame(format: ColorFormat) -> PixelMatrix {
    FrameSource::new(WIDTH, HEIGHT, 10, Pattern::Random)
        .with_seed(0xbe7c)
        .generate_for(format)
        .unwrap()
}

fn make_codec(format: ColorFormat, lane_width: LaneWidth) -> PixelCodec {
    PixelCodec::new(CodecConfig {
        width: WIDTH,
        lane_width,
        quant: 10,
        format,
    })
    .unwrap()
}

fn bench_pack_rgb(c: &mut Criterion) {
    c.bench_function("pack rgb 10-bit 2 lanes", |b| {
        let codec = make_codec(ColorFormat::Rgb, LaneWidth::Two);
        let input = make_frame(ColorFormat::Rgb);
        b.iter(|| codec.pack(black_box(&input)).unwrap())
    });
}

fn bench_pack_yuv422(c: &mut Criterion) {
    c.bench_function("pack yuv 4:2:2 10-bit 4 lanes", |b| {
        let codec = make_codec(ColorFormat::Yuv422, LaneWidth::Four);
        let input = make_frame(ColorFormat::Yuv422);
        b.iter(|| codec.pack(black_box(&input)).unwrap())
    });
}

fn bench_unpack_yuv420(c: &mut Criterion) {
    c.bench_function("unpack yuv 4:2:0 10-bit 2 lanes", |b| {
        let codec = make_codec(ColorFormat::Yuv420, LaneWidth::Two);
        let units = codec.pack(&make_frame(ColorFormat::Yuv420)).unwrap();
        b.iter(|| codec.unpack(black_box(&units)).unwrap())
    });
}

fn bench_rgb_to_yuv(c: &mut Criterion) {
    c.bench_function("rgb to yuv bt2020 10-bit", |b| {
        let input = make_frame(ColorFormat::Rgb);
        b.iter(|| convert(black_box(&input), Standard::Bt2020, Direction::RgbToYuv, 10).unwrap())
    });
}

fn bench_tv_yuv_to_rgb(c: &mut Criterion) {
    c.bench_function("tv yuv to rgb bt709 10-bit", |b| {
        let input = make_frame(ColorFormat::Yuv444);
        b.iter(|| convert(black_box(&input), Standard::Bt709, Direction::TvYuvToRgb, 10).unwrap())
    });
}

fn bench_resample(c: &mut Criterion) {
    c.bench_function("yuv 4:4:4 to 4:2:2", |b| {
        let input = make_frame(ColorFormat::Yuv444);
        b.iter(|| resample::downsample_444_to_422(black_box(&input)))
    });
    c.bench_function("yuv 4:2:0 to 4:2:2", |b| {
        let input = make_frame(ColorFormat::Yuv420);
        b.iter(|| resample::upsample_420_to_422(black_box(&input), WIDTH).unwrap())
    });
}

criterion_group!(
    benches,
    bench_pack_rgb,
    bench_pack_yuv422,
    bench_unpack_yuv420,
    bench_rgb_to_yuv,
    bench_tv_yuv_to_rgb,
    bench_resample,
);
criterion_main!(benches);
