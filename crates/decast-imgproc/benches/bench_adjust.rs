use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use decast_image::{ColorMode, ImageSize, RasterImage};
use decast_imgproc::color::{split, ColorSpace};
use decast_imgproc::levels::auto_level;
use decast_imgproc::{auto_adjust, AdjustmentParams, ProcessingMode};

fn test_image(width: usize, height: usize) -> RasterImage {
    let data = (0..width * height * 3)
        .map(|i| ((i * 7 + i / 3) % 200 + 20) as u8)
        .collect();
    RasterImage::new(ImageSize { width, height }, ColorMode::Rgb, data).unwrap()
}

fn bench_auto_level(c: &mut Criterion) {
    let mut group = c.benchmark_group("AutoLevel");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let image = test_image(*width, *height);
        let planes = split(&image, ColorSpace::Rgb).unwrap();

        group.bench_with_input(
            BenchmarkId::new("plane", &parameter_string),
            &planes.planes[0],
            |b, i| b.iter(|| black_box(auto_level(i))),
        );
    }
    group.finish();
}

fn bench_auto_adjust(c: &mut Criterion) {
    let mut group = c.benchmark_group("AutoAdjust");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let image = test_image(*width, *height);

        for mode in [
            ProcessingMode::Rgb,
            ProcessingMode::LumSat,
            ProcessingMode::Mono,
        ] {
            let params = AdjustmentParams::default()
                .with_mode(mode)
                .with_red(20)
                .with_blue(-20)
                .with_contrast(10)
                .with_strength(80);

            group.bench_with_input(
                BenchmarkId::new(mode.name(), &parameter_string),
                &(&image, &params),
                |b, i| b.iter(|| black_box(auto_adjust(i.0, i.1))),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_auto_level, bench_auto_adjust);
criterion_main!(benches);
