use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use filtra_image::{Image, ImageSize};
use filtra_imgproc::engine::{apply_filter, CancelToken};
use filtra_imgproc::filter::{Convolution, GaussianBlur, Median, Sobel};

fn synthetic_image(width: usize, height: usize) -> Image<u8, 3> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push(((x * 31 + y * 7) % 256) as u8);
            data.push(((x * 13 + y * 3) % 256) as u8);
            data.push(((x + y * 17) % 256) as u8);
        }
    }
    Image::new(ImageSize { width, height }, data).unwrap()
}

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("filters");

    for size in [64usize, 256].iter() {
        let image = synthetic_image(*size, *size);
        let parameter_string = format!("{size}x{size}");

        group.bench_with_input(
            BenchmarkId::new("gaussian_blur", &parameter_string),
            &image,
            |b, img| {
                let filter = GaussianBlur::default();
                let token = CancelToken::new();
                b.iter(|| std::hint::black_box(apply_filter(&filter, img, |_| {}, &token)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("box_smoothing", &parameter_string),
            &image,
            |b, img| {
                let filter = Convolution::box_smoothing();
                let token = CancelToken::new();
                b.iter(|| std::hint::black_box(apply_filter(&filter, img, |_| {}, &token)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sobel", &parameter_string),
            &image,
            |b, img| {
                let filter = Sobel::new();
                let token = CancelToken::new();
                b.iter(|| std::hint::black_box(apply_filter(&filter, img, |_| {}, &token)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("median5", &parameter_string),
            &image,
            |b, img| {
                let filter = Median::new(5).unwrap();
                let token = CancelToken::new();
                b.iter(|| std::hint::black_box(apply_filter(&filter, img, |_| {}, &token)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
