//! Runs every filter over a synthetic image, printing progress, and then
//! demonstrates mid-run cancellation by cancelling from the progress callback.

use filtra::image::{Image, ImageSize};
use filtra::imgproc::engine::{apply_filter, CancelToken, FilterOutcome, PixelFilter};
use filtra::imgproc::filter::{
    Convolution, GaussianBlur, LaplacianKind, LaplacianSharpen, Median, Sobel, UnsharpMask,
};

fn synthetic_image(width: usize, height: usize) -> Image<u8, 3> {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            data.push(((x * 255) / width.max(1)) as u8);
            data.push(((y * 255) / height.max(1)) as u8);
            data.push((((x ^ y) * 5) % 256) as u8);
        }
    }
    Image::new(ImageSize { width, height }, data).expect("data length matches size")
}

fn mean_channel(image: &Image<u8, 3>) -> f32 {
    let floats = image.cast::<f32>().expect("u8 always casts to f32");
    floats.as_slice().iter().sum::<f32>() / floats.as_slice().len() as f32
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let size = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<usize>().ok())
        .unwrap_or(256);

    let src = synthetic_image(size, size);
    println!(
        "source image {}x{}, mean channel value {:.1}",
        src.width(),
        src.height(),
        mean_channel(&src)
    );

    let filters: Vec<(&str, Box<dyn PixelFilter>)> = vec![
        ("gaussian blur", Box::new(GaussianBlur::default())),
        ("box smoothing", Box::new(Convolution::box_smoothing())),
        ("weighted smoothing", Box::new(Convolution::weighted_smoothing())),
        ("sobel", Box::new(Sobel::new())),
        ("median 5x5", Box::new(Median::new(5)?)),
        (
            "laplacian sharpen (4-neighbor)",
            Box::new(LaplacianSharpen::with_default_strength(
                LaplacianKind::FourNeighbor,
            )),
        ),
        (
            "laplacian sharpen (8-neighbor)",
            Box::new(LaplacianSharpen::with_default_strength(
                LaplacianKind::EightNeighbor,
            )),
        ),
        ("unsharp mask", Box::new(UnsharpMask::new(1.5))),
    ];

    for (name, filter) in &filters {
        let mut last_printed = 0;
        let outcome = apply_filter(
            filter.as_ref(),
            &src,
            |pct| {
                if pct >= last_printed + 25 {
                    last_printed = pct;
                    log::info!("{name}: {pct}%");
                }
            },
            &CancelToken::new(),
        )?;

        match outcome {
            FilterOutcome::Completed(image) => {
                println!("{name}: done, mean channel value {:.1}", mean_channel(&image));
            }
            FilterOutcome::Cancelled => println!("{name}: cancelled"),
        }
    }

    // cancel the run from its own progress callback once it crosses 50%
    let token = CancelToken::new();
    let remote = token.clone();
    let outcome = apply_filter(
        &Median::new(7)?,
        &src,
        |pct| {
            if pct >= 50 {
                remote.cancel();
            }
        },
        &token,
    )?;
    println!(
        "median 7x7 with mid-run cancellation: {}",
        if outcome.is_cancelled() { "cancelled, prior image kept" } else { "completed" }
    );

    Ok(())
}
