use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use photon_stack_rs::image_pipeline::{
    convolve, FrameSource, FrameStacker, Kernel, LookProcessor, PixelBuffer, StackConfig,
    SyntheticFrameSource,
};
use std::time::Duration;

fn generate_frame(width: u32, height: u32) -> PixelBuffer {
    let mut source = SyntheticFrameSource::new(width, height, 16, 1).unwrap();
    source.sample().unwrap()
}

fn benchmark_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution_by_size");

    let sizes = vec![
        (100, 100, "100x100"),
        (500, 500, "500x500"),
        (1000, 1000, "1000x1000"),
    ];

    let kernel = Kernel::sharpen();
    for (width, height, label) in sizes {
        let frame = generate_frame(width, height);

        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            b.iter(|| convolve(black_box(frame), &kernel).unwrap());
        });
    }

    group.finish();
}

fn benchmark_kernel_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("convolution_by_kernel");
    let frame = generate_frame(500, 500);

    for side in [1usize, 3, 5, 7] {
        let kernel = Kernel::box_blur(side).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(side), &kernel, |b, kernel| {
            b.iter(|| convolve(black_box(&frame), kernel).unwrap());
        });
    }

    group.finish();
}

fn benchmark_look(c: &mut Criterion) {
    let mut group = c.benchmark_group("look_by_size");
    let processor = LookProcessor::default();

    for (width, height, label) in [(500, 500, "500x500"), (1920, 1080, "1920x1080")] {
        let frame = generate_frame(width, height);
        group.bench_with_input(BenchmarkId::from_parameter(label), &frame, |b, frame| {
            b.iter(|| processor.apply(black_box(frame)).unwrap());
        });
    }

    group.finish();
}

fn benchmark_stacking(c: &mut Criterion) {
    let mut group = c.benchmark_group("stacking_by_frame_count");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let config = StackConfig {
        frame_interval: Duration::ZERO,
        ..StackConfig::default()
    };
    let stacker = FrameStacker::new(config, LookProcessor::default());

    for frame_count in [1u32, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(frame_count),
            &frame_count,
            |b, &frame_count| {
                let mut source = SyntheticFrameSource::new(640, 480, 16, 7).unwrap();
                b.iter(|| {
                    runtime
                        .block_on(stacker.stack(&mut source, black_box(frame_count)))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_convolution,
    benchmark_kernel_sizes,
    benchmark_look,
    benchmark_stacking
);
criterion_main!(benches);
