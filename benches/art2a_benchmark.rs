use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use art2a_rs::{Art2a, Art2aConfig, Metric};
use ndarray::Array2;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use std::time::Duration;

fn bench_config() -> Art2aConfig {
    Art2aConfig::new(128).with_max_epochs(10).with_seed(42)
}

fn benchmark_cluster_varying_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("art2a_samples");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let n_features = 64;
    let sample_sizes = [500, 2_000, 5_000];

    for n_samples in sample_sizes.iter() {
        group.throughput(Throughput::Elements(*n_samples as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(n_samples),
            n_samples,
            |b, &n_samples| {
                let matrix =
                    Array2::random((n_samples, n_features), Uniform::new(0.0f32, 1.0));
                let model = Art2a::with_config(bench_config(), Metric::Cosine);
                let data = model.preprocess(&matrix.view()).unwrap();

                b.iter(|| model.cluster(black_box(&data), 0.6).unwrap());
            },
        );
    }
    group.finish();
}

fn benchmark_cluster_varying_vigilance(c: &mut Criterion) {
    let mut group = c.benchmark_group("art2a_vigilance");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let matrix = Array2::random((2_000, 64), Uniform::new(0.0f32, 1.0));
    let model = Art2a::with_config(bench_config(), Metric::Cosine);
    let data = model.preprocess(&matrix.view()).unwrap();

    for vigilance in [0.3f32, 0.6, 0.9] {
        group.bench_with_input(
            BenchmarkId::from_parameter(vigilance),
            &vigilance,
            |b, &vigilance| {
                b.iter(|| model.cluster(black_box(&data), vigilance).unwrap());
            },
        );
    }
    group.finish();
}

fn benchmark_sweep_sequential_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("art2a_sweep");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(3));

    let matrix = Array2::random((1_000, 32), Uniform::new(0.0f32, 1.0));
    let model = Art2a::with_config(bench_config(), Metric::Cosine);
    let data = model.preprocess(&matrix.view()).unwrap();
    let vigilances: Vec<f32> = (1..9).map(|i| i as f32 / 10.0).collect();

    for num_threads in [0usize, 4] {
        group.bench_with_input(
            BenchmarkId::from_parameter(num_threads),
            &num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    model
                        .sweep(black_box(&data), &vigilances, num_threads)
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_cluster_varying_samples,
    benchmark_cluster_varying_vigilance,
    benchmark_sweep_sequential_vs_parallel,
);

criterion_main!(benches);
