//! Benchmarks for karst-math operations.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use karst_math::{Ddof, ZScore, average_rank, mad_clip, matrix_rank, ols_residuals};
use ndarray::{Array1, Array2};
use rand::Rng;

fn random_array(n: usize) -> Array1<f64> {
    let mut rng = rand::thread_rng();
    Array1::from_iter((0..n).map(|_| rng.r#gen::<f64>() * 0.1 - 0.05))
}

fn random_design(n_rows: usize, n_industries: usize) -> Array2<f64> {
    let mut rng = rand::thread_rng();
    let mut matrix = Array2::zeros((n_rows, n_industries + 1));
    for i in 0..n_rows {
        matrix[[i, 0]] = 1.0;
        let industry = rng.gen_range(0..n_industries);
        if industry > 0 {
            matrix[[i, industry]] = 1.0;
        }
        matrix[[i, n_industries]] = rng.gen_range(20.0..26.0);
    }
    matrix
}

fn bench_mad_clip(c: &mut Criterion) {
    let mut group = c.benchmark_group("mad_clip");

    for size in [100, 1000, 5000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data = random_array(size);
            b.iter(|| mad_clip(black_box(&data), black_box(3.0)).unwrap());
        });
    }

    group.finish();
}

fn bench_rank_zscore(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_zscore");

    for size in [100, 1000, 5000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let data = random_array(size);
            let zscore = ZScore::new(Ddof::Sample);
            b.iter(|| zscore.apply(&average_rank(black_box(&data))));
        });
    }

    group.finish();
}

fn bench_ols(c: &mut Criterion) {
    let mut group = c.benchmark_group("ols");
    group.sample_size(50);

    // Typical A-share cross-sections: a few thousand names, ~30 industries
    for (n_rows, n_industries) in [(300, 10), (1000, 30), (4000, 30)] {
        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(
            BenchmarkId::new("rows_industries", format!("{n_rows}x{n_industries}")),
            &(n_rows, n_industries),
            |b, &(n_rows, n_industries)| {
                let y = random_array(n_rows);
                let x = random_design(n_rows, n_industries);
                b.iter(|| ols_residuals(black_box(&y), black_box(&x)).unwrap());
            },
        );
    }

    group.finish();
}

fn bench_matrix_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_rank");

    for (n_rows, n_industries) in [(300, 10), (1000, 30)] {
        group.bench_with_input(
            BenchmarkId::new("rows_industries", format!("{n_rows}x{n_industries}")),
            &(n_rows, n_industries),
            |b, &(n_rows, n_industries)| {
                let x = random_design(n_rows, n_industries);
                b.iter(|| matrix_rank(black_box(&x)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_mad_clip, bench_rank_zscore, bench_ols, bench_matrix_rank);

criterion_main!(benches);
