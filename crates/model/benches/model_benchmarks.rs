//! Benchmarks for karst-model standardization and neutralization.
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use karst_model::{
    CrossSectionalStandardizer, DailyNeutralizer, IndustryLabels, NeutralizeConfig,
    NeutralizeInputs,
};
use karst_primitives::{CrossSections, StandardizeMethod};
use rand::Rng;

const INDUSTRIES: [&str; 11] = [
    "energy", "materials", "industrials", "discretionary", "staples", "health", "financials",
    "tech", "telecom", "utilities", "real_estate",
];

struct Panel {
    values: Vec<f64>,
    inputs: NeutralizeInputs,
    sections: CrossSections,
}

fn random_panel(n_dates: usize, n_assets: usize) -> Panel {
    let mut rng = rand::thread_rng();
    let n = n_dates * n_assets;

    let values = (0..n).map(|_| rng.r#gen::<f64>() * 2.0 - 1.0).collect();
    let log_size = (0..n).map(|_| rng.gen_range(20.0..26.0)).collect();
    let labels = (0..n)
        .map(|_| Some(INDUSTRIES[rng.gen_range(0..INDUSTRIES.len())].to_string()))
        .collect();
    let keys: Vec<Option<String>> = (0..n).map(|i| Some(format!("d{}", i / n_assets))).collect();

    Panel {
        values,
        inputs: NeutralizeInputs { labels: IndustryLabels::from_labels(labels), log_size },
        sections: CrossSections::from_keys(&keys),
    }
}

fn bench_standardize(c: &mut Criterion) {
    let mut group = c.benchmark_group("standardize");
    group.sample_size(30);
    let standardizer = CrossSectionalStandardizer::default();

    for (n_dates, n_assets) in [(20, 500), (250, 500), (250, 3000)] {
        let panel = random_panel(n_dates, n_assets);
        group.throughput(Throughput::Elements((n_dates * n_assets) as u64));

        for method in StandardizeMethod::ALL {
            group.bench_with_input(
                BenchmarkId::new(method.to_string(), format!("{n_dates}x{n_assets}")),
                &panel,
                |b, panel| {
                    b.iter(|| {
                        standardizer
                            .standardize(method, black_box(&panel.values), &panel.sections)
                            .unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_neutralize(c: &mut Criterion) {
    let mut group = c.benchmark_group("neutralize");
    group.sample_size(20);

    for (n_dates, n_assets) in [(20, 500), (250, 500), (250, 3000)] {
        let panel = random_panel(n_dates, n_assets);
        group.throughput(Throughput::Elements((n_dates * n_assets) as u64));

        for parallel in [false, true] {
            let neutralizer =
                DailyNeutralizer::new(NeutralizeConfig { parallel, ..Default::default() });
            let label = if parallel { "parallel" } else { "sequential" };

            group.bench_with_input(
                BenchmarkId::new(label, format!("{n_dates}x{n_assets}")),
                &panel,
                |b, panel| {
                    b.iter(|| {
                        neutralizer
                            .neutralize(black_box(&panel.values), &panel.inputs, &panel.sections)
                            .unwrap()
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_standardize, bench_neutralize);
criterion_main!(benches);
