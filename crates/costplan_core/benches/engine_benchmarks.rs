//! Criterion benchmarks for costplan_core
//!
//! Run with: cargo bench -p costplan_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rustc_hash::FxHashMap;

use costplan_core::constants::AppraisalPolicy;
use costplan_core::financial::{appraise, irr};
use costplan_core::model::{CashFlowSeries, RandomVariable};
use costplan_core::risk::{MonteCarloConfig, monte_carlo};

fn project_variables() -> FxHashMap<String, RandomVariable> {
    let mut variables = FxHashMap::default();
    variables.insert(
        "revenue".to_string(),
        RandomVariable::Triangular {
            low: 80_000.0,
            mode: 120_000.0,
            high: 200_000.0,
        },
    );
    variables.insert(
        "cost".to_string(),
        RandomVariable::Normal {
            mean: 100_000.0,
            std_dev: 15_000.0,
        },
    );
    variables
}

fn bench_monte_carlo(c: &mut Criterion) {
    let variables = project_variables();
    let mut group = c.benchmark_group("monte_carlo");

    for iterations in [1_000, 10_000, 100_000] {
        let config = MonteCarloConfig {
            iterations,
            seed: 42,
            ..Default::default()
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &config,
            |b, config| {
                b.iter(|| {
                    monte_carlo(black_box(&variables), black_box("revenue - cost"), config)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

fn bench_financial_solver(c: &mut Criterion) {
    let series = CashFlowSeries::new(10_000.0, vec![1_500.0; 20], 0.08);

    c.bench_function("irr_20_periods", |b| {
        b.iter(|| irr(black_box(&series)).unwrap());
    });

    let policy = AppraisalPolicy::default();
    c.bench_function("appraise_20_periods", |b| {
        b.iter(|| appraise(black_box(&series), black_box(&policy)).unwrap());
    });
}

criterion_group!(benches, bench_monte_carlo, bench_financial_solver);
criterion_main!(benches);
