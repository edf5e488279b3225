use criterion::{criterion_group, criterion_main, black_box, BenchmarkId, Criterion};
use trend_core::{fit_regression, fit_trend_line, RegressionModel, Series, TrendLineSpec};

fn gen_series(n: usize) -> Series {
    let points = (1..=n)
        .map(|i| {
            let x = i as f64 * 0.01;
            // exponential growth with a small ripple
            (x, 2.0 * (0.5 * x).exp() * (1.0 + 0.02 * (i as f64).sin()))
        })
        .collect::<Vec<_>>();
    Series::from_points(&points).unwrap()
}

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit");
    for &n in &[1_000usize, 10_000usize] {
        let series = gen_series(n);
        for model in [
            RegressionModel::Polynomial { degree: 1 },
            RegressionModel::Polynomial { degree: 3 },
            RegressionModel::Exponential,
            RegressionModel::Power,
        ] {
            group.bench_with_input(BenchmarkId::new(model.name(), n), &series, |b, s| {
                b.iter(|| black_box(fit_regression(s, model, None).unwrap()));
            });
        }
    }
    group.finish();
}

fn bench_trend_line(c: &mut Criterion) {
    let series = gen_series(5_000);
    let spec = TrendLineSpec::builder(trend_core::TrendModel::Exponential)
        .show_r2(true)
        .show_sigma2(true)
        .build()
        .unwrap();
    c.bench_function("trend_line_exp_n5000", |b| {
        b.iter(|| black_box(fit_trend_line(&series, &spec).unwrap()));
    });
}

criterion_group!(benches, bench_fit, bench_trend_line);
criterion_main!(benches);
