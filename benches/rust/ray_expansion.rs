//! Ray Expansion Benchmark
//!
//! Benchmarks the three passes on a parametrized quartic surface.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use surface_algebra::{
    BinaryOp, EvalContext, Expr, Parameters, Ray, Scalar, Var, differentiate, evaluate,
    specialize,
};

// =============================================================================
// Surface Generator
// =============================================================================

/// Torus `(x^2 + y^2 + z^2 + R^2 - r^2)^2 - 4 R^2 (x^2 + y^2)`
fn torus() -> Expr {
    let big_sq = Scalar::binary(BinaryOp::Pow, Scalar::param("R"), Scalar::literal(2.0));
    let small_sq = Scalar::binary(BinaryOp::Pow, Scalar::param("r"), Scalar::literal(2.0));
    let offset = Scalar::binary(BinaryOp::Sub, big_sq.clone(), small_sq);
    let four_big_sq = Scalar::binary(BinaryOp::Mul, Scalar::literal(4.0), big_sq);

    let xy = Expr::pow(Expr::x(), 2) + Expr::pow(Expr::y(), 2);
    let inner = xy.clone() + Expr::pow(Expr::z(), 2) + offset.into_expr();
    Expr::pow(inner, 2) - four_big_sq.into_expr() * xy
}

/// Sum of `n` shifted tori, to stress deep trees
fn torus_chain(n: usize) -> Expr {
    let mut expr = torus();
    for i in 1..n {
        let shift = Expr::number(i as f64);
        expr = expr + torus() * shift;
    }
    expr
}

fn params() -> Parameters {
    [("R", 2.0), ("r", 0.5)].into_iter().collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_ray_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("torus");
    let params = params();
    let ray = Ray::linear([-4.0, 0.1, 0.2], [1.0, 0.05, -0.02]);

    for n in [1usize, 16] {
        let surface = torus_chain(n);

        group.bench_function(format!("specialize/{}", n), |b| {
            b.iter(|| specialize(black_box(&surface), black_box(&ray), &params))
        });

        group.bench_function(format!("differentiate/{}", n), |b| {
            b.iter(|| differentiate(black_box(&surface), Var::X))
        });

        let ctx = EvalContext::new(1.5, 0.25, -0.1).with_parameters(params.clone());
        group.bench_function(format!("evaluate/{}", n), |b| {
            b.iter(|| evaluate(black_box(&surface), &ctx))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ray_expansion);

criterion_main!(benches);
