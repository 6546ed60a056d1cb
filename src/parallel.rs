//! Parallel batch evaluation and specialization using Rayon
//!
//! A renderer specializes the same surface along one ray per pixel and
//! evaluates it at many points; both loops are independent per item.
//!
//! Enable with the `parallel` feature:
//! ```toml
//! surface_algebra = { version = "0.1", features = ["parallel"] }
//! ```

use rayon::prelude::*;

use crate::ast::Expr;
use crate::error::Result;
use crate::evaluator::{Evaluator, Parameters};
use crate::expansion::{Ray, specialize};
use crate::poly::Polynomial;

/// Evaluate `expr` at every point, sharing one set of parameters
///
/// Results come back in the order of `points`.
pub fn evaluate_points(
    expr: &Expr,
    points: &[[f64; 3]],
    params: &Parameters,
) -> Vec<Result<f64>> {
    points
        .par_iter()
        .map(|&point| expr.accept(&mut Evaluator::at(point, params)))
        .collect()
}

/// Specialize `expr` along every ray
///
/// Results come back in the order of `rays`.
pub fn specialize_rays(expr: &Expr, rays: &[Ray], params: &Parameters) -> Vec<Result<Polynomial>> {
    rays.par_iter()
        .map(|ray| specialize(expr, ray, params))
        .collect()
}
