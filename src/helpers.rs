//! Gradient helpers for surface normals
//!
//! The normal of an implicit surface `f = 0` is the gradient of `f`; these
//! wrap the differentiation and evaluation passes for that use.

use crate::ast::{Expr, Var};
use crate::error::Result;
use crate::evaluator::{EvalContext, Evaluator};

/// Symbolic gradient `[∂f/∂x, ∂f/∂y, ∂f/∂z]`
///
/// # Example
/// ```
/// use surface_algebra::{EvalContext, Expr, evaluate, gradient};
///
/// let f = Expr::pow(Expr::x(), 2) + Expr::y() * Expr::z();
/// let [dx, dy, dz] = gradient(&f);
/// let ctx = EvalContext::new(1.0, 2.0, 3.0);
/// assert_eq!(evaluate(&dx, &ctx).unwrap(), 2.0);
/// assert_eq!(evaluate(&dy, &ctx).unwrap(), 3.0);
/// assert_eq!(evaluate(&dz, &ctx).unwrap(), 2.0);
/// ```
pub fn gradient(expr: &Expr) -> [Expr; 3] {
    Var::ALL.map(|var| expr.derive(var))
}

/// Unnormalised surface normal at the context's point
///
/// Fails only if a referenced parameter is unbound.
pub fn normal_at(expr: &Expr, ctx: &EvalContext) -> Result<[f64; 3]> {
    let [dx, dy, dz] = gradient(expr);
    let mut evaluator = Evaluator::new(ctx);
    Ok([
        dx.accept(&mut evaluator)?,
        dy.accept(&mut evaluator)?,
        dz.accept(&mut evaluator)?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Scalar;
    use crate::error::AlgebraError;

    #[test]
    fn test_sphere_normal_points_outward() {
        let sphere = Expr::pow(Expr::x(), 2) + Expr::pow(Expr::y(), 2) + Expr::pow(Expr::z(), 2)
            - Expr::number(1.0);
        let ctx = EvalContext::new(0.0, 0.6, 0.8);
        let n = normal_at(&sphere, &ctx).unwrap();
        assert_eq!(n, [0.0, 1.2, 1.6]);
    }

    #[test]
    fn test_normal_needs_bound_parameters() {
        // a*x + y, gradient is [a, 1, 0]
        let plane = Expr::param("a") * Expr::x() + Expr::y();
        let mut ctx = EvalContext::new(1.0, 1.0, 1.0);
        assert!(matches!(
            normal_at(&plane, &ctx),
            Err(AlgebraError::UnboundParameter { .. })
        ));

        ctx.set_parameter("a", 3.0);
        assert_eq!(normal_at(&plane, &ctx).unwrap(), [3.0, 1.0, 0.0]);
    }

    #[test]
    fn test_gradient_of_scalar_division() {
        let f = Expr::div_scalar(Expr::pow(Expr::z(), 3), Scalar::literal(3.0));
        let [dx, _, dz] = gradient(&f);
        let ctx = EvalContext::new(5.0, 5.0, 2.0);
        assert_eq!(crate::evaluate(&dx, &ctx).unwrap(), 0.0);
        assert_eq!(crate::evaluate(&dz, &ctx).unwrap(), 4.0);
    }
}
