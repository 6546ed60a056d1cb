//! Ray specialization: substitute a parametrized ray into a surface equation
//!
//! Given x(t), y(t), z(t) as polynomials, a trivariate expression becomes a
//! single polynomial in `t` whose roots are the ray/surface intersections.
//! Scalar subtrees are folded to constants with an [`Evaluator`] pinned at
//! the origin, so every named parameter they reference must be bound.
//!
//! # Example
//! ```
//! use surface_algebra::{Expr, Parameters, Ray, specialize};
//!
//! // unit sphere, ray along the x axis through the origin
//! let sphere = Expr::pow(Expr::x(), 2) + Expr::pow(Expr::y(), 2)
//!     + Expr::pow(Expr::z(), 2) - Expr::number(1.0);
//! let ray = Ray::linear([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
//! let poly = specialize(&sphere, &ray, &Parameters::new()).unwrap();
//! assert_eq!(poly.coefficients(), &[-1.0, 0.0, 1.0]);
//! ```

use crate::ast::{BinaryOp, Expr, Scalar, UnaryOp, Var};
use crate::error::{AlgebraError, Result};
use crate::evaluator::{Evaluator, Parameters};
use crate::poly::Polynomial;
use crate::visitor::ExprVisitor;

/// Ray parametrization: one polynomial in `t` per spatial coordinate
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub x: Polynomial,
    pub y: Polynomial,
    pub z: Polynomial,
}

impl Ray {
    pub fn new(x: Polynomial, y: Polynomial, z: Polynomial) -> Self {
        Ray { x, y, z }
    }

    /// Straight ray `origin + t * direction`
    pub fn linear(origin: [f64; 3], direction: [f64; 3]) -> Self {
        Ray {
            x: Polynomial::linear(origin[0], direction[0]),
            y: Polynomial::linear(origin[1], direction[1]),
            z: Polynomial::linear(origin[2], direction[2]),
        }
    }

    pub fn coordinate(&self, var: Var) -> &Polynomial {
        match var {
            Var::X => &self.x,
            Var::Y => &self.y,
            Var::Z => &self.z,
        }
    }

    /// Point on the ray at parameter `t`
    pub fn at(&self, t: f64) -> [f64; 3] {
        [self.x.eval(t), self.y.eval(t), self.z.eval(t)]
    }
}

/// Specialization pass
pub struct RayExpansion<'a> {
    ray: &'a Ray,
    folder: Evaluator<'a>,
}

impl<'a> RayExpansion<'a> {
    pub fn new(ray: &'a Ray, params: &'a Parameters) -> Self {
        RayExpansion {
            ray,
            folder: Evaluator::at_origin(params),
        }
    }

    /// Reduce a scalar subtree to a constant
    fn fold(&mut self, scalar: &Scalar) -> Result<f64> {
        scalar.accept(&mut self.folder)
    }
}

impl ExprVisitor for RayExpansion<'_> {
    type Output = Result<Polynomial>;

    fn visit_addition(&mut self, left: &Expr, right: &Expr) -> Result<Polynomial> {
        Ok(left.accept(self)? + right.accept(self)?)
    }

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) -> Result<Polynomial> {
        Ok(left.accept(self)? - right.accept(self)?)
    }

    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) -> Result<Polynomial> {
        Ok(left.accept(self)? * right.accept(self)?)
    }

    fn visit_power(&mut self, base: &Expr, exponent: u32) -> Result<Polynomial> {
        Ok(base.accept(self)?.pow(exponent))
    }

    fn visit_negation(&mut self, operand: &Expr) -> Result<Polynomial> {
        Ok(-operand.accept(self)?)
    }

    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) -> Result<Polynomial> {
        let dividend = dividend.accept(self)?;
        let divisor = self.fold(divisor)?;
        if divisor == 0.0 || !divisor.is_finite() {
            log::debug!("scalar divisor folded to {}, coefficients degrade", divisor);
        }
        Ok(dividend.div_scalar(divisor))
    }

    fn visit_variable(&mut self, var: Var) -> Result<Polynomial> {
        Ok(self.ray.coordinate(var).clone())
    }

    fn visit_literal(&mut self, value: f64) -> Result<Polynomial> {
        Ok(Polynomial::constant(value))
    }

    // A bare parameter is only accepted inside a scalar operator subtree
    fn visit_parameter(&mut self, name: &str) -> Result<Polynomial> {
        Err(AlgebraError::unsupported(format!(
            "named parameter '{}' used directly as a polynomial operand",
            name
        )))
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: &Scalar) -> Result<Polynomial> {
        let value = self.folder.visit_unary(op, operand)?;
        Ok(Polynomial::constant(value))
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Scalar, right: &Scalar) -> Result<Polynomial> {
        let value = self.folder.visit_binary(op, left, right)?;
        Ok(Polynomial::constant(value))
    }
}

/// Specialize `expr` along `ray`, producing a polynomial in the ray parameter
pub fn specialize(expr: &Expr, ray: &Ray, params: &Parameters) -> Result<Polynomial> {
    let poly = expr.accept(&mut RayExpansion::new(ray, params))?;
    log::debug!("specialized {} to degree {} polynomial", expr, poly.degree());
    Ok(poly)
}
