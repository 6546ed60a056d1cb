//! Numeric evaluation of expression trees
//!
//! Inputs come from an explicit [`EvalContext`]: values for x, y, z plus a
//! set of named [`Parameters`]. The context is only read during a call, so a
//! shared `&EvalContext` can serve any number of evaluations.
//!
//! Two lookups with different strictness exist on purpose:
//! - tree evaluation fails with [`AlgebraError::UnboundParameter`] when it
//!   meets a parameter that has no value;
//! - [`EvalContext::parameter_value`] / [`Parameters::value`] are lenient and
//!   return NaN for an unknown name.
//!
//! # Example
//! ```
//! use surface_algebra::{EvalContext, Expr, evaluate};
//!
//! let sphere = Expr::pow(Expr::x(), 2) + Expr::pow(Expr::y(), 2) - Expr::param("r");
//! let mut ctx = EvalContext::new(3.0, 4.0, 0.0);
//! ctx.set_parameter("r", 25.0);
//! assert_eq!(evaluate(&sphere, &ctx).unwrap(), 0.0);
//! ```

use rustc_hash::FxHashMap;

use crate::ast::{BinaryOp, Expr, Scalar, UnaryOp, Var};
use crate::error::{AlgebraError, Result};
use crate::visitor::ExprVisitor;

/// Name → value bindings for named parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: FxHashMap<String, f64>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Lenient lookup: NaN when `name` is unbound
    pub fn value(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(f64::NAN)
    }

    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.values.remove(name)
    }

    /// Names of all bound parameters, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Parameters {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Everything an evaluation reads: the point (x, y, z) and parameter values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalContext {
    x: f64,
    y: f64,
    z: f64,
    params: Parameters,
}

impl EvalContext {
    /// Context at the given point with no parameters bound
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        EvalContext {
            x,
            y,
            z,
            params: Parameters::default(),
        }
    }

    /// Replace the parameter bindings
    pub fn with_parameters(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Value bound to a spatial variable
    pub fn coordinate(&self, var: Var) -> f64 {
        match var {
            Var::X => self.x,
            Var::Y => self.y,
            Var::Z => self.z,
        }
    }

    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    pub fn set_z(&mut self, z: f64) {
        self.z = z;
    }

    pub fn set_xyz(&mut self, x: f64, y: f64, z: f64) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: f64) {
        self.params.set(name, value);
    }

    /// Lenient parameter query: NaN when `name` is unbound
    pub fn parameter_value(&self, name: &str) -> f64 {
        self.params.value(name)
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    pub fn parameters_mut(&mut self) -> &mut Parameters {
        &mut self.params
    }
}

/// Evaluation pass
///
/// Borrows its parameters; the point is copied in at construction.
pub struct Evaluator<'a> {
    point: [f64; 3],
    params: &'a Parameters,
}

impl<'a> Evaluator<'a> {
    pub fn new(ctx: &'a EvalContext) -> Self {
        Evaluator {
            point: [ctx.x, ctx.y, ctx.z],
            params: &ctx.params,
        }
    }

    /// Evaluator at an explicit point, borrowing separate parameters
    pub fn at(point: [f64; 3], params: &'a Parameters) -> Self {
        Evaluator { point, params }
    }

    /// Evaluator pinned at x = y = z = 0, used to fold scalar subtrees
    pub fn at_origin(params: &'a Parameters) -> Self {
        Evaluator::at([0.0; 3], params)
    }
}

impl ExprVisitor for Evaluator<'_> {
    type Output = Result<f64>;

    fn visit_addition(&mut self, left: &Expr, right: &Expr) -> Result<f64> {
        Ok(left.accept(self)? + right.accept(self)?)
    }

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) -> Result<f64> {
        Ok(left.accept(self)? - right.accept(self)?)
    }

    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) -> Result<f64> {
        Ok(left.accept(self)? * right.accept(self)?)
    }

    fn visit_power(&mut self, base: &Expr, exponent: u32) -> Result<f64> {
        Ok(base.accept(self)?.powf(f64::from(exponent)))
    }

    fn visit_negation(&mut self, operand: &Expr) -> Result<f64> {
        Ok(-operand.accept(self)?)
    }

    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) -> Result<f64> {
        Ok(dividend.accept(self)? / divisor.accept(self)?)
    }

    fn visit_variable(&mut self, var: Var) -> Result<f64> {
        Ok(match var {
            Var::X => self.point[0],
            Var::Y => self.point[1],
            Var::Z => self.point[2],
        })
    }

    fn visit_literal(&mut self, value: f64) -> Result<f64> {
        Ok(value)
    }

    fn visit_parameter(&mut self, name: &str) -> Result<f64> {
        self.params
            .get(name)
            .ok_or_else(|| AlgebraError::unbound(name))
    }

    fn visit_unary(&mut self, op: UnaryOp, operand: &Scalar) -> Result<f64> {
        Ok(op.apply(operand.accept(self)?))
    }

    fn visit_binary(&mut self, op: BinaryOp, left: &Scalar, right: &Scalar) -> Result<f64> {
        let a = left.accept(self)?;
        let b = right.accept(self)?;
        Ok(op.apply(a, b))
    }
}

/// Evaluate `expr` at the context's point
pub fn evaluate(expr: &Expr, ctx: &EvalContext) -> Result<f64> {
    log::trace!("evaluating {} at ({}, {}, {})", expr, ctx.x, ctx.y, ctx.z);
    expr.accept(&mut Evaluator::new(ctx))
}

/// Evaluate a scalar subtree; it cannot depend on x, y, z
pub fn evaluate_scalar(scalar: &Scalar, params: &Parameters) -> Result<f64> {
    scalar.accept(&mut Evaluator::at_origin(params))
}
