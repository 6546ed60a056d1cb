//! Double-dispatch traversal over expression trees
//!
//! Every transformation pass implements [`ExprVisitor`], which has one method
//! per node variant and a pass-specific `Output`. [`Expr::accept`] and
//! [`Scalar::accept`] pick the method matching the node's own variant, so the
//! compiler checks that a pass covers every variant.
//!
//! Passes recurse by calling `accept` on the operands they receive.
//!
//! # Example
//! ```
//! use surface_algebra::{Expr, visitor::{ExprVisitor, NodeCounter}};
//!
//! let expr = Expr::pow(Expr::x(), 2) + Expr::y();
//! let mut counter = NodeCounter::default();
//! expr.accept(&mut counter);
//! assert_eq!(counter.count, 4); // +, ^, x, y
//! ```

use rustc_hash::FxHashSet;

use crate::ast::{BinaryOp, Expr, Scalar, UnaryOp, Var};
use crate::error::{AlgebraError, Result};

/// Default maximum expression nesting depth accepted by [`check_depth`]
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// One operation per expression variant, returning a pass-specific result
pub trait ExprVisitor {
    type Output;

    fn visit_addition(&mut self, left: &Expr, right: &Expr) -> Self::Output;

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) -> Self::Output;

    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) -> Self::Output;

    fn visit_power(&mut self, base: &Expr, exponent: u32) -> Self::Output;

    fn visit_negation(&mut self, operand: &Expr) -> Self::Output;

    /// Division of a polynomial by a scalar-only divisor
    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) -> Self::Output;

    fn visit_variable(&mut self, var: Var) -> Self::Output;

    fn visit_literal(&mut self, value: f64) -> Self::Output;

    fn visit_parameter(&mut self, name: &str) -> Self::Output;

    fn visit_unary(&mut self, op: UnaryOp, operand: &Scalar) -> Self::Output;

    fn visit_binary(&mut self, op: BinaryOp, left: &Scalar, right: &Scalar) -> Self::Output;
}

impl Expr {
    /// Invoke the visitor operation matching this node's variant
    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Add(l, r) => visitor.visit_addition(l, r),
            Expr::Sub(l, r) => visitor.visit_subtraction(l, r),
            Expr::Mul(l, r) => visitor.visit_multiplication(l, r),
            Expr::Pow { base, exponent } => visitor.visit_power(base, *exponent),
            Expr::Neg(operand) => visitor.visit_negation(operand),
            Expr::ScalarDiv { dividend, divisor } => {
                visitor.visit_scalar_division(dividend, divisor)
            }
            Expr::Var(v) => visitor.visit_variable(*v),
            Expr::Scalar(s) => s.accept(visitor),
        }
    }
}

impl Scalar {
    /// Invoke the visitor operation matching this node's variant
    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Scalar::Literal(n) => visitor.visit_literal(*n),
            Scalar::Param(name) => visitor.visit_parameter(name),
            Scalar::Unary(op, operand) => visitor.visit_unary(*op, operand),
            Scalar::Binary(op, l, r) => visitor.visit_binary(*op, l, r),
        }
    }
}

/// A simple visitor that counts nodes
#[derive(Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    type Output = ();

    fn visit_addition(&mut self, left: &Expr, right: &Expr) {
        self.count += 1;
        left.accept(self);
        right.accept(self);
    }

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) {
        self.count += 1;
        left.accept(self);
        right.accept(self);
    }

    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) {
        self.count += 1;
        left.accept(self);
        right.accept(self);
    }

    fn visit_power(&mut self, base: &Expr, _exponent: u32) {
        self.count += 1;
        base.accept(self);
    }

    fn visit_negation(&mut self, operand: &Expr) {
        self.count += 1;
        operand.accept(self);
    }

    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) {
        self.count += 1;
        dividend.accept(self);
        divisor.accept(self);
    }

    fn visit_variable(&mut self, _var: Var) {
        self.count += 1;
    }

    fn visit_literal(&mut self, _value: f64) {
        self.count += 1;
    }

    fn visit_parameter(&mut self, _name: &str) {
        self.count += 1;
    }

    fn visit_unary(&mut self, _op: UnaryOp, operand: &Scalar) {
        self.count += 1;
        operand.accept(self);
    }

    fn visit_binary(&mut self, _op: BinaryOp, left: &Scalar, right: &Scalar) {
        self.count += 1;
        left.accept(self);
        right.accept(self);
    }
}

/// A visitor that collects the names of all referenced parameters
#[derive(Default)]
pub struct ParameterCollector {
    pub parameters: FxHashSet<String>,
}

impl ExprVisitor for ParameterCollector {
    type Output = ();

    fn visit_addition(&mut self, left: &Expr, right: &Expr) {
        left.accept(self);
        right.accept(self);
    }

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) {
        left.accept(self);
        right.accept(self);
    }

    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) {
        left.accept(self);
        right.accept(self);
    }

    fn visit_power(&mut self, base: &Expr, _exponent: u32) {
        base.accept(self);
    }

    fn visit_negation(&mut self, operand: &Expr) {
        operand.accept(self);
    }

    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) {
        dividend.accept(self);
        divisor.accept(self);
    }

    fn visit_variable(&mut self, _var: Var) {}

    fn visit_literal(&mut self, _value: f64) {}

    fn visit_parameter(&mut self, name: &str) {
        self.parameters.insert(name.to_string());
    }

    fn visit_unary(&mut self, _op: UnaryOp, operand: &Scalar) {
        operand.accept(self);
    }

    fn visit_binary(&mut self, _op: BinaryOp, left: &Scalar, right: &Scalar) {
        left.accept(self);
        right.accept(self);
    }
}

/// Measures nesting depth, giving up one level past `limit`
///
/// The cutoff keeps the measurement itself from recursing arbitrarily deep.
pub struct DepthMeter {
    limit: usize,
    level: usize,
}

impl DepthMeter {
    pub fn bounded(limit: usize) -> Self {
        DepthMeter { limit, level: 0 }
    }

    fn descend<'e>(&mut self, children: impl IntoIterator<Item = Child<'e>>) -> usize {
        if self.level > self.limit {
            return 1;
        }
        self.level += 1;
        let deepest = children
            .into_iter()
            .map(|child| match child {
                Child::Expr(e) => e.accept(self),
                Child::Scalar(s) => s.accept(self),
            })
            .max()
            .unwrap_or(0);
        self.level -= 1;
        deepest + 1
    }
}

enum Child<'e> {
    Expr(&'e Expr),
    Scalar(&'e Scalar),
}

impl ExprVisitor for DepthMeter {
    type Output = usize;

    fn visit_addition(&mut self, left: &Expr, right: &Expr) -> usize {
        self.descend([Child::Expr(left), Child::Expr(right)])
    }

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) -> usize {
        self.descend([Child::Expr(left), Child::Expr(right)])
    }

    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) -> usize {
        self.descend([Child::Expr(left), Child::Expr(right)])
    }

    fn visit_power(&mut self, base: &Expr, _exponent: u32) -> usize {
        self.descend([Child::Expr(base)])
    }

    fn visit_negation(&mut self, operand: &Expr) -> usize {
        self.descend([Child::Expr(operand)])
    }

    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) -> usize {
        self.descend([Child::Expr(dividend), Child::Scalar(divisor)])
    }

    fn visit_variable(&mut self, _var: Var) -> usize {
        1
    }

    fn visit_literal(&mut self, _value: f64) -> usize {
        1
    }

    fn visit_parameter(&mut self, _name: &str) -> usize {
        1
    }

    fn visit_unary(&mut self, _op: UnaryOp, operand: &Scalar) -> usize {
        self.descend([Child::Scalar(operand)])
    }

    fn visit_binary(&mut self, _op: BinaryOp, left: &Scalar, right: &Scalar) -> usize {
        self.descend([Child::Scalar(left), Child::Scalar(right)])
    }
}

/// Fail if `expr` nests deeper than `limit` levels
///
/// The passes recurse once per level, so callers bound untrusted input with
/// this before evaluating, differentiating or specializing it.
pub fn check_depth(expr: &Expr, limit: usize) -> Result<()> {
    let depth = expr.accept(&mut DepthMeter::bounded(limit));
    if depth > limit {
        return Err(AlgebraError::MaxDepthExceeded { depth, limit });
    }
    Ok(())
}
