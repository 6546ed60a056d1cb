//! Expression trees for implicit surfaces `f(x, y, z) = 0`
//!
//! Two families of nodes live here:
//! - [`Expr`]: the polynomial family, built from the spatial variables
//!   x, y, z with `+`, `-`, `*`, integer powers, negation and division by a
//!   scalar.
//! - [`Scalar`]: expressions over constants and named parameters only.
//!   A scalar subtree can be embedded as a leaf of a polynomial tree and is
//!   the only thing a polynomial may be divided by.
//!
//! Keeping the families in separate types means a spatial variable can never
//! end up inside a scalar subtree.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{AlgebraError, Result};

/// One of the three surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    X,
    Y,
    Z,
}

impl Var {
    /// All spatial variables in x, y, z order
    pub const ALL: [Var; 3] = [Var::X, Var::Y, Var::Z];

    pub fn name(self) -> &'static str {
        match self {
            Var::X => "x",
            Var::Y => "y",
            Var::Z => "z",
        }
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unary operators of the scalar family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Exp,
    Log,
    Sqrt,
    Ceil,
    Floor,
    Abs,
    Sign,
}

impl UnaryOp {
    /// Function name as it appears in surface equations
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
            UnaryOp::Exp => "exp",
            UnaryOp::Log => "log",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Ceil => "ceil",
            UnaryOp::Floor => "floor",
            UnaryOp::Abs => "abs",
            UnaryOp::Sign => "sign",
        }
    }

    /// Apply the operator with IEEE semantics (domain errors give NaN)
    pub fn apply(self, v: f64) -> f64 {
        match self {
            UnaryOp::Neg => -v,
            UnaryOp::Sin => v.sin(),
            UnaryOp::Cos => v.cos(),
            UnaryOp::Tan => v.tan(),
            UnaryOp::Asin => v.asin(),
            UnaryOp::Acos => v.acos(),
            UnaryOp::Atan => v.atan(),
            UnaryOp::Exp => v.exp(),
            UnaryOp::Log => v.ln(),
            UnaryOp::Sqrt => v.sqrt(),
            UnaryOp::Ceil => v.ceil(),
            UnaryOp::Floor => v.floor(),
            UnaryOp::Abs => v.abs(),
            // f64::signum maps ±0 to ±1; zero keeps its sign here
            UnaryOp::Sign => {
                if v == 0.0 || v.is_nan() {
                    v
                } else {
                    v.signum()
                }
            }
        }
    }
}

/// Binary operators of the scalar family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Atan2,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
            BinaryOp::Atan2 => "atan2",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinaryOp::Add => a + b,
            BinaryOp::Sub => a - b,
            BinaryOp::Mul => a * b,
            BinaryOp::Div => a / b,
            BinaryOp::Pow => a.powf(b),
            BinaryOp::Atan2 => a.atan2(b),
        }
    }
}

/// Scalar expression over constants and named parameters
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Real constant
    Literal(f64),

    /// Named parameter, resolved through parameter bindings
    Param(String),

    /// Unary operator applied to a scalar operand
    Unary(UnaryOp, Box<Scalar>),

    /// Binary operator applied to two scalar operands
    Binary(BinaryOp, Box<Scalar>, Box<Scalar>),
}

impl Scalar {
    pub fn literal(v: f64) -> Self {
        Scalar::Literal(v)
    }

    pub fn param(name: impl Into<String>) -> Self {
        Scalar::Param(name.into())
    }

    pub fn unary(op: UnaryOp, operand: Scalar) -> Self {
        Scalar::Unary(op, Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Scalar, right: Scalar) -> Self {
        Scalar::Binary(op, Box::new(left), Box::new(right))
    }

    /// Embed this scalar as a leaf of a polynomial expression
    pub fn into_expr(self) -> Expr {
        Expr::Scalar(self)
    }
}

/// Polynomial expression in the spatial variables x, y, z
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Addition
    Add(Box<Expr>, Box<Expr>),

    /// Subtraction
    Sub(Box<Expr>, Box<Expr>),

    /// Multiplication
    Mul(Box<Expr>, Box<Expr>),

    /// Integer power, the exponent is never negative
    Pow { base: Box<Expr>, exponent: u32 },

    /// Negation
    Neg(Box<Expr>),

    /// Division by an expression that does not depend on x, y, z
    ScalarDiv {
        dividend: Box<Expr>,
        divisor: Scalar,
    },

    /// Spatial variable
    Var(Var),

    /// Scalar subtree used as a constant leaf
    Scalar(Scalar),
}

impl Expr {
    // Convenience constructors

    /// Create a constant leaf
    pub fn number(n: f64) -> Self {
        Expr::Scalar(Scalar::Literal(n))
    }

    /// Create a named-parameter leaf
    pub fn param(name: impl Into<String>) -> Self {
        Expr::Scalar(Scalar::param(name))
    }

    pub fn var(v: Var) -> Self {
        Expr::Var(v)
    }

    pub fn x() -> Self {
        Expr::Var(Var::X)
    }

    pub fn y() -> Self {
        Expr::Var(Var::Y)
    }

    pub fn z() -> Self {
        Expr::Var(Var::Z)
    }

    pub fn add_expr(left: Expr, right: Expr) -> Self {
        Expr::Add(Box::new(left), Box::new(right))
    }

    pub fn sub_expr(left: Expr, right: Expr) -> Self {
        Expr::Sub(Box::new(left), Box::new(right))
    }

    pub fn mul_expr(left: Expr, right: Expr) -> Self {
        Expr::Mul(Box::new(left), Box::new(right))
    }

    pub fn neg_expr(operand: Expr) -> Self {
        Expr::Neg(Box::new(operand))
    }

    /// Create a power node with a non-negative exponent
    pub fn pow(base: Expr, exponent: u32) -> Self {
        Expr::Pow {
            base: Box::new(base),
            exponent,
        }
    }

    /// Create a power node from a signed exponent
    ///
    /// Negative exponents would leave the polynomial ring and are rejected.
    pub fn try_pow(base: Expr, exponent: i64) -> Result<Self> {
        let exponent =
            u32::try_from(exponent).map_err(|_| AlgebraError::NegativeExponent(exponent))?;
        Ok(Expr::pow(base, exponent))
    }

    /// Divide by a scalar expression
    pub fn div_scalar(dividend: Expr, divisor: Scalar) -> Self {
        Expr::ScalarDiv {
            dividend: Box::new(dividend),
            divisor,
        }
    }

    /// Constant value if this node is a scalar literal
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Expr::Scalar(Scalar::Literal(n)) => Some(*n),
            _ => None,
        }
    }
}

impl From<Var> for Expr {
    fn from(v: Var) -> Self {
        Expr::Var(v)
    }
}

impl From<Scalar> for Expr {
    fn from(s: Scalar) -> Self {
        Expr::Scalar(s)
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::number(n)
    }
}

// Operator overloads for building trees in code

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::add_expr(self, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::sub_expr(self, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::mul_expr(self, rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::neg_expr(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_pow_rejects_negative_exponent() {
        assert_eq!(
            Expr::try_pow(Expr::x(), -2),
            Err(AlgebraError::NegativeExponent(-2))
        );
        assert_eq!(Expr::try_pow(Expr::x(), 3), Ok(Expr::pow(Expr::x(), 3)));
        assert!(Expr::try_pow(Expr::x(), i64::from(u32::MAX) + 1).is_err());
    }

    #[test]
    fn test_operator_overloads_build_binary_nodes() {
        let expr = Expr::x() * Expr::y() + Expr::number(1.0);
        assert_eq!(
            expr,
            Expr::add_expr(Expr::mul_expr(Expr::x(), Expr::y()), Expr::number(1.0))
        );
        assert_eq!(-Expr::z(), Expr::Neg(Box::new(Expr::z())));
    }

    #[test]
    fn test_sign_keeps_signed_zero() {
        assert_eq!(UnaryOp::Sign.apply(-3.5), -1.0);
        assert_eq!(UnaryOp::Sign.apply(2.0), 1.0);
        assert!(UnaryOp::Sign.apply(0.0) == 0.0);
        assert!(UnaryOp::Sign.apply(-0.0).is_sign_negative());
        assert!(UnaryOp::Sign.apply(f64::NAN).is_nan());
    }
}
