//! Symbolic algebra for implicit surfaces
//!
//! Expression trees describe trivariate polynomial surfaces `f(x, y, z) = 0`
//! whose coefficients may contain named scalar parameters. Three passes work
//! on the same tree:
//! - **evaluation** to a number at a point ([`evaluate`]),
//! - **differentiation** with respect to x, y or z ([`differentiate`],
//!   [`gradient`]) for surface normals,
//! - **specialization** along a ray `x(t), y(t), z(t)` to a single-variable
//!   [`Polynomial`] in `t` ([`specialize`]) for root finding.
//!
//! Passes never mutate their input and are total over well-formed trees.
//! New passes plug in through [`visitor::ExprVisitor`].
//!
//! # Usage Examples
//!
//! ```
//! use surface_algebra::{
//!     BinaryOp, EvalContext, Expr, Parameters, Ray, Scalar, Var, differentiate, evaluate,
//!     specialize,
//! };
//!
//! // x^2 + y^2 + z^2 - r^2
//! let r_sq = Scalar::binary(BinaryOp::Pow, Scalar::param("r"), Scalar::literal(2.0));
//! let sphere = Expr::pow(Expr::x(), 2) + Expr::pow(Expr::y(), 2) + Expr::pow(Expr::z(), 2)
//!     - r_sq.into_expr();
//!
//! let params: Parameters = [("r", 2.0)].into_iter().collect();
//! let ray = Ray::linear([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]);
//! let poly = specialize(&sphere, &ray, &params).unwrap();
//! assert_eq!(poly.coefficients(), &[-4.0, 0.0, 1.0]);
//!
//! let dx = differentiate(&sphere, Var::X);
//! let ctx = EvalContext::new(2.0, 0.0, 0.0).with_parameters(params);
//! assert_eq!(evaluate(&dx, &ctx).unwrap(), 4.0);
//! ```

mod ast;
mod differentiation;
mod display;
mod error;
mod evaluator;
mod expansion;
mod helpers;
mod poly;
pub mod visitor;

#[cfg(feature = "parallel")]
pub mod parallel;


// Re-export key types for easier usage
pub use ast::{BinaryOp, Expr, Scalar, UnaryOp, Var};
pub use differentiation::{Differentiator, differentiate};
pub use error::{AlgebraError, Result};
pub use evaluator::{EvalContext, Evaluator, Parameters, evaluate, evaluate_scalar};
pub use expansion::{Ray, RayExpansion, specialize};
pub use helpers::{gradient, normal_at};
pub use poly::Polynomial;
pub use visitor::{DEFAULT_MAX_DEPTH, check_depth};
