// Differentiation pass - partial derivatives with respect to x, y or z
//
// The output is a plain structural tree: no terms are folded or dropped, so
// `d(x + 1)/dx` comes back as `1 + 0`. Scalar subtrees never depend on the
// spatial variables and differentiate to the constant 0; a scalar divisor is
// carried over untouched.

use crate::ast::{BinaryOp, Expr, Scalar, UnaryOp, Var};
use crate::visitor::ExprVisitor;

/// Differentiation pass for one target variable
#[derive(Debug, Clone, Copy)]
pub struct Differentiator {
    var: Var,
}

impl Differentiator {
    pub fn new(var: Var) -> Self {
        Differentiator { var }
    }

    pub fn variable(&self) -> Var {
        self.var
    }

    pub fn set_variable(&mut self, var: Var) {
        self.var = var;
    }
}

impl ExprVisitor for Differentiator {
    type Output = Expr;

    // Sum rule: (u + v)' = u' + v'
    fn visit_addition(&mut self, left: &Expr, right: &Expr) -> Expr {
        Expr::add_expr(left.accept(self), right.accept(self))
    }

    fn visit_subtraction(&mut self, left: &Expr, right: &Expr) -> Expr {
        Expr::sub_expr(left.accept(self), right.accept(self))
    }

    // Product rule: (u * v)' = u' * v + u * v'
    fn visit_multiplication(&mut self, left: &Expr, right: &Expr) -> Expr {
        let u_prime = left.accept(self);
        let v_prime = right.accept(self);
        Expr::add_expr(
            Expr::mul_expr(u_prime, right.clone()),
            Expr::mul_expr(left.clone(), v_prime),
        )
    }

    // Power rule: (u^n)' = n * u^(n-1) * u'
    //
    // n = 0 is the constant 0 so no u^(-1) node is ever built. For n = 1 and
    // n = 2 the factor u^(n-1) is 1 and u respectively and is written without
    // a power node.
    fn visit_power(&mut self, base: &Expr, exponent: u32) -> Expr {
        match exponent {
            0 => Expr::number(0.0),
            1 => base.accept(self),
            2 => {
                let u_prime = base.accept(self);
                Expr::mul_expr(Expr::mul_expr(Expr::number(2.0), base.clone()), u_prime)
            }
            n => {
                let u_prime = base.accept(self);
                Expr::mul_expr(
                    Expr::mul_expr(Expr::number(f64::from(n)), Expr::pow(base.clone(), n - 1)),
                    u_prime,
                )
            }
        }
    }

    fn visit_negation(&mut self, operand: &Expr) -> Expr {
        Expr::neg_expr(operand.accept(self))
    }

    // (u / c)' = u' / c
    fn visit_scalar_division(&mut self, dividend: &Expr, divisor: &Scalar) -> Expr {
        Expr::div_scalar(dividend.accept(self), divisor.clone())
    }

    fn visit_variable(&mut self, var: Var) -> Expr {
        if var == self.var {
            Expr::number(1.0)
        } else {
            Expr::number(0.0)
        }
    }

    fn visit_literal(&mut self, _value: f64) -> Expr {
        Expr::number(0.0)
    }

    fn visit_parameter(&mut self, _name: &str) -> Expr {
        Expr::number(0.0)
    }

    fn visit_unary(&mut self, _op: UnaryOp, _operand: &Scalar) -> Expr {
        Expr::number(0.0)
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Scalar, _right: &Scalar) -> Expr {
        Expr::number(0.0)
    }
}

impl Expr {
    /// Partial derivative of this expression with respect to `var`
    ///
    /// # Example
    /// ```
    /// use surface_algebra::{EvalContext, Expr, Var, evaluate};
    ///
    /// let expr = Expr::pow(Expr::x(), 3) * Expr::y();
    /// let dx = expr.derive(Var::X);
    /// let ctx = EvalContext::new(2.0, 5.0, 0.0);
    /// assert_eq!(evaluate(&dx, &ctx).unwrap(), 60.0);
    /// ```
    pub fn derive(&self, var: Var) -> Expr {
        self.accept(&mut Differentiator::new(var))
    }
}

/// Partial derivative of `expr` with respect to `var`
pub fn differentiate(expr: &Expr, var: Var) -> Expr {
    log::trace!("differentiating {} with respect to {}", expr, var);
    expr.derive(var)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{EvalContext, evaluate};

    fn eval_at(expr: &Expr, x: f64, y: f64, z: f64) -> f64 {
        evaluate(expr, &EvalContext::new(x, y, z)).unwrap()
    }

    #[test]
    fn test_variable_rules() {
        assert_eq!(Expr::x().derive(Var::X), Expr::number(1.0));
        assert_eq!(Expr::y().derive(Var::X), Expr::number(0.0));
        assert_eq!(Expr::z().derive(Var::Z), Expr::number(1.0));
    }

    #[test]
    fn test_sum_keeps_shape() {
        let d = (Expr::x() - Expr::y()).derive(Var::Y);
        assert_eq!(d, Expr::sub_expr(Expr::number(0.0), Expr::number(1.0)));
    }

    #[test]
    fn test_product_rule_structure() {
        let d = (Expr::x() * Expr::y()).derive(Var::X);
        let expected = Expr::add_expr(
            Expr::mul_expr(Expr::number(1.0), Expr::y()),
            Expr::mul_expr(Expr::x(), Expr::number(0.0)),
        );
        assert_eq!(d, expected);
    }

    #[test]
    fn test_square_uses_literal_two() {
        let d = Expr::pow(Expr::y(), 2).derive(Var::Y);
        let expected = Expr::mul_expr(
            Expr::mul_expr(Expr::number(2.0), Expr::y()),
            Expr::number(1.0),
        );
        assert_eq!(d, expected);
    }

    #[test]
    fn test_general_power_lowers_exponent() {
        let d = Expr::pow(Expr::x(), 4).derive(Var::X);
        let expected = Expr::mul_expr(
            Expr::mul_expr(Expr::number(4.0), Expr::pow(Expr::x(), 3)),
            Expr::number(1.0),
        );
        assert_eq!(d, expected);
    }

    #[test]
    fn test_power_exponent_zero_and_one() {
        // u^0 is constant, u^1 differentiates like u itself
        assert_eq!(Expr::pow(Expr::x(), 0).derive(Var::X), Expr::number(0.0));
        assert_eq!(Expr::pow(Expr::x(), 1).derive(Var::X), Expr::number(1.0));
        assert_eq!(Expr::pow(Expr::y(), 1).derive(Var::X), Expr::number(0.0));

        let scaled = Expr::pow(Expr::number(3.0) * Expr::x(), 1).derive(Var::X);
        assert_eq!(eval_at(&scaled, 0.7, 0.0, 0.0), 3.0);
    }

    #[test]
    fn test_scalar_division_passes_divisor_through() {
        let divisor = Scalar::binary(BinaryOp::Mul, Scalar::literal(2.0), Scalar::param("r"));
        let d = Expr::div_scalar(Expr::pow(Expr::x(), 2), divisor.clone()).derive(Var::X);
        match d {
            Expr::ScalarDiv { divisor: kept, .. } => assert_eq!(kept, divisor),
            other => panic!("expected a scalar division, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_nodes_are_constant() {
        let cases = [
            Expr::number(5.0),
            Expr::param("a"),
            Expr::Scalar(Scalar::unary(UnaryOp::Cos, Scalar::param("a"))),
            Expr::Scalar(Scalar::binary(
                BinaryOp::Div,
                Scalar::literal(1.0),
                Scalar::param("b"),
            )),
        ];
        for case in cases {
            for var in Var::ALL {
                assert_eq!(case.derive(var), Expr::number(0.0));
            }
        }
    }

    #[test]
    fn test_chain_through_nested_power() {
        // d/dx (x^2 + 1)^3 = 3 (x^2 + 1)^2 * 2x
        let expr = Expr::pow(Expr::pow(Expr::x(), 2) + Expr::number(1.0), 3);
        let d = differentiate(&expr, Var::X);
        let x: f64 = 1.5;
        let expected = 3.0 * (x * x + 1.0).powi(2) * 2.0 * x;
        assert!((eval_at(&d, x, 0.0, 0.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_negation() {
        let d = (-Expr::z()).derive(Var::Z);
        assert_eq!(d, Expr::neg_expr(Expr::number(1.0)));
    }
}
