// Display formatting for expression trees
//
// Infix output with the fewest parentheses that keep the tree's grouping:
// `x^2 + y^2 - r^2`, `(x + 1) * y`, `x - (y - z)`.
use crate::ast::{BinaryOp, Expr, Scalar, UnaryOp};
use std::fmt;

// Binding strength, loosest first
const PREC_SUM: u8 = 1;
const PREC_PRODUCT: u8 = 2;
const PREC_PREFIX: u8 = 3;
const PREC_POWER: u8 = 4;
const PREC_ATOM: u8 = 5;

fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        if n > 0.0 {
            write!(f, "Infinity")
        } else {
            write!(f, "-Infinity")
        }
    } else if n.fract() == 0.0 && n.abs() < 1e10 {
        // Display as integer if no fractional part
        write!(f, "{}", n as i64)
    } else {
        write!(f, "{}", n)
    }
}

/// Write `inner` wrapped in parentheses when it binds looser than `min`
fn wrap(f: &mut fmt::Formatter<'_>, inner: &dyn Node, min: u8) -> fmt::Result {
    if inner.precedence() < min {
        write!(f, "(")?;
        inner.write(f)?;
        write!(f, ")")
    } else {
        inner.write(f)
    }
}

trait Node {
    fn precedence(&self) -> u8;
    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl Node for Expr {
    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => PREC_SUM,
            Expr::Mul(..) | Expr::ScalarDiv { .. } => PREC_PRODUCT,
            Expr::Neg(_) => PREC_PREFIX,
            Expr::Pow { .. } => PREC_POWER,
            Expr::Var(_) => PREC_ATOM,
            Expr::Scalar(s) => s.precedence(),
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Add(u, v) => {
                wrap(f, &**u, PREC_SUM)?;
                write!(f, " + ")?;
                wrap(f, &**v, PREC_SUM)
            }
            Expr::Sub(u, v) => {
                wrap(f, &**u, PREC_SUM)?;
                write!(f, " - ")?;
                wrap(f, &**v, PREC_PRODUCT)
            }
            Expr::Mul(u, v) => {
                wrap(f, &**u, PREC_PRODUCT)?;
                write!(f, " * ")?;
                wrap(f, &**v, PREC_PREFIX)
            }
            Expr::ScalarDiv { dividend, divisor } => {
                wrap(f, &**dividend, PREC_PRODUCT)?;
                write!(f, " / ")?;
                wrap(f, divisor, PREC_PREFIX + 1)
            }
            Expr::Neg(u) => {
                write!(f, "-")?;
                wrap(f, &**u, PREC_PREFIX + 1)
            }
            Expr::Pow { base, exponent } => {
                wrap(f, &**base, PREC_ATOM)?;
                write!(f, "^{}", exponent)
            }
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Scalar(s) => s.write(f),
        }
    }
}

impl Node for Scalar {
    fn precedence(&self) -> u8 {
        match self {
            Scalar::Literal(n) if n.is_sign_negative() && !n.is_nan() => PREC_PREFIX,
            Scalar::Literal(_) | Scalar::Param(_) => PREC_ATOM,
            Scalar::Unary(UnaryOp::Neg, _) => PREC_PREFIX,
            Scalar::Unary(..) => PREC_ATOM,
            Scalar::Binary(op, ..) => match op {
                BinaryOp::Add | BinaryOp::Sub => PREC_SUM,
                BinaryOp::Mul | BinaryOp::Div => PREC_PRODUCT,
                BinaryOp::Pow => PREC_POWER,
                BinaryOp::Atan2 => PREC_ATOM,
            },
        }
    }

    fn write(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Literal(n) => format_number(f, *n),
            Scalar::Param(name) => write!(f, "{}", name),
            Scalar::Unary(UnaryOp::Neg, a) => {
                write!(f, "-")?;
                wrap(f, &**a, PREC_PREFIX + 1)
            }
            Scalar::Unary(op, a) => {
                write!(f, "{}(", op.name())?;
                a.write(f)?;
                write!(f, ")")
            }
            Scalar::Binary(BinaryOp::Atan2, a, b) => {
                write!(f, "atan2(")?;
                a.write(f)?;
                write!(f, ", ")?;
                b.write(f)?;
                write!(f, ")")
            }
            Scalar::Binary(op, a, b) => {
                let (left_min, right_min) = match op {
                    BinaryOp::Add => (PREC_SUM, PREC_SUM),
                    BinaryOp::Sub => (PREC_SUM, PREC_PRODUCT),
                    BinaryOp::Mul => (PREC_PRODUCT, PREC_PREFIX),
                    BinaryOp::Div => (PREC_PRODUCT, PREC_PREFIX + 1),
                    // Right-associative, base must be atomic
                    _ => (PREC_ATOM, PREC_POWER),
                };
                wrap(f, &**a, left_min)?;
                if *op == BinaryOp::Pow {
                    write!(f, "^")?;
                } else {
                    write!(f, " {} ", op.symbol())?;
                }
                wrap(f, &**b, right_min)
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere() {
        let expr = Expr::pow(Expr::x(), 2) + Expr::pow(Expr::y(), 2) + Expr::pow(Expr::z(), 2)
            - Expr::Scalar(Scalar::binary(
                BinaryOp::Pow,
                Scalar::param("r"),
                Scalar::literal(2.0),
            ));
        assert_eq!(expr.to_string(), "x^2 + y^2 + z^2 - r^2");
    }

    #[test]
    fn test_parentheses_follow_grouping() {
        let expr = (Expr::x() + Expr::number(1.0)) * Expr::y();
        assert_eq!(expr.to_string(), "(x + 1) * y");

        let expr = Expr::x() - (Expr::y() - Expr::z());
        assert_eq!(expr.to_string(), "x - (y - z)");

        let expr = Expr::pow(Expr::x() * Expr::y(), 3);
        assert_eq!(expr.to_string(), "(x * y)^3");

        let expr = -(Expr::x() + Expr::y());
        assert_eq!(expr.to_string(), "-(x + y)");
    }

    #[test]
    fn test_scalar_functions_and_division() {
        let divisor = Scalar::binary(
            BinaryOp::Mul,
            Scalar::literal(2.0),
            Scalar::unary(UnaryOp::Sqrt, Scalar::param("a")),
        );
        let expr = Expr::div_scalar(Expr::x(), divisor);
        assert_eq!(expr.to_string(), "x / (2 * sqrt(a))");

        let angle = Scalar::binary(BinaryOp::Atan2, Scalar::param("b"), Scalar::literal(0.5));
        assert_eq!(angle.to_string(), "atan2(b, 0.5)");
    }

    #[test]
    fn test_special_numbers() {
        assert_eq!(Expr::number(f64::NAN).to_string(), "NaN");
        assert_eq!(Expr::number(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(
            Expr::pow(Expr::number(-2.0), 2).to_string(),
            "(-2)^2"
        );
    }
}
