//! Single-variable polynomials in the ray parameter `t`
//!
//! Coefficients are stored in ascending power order: `coeffs[i]` multiplies
//! `t^i`, so the length is always degree + 1. Trailing zero coefficients are
//! allowed and kept unless [`Polynomial::trim`] is called.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{One, Zero};

use crate::error::{AlgebraError, Result};

// =============================================================================
// POLYNOMIAL
// =============================================================================

/// Univariate polynomial with real coefficients
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    /// Ascending-power coefficients, never empty
    coeffs: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from ascending-power coefficients
    pub fn new(coeffs: Vec<f64>) -> Result<Self> {
        if coeffs.is_empty() {
            return Err(AlgebraError::EmptyPolynomial);
        }
        Ok(Polynomial { coeffs })
    }

    /// Create a degree-0 polynomial
    pub fn constant(c: f64) -> Self {
        Polynomial { coeffs: vec![c] }
    }

    /// `c0 + c1*t`
    pub fn linear(c0: f64, c1: f64) -> Self {
        Polynomial {
            coeffs: vec![c0, c1],
        }
    }

    /// Get read access to the coefficients (index = power)
    pub fn coefficients(&self) -> &[f64] {
        &self.coeffs
    }

    pub fn into_coefficients(self) -> Vec<f64> {
        self.coeffs
    }

    /// Formal degree, i.e. number of coefficients minus one
    ///
    /// Trailing zeros count; use [`Polynomial::trim`] for the true degree.
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Evaluate at `t` with Horner's scheme
    pub fn eval(&self, t: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Formal derivative with respect to `t`
    pub fn derivative(&self) -> Polynomial {
        if self.coeffs.len() == 1 {
            return Polynomial::constant(0.0);
        }
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * i as f64)
            .collect();
        Polynomial { coeffs }
    }

    /// Drop trailing coefficients that are exactly zero
    ///
    /// At least one coefficient always remains.
    pub fn trim(mut self) -> Polynomial {
        while self.coeffs.len() > 1 && self.coeffs.last() == Some(&0.0) {
            self.coeffs.pop();
        }
        self
    }

    // Arithmetic (sum, difference, product and negation go through std::ops)

    /// Divide every coefficient by `divisor` (IEEE semantics for zero)
    pub fn div_scalar(&self, divisor: f64) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| c / divisor).collect(),
        }
    }

    /// Raise to a non-negative integer power
    ///
    /// Right-to-left binary exponentiation: walking the exponent bits from the
    /// least significant one, `result = result * square` for every set bit,
    /// then `square = square * square` while bits remain. `result` starts as
    /// the constant 1. Exponent 0 gives the constant 1 and exponent 1 returns
    /// the base unchanged.
    pub fn pow(&self, exponent: u32) -> Polynomial {
        match exponent {
            0 => Polynomial::one(),
            1 => self.clone(),
            _ => {
                let mut result = Polynomial::one();
                let mut square = self.clone();
                let mut e = exponent;
                loop {
                    if e & 1 == 1 {
                        result = &result * &square;
                    }
                    e >>= 1;
                    if e == 0 {
                        break;
                    }
                    square = &square * &square;
                }
                result
            }
        }
    }

    fn zip_padded(&self, other: &Polynomial, op: impl Fn(f64, f64) -> f64) -> Polynomial {
        let len = self.coeffs.len().max(other.coeffs.len());
        let coeffs = (0..len)
            .map(|i| {
                let a = self.coeffs.get(i).copied().unwrap_or(0.0);
                let b = other.coeffs.get(i).copied().unwrap_or(0.0);
                op(a, b)
            })
            .collect();
        Polynomial { coeffs }
    }
}

impl From<f64> for Polynomial {
    fn from(c: f64) -> Self {
        Polynomial::constant(c)
    }
}

impl Zero for Polynomial {
    fn zero() -> Self {
        Polynomial::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }
}

impl One for Polynomial {
    fn one() -> Self {
        Polynomial::constant(1.0)
    }
}

// Operator impls, by value and by reference

impl Add<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    /// Coefficient-wise sum, shorter operand zero-padded
    fn add(self, rhs: &Polynomial) -> Polynomial {
        self.zip_padded(rhs, |a, b| a + b)
    }
}

impl Sub<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    /// Coefficient-wise difference, shorter operand zero-padded
    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self.zip_padded(rhs, |a, b| a - b)
    }
}

impl Mul<&Polynomial> for &Polynomial {
    type Output = Polynomial;

    /// Product by discrete convolution
    fn mul(self, rhs: &Polynomial) -> Polynomial {
        let mut coeffs = vec![0.0; self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in rhs.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b;
            }
        }
        Polynomial { coeffs }
    }
}

macro_rules! forward_by_value {
    ($trait:ident, $method:ident) => {
        impl $trait for Polynomial {
            type Output = Polynomial;
            fn $method(self, rhs: Polynomial) -> Polynomial {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_by_value!(Add, add);
forward_by_value!(Sub, sub);
forward_by_value!(Mul, mul);

impl Neg for &Polynomial {
    type Output = Polynomial;
    fn neg(self) -> Polynomial {
        Polynomial {
            coeffs: self.coeffs.iter().map(|c| -c).collect(),
        }
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;
    fn neg(mut self) -> Polynomial {
        self.coeffs.iter_mut().for_each(|c| *c = -*c);
        self
    }
}

impl Div<f64> for Polynomial {
    type Output = Polynomial;
    fn div(self, rhs: f64) -> Polynomial {
        self.div_scalar(rhs)
    }
}

impl Div<f64> for &Polynomial {
    type Output = Polynomial;
    fn div(self, rhs: f64) -> Polynomial {
        self.div_scalar(rhs)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 && self.coeffs.len() > 1 {
                continue;
            }
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            write_term(f, c.abs(), i)?;
            first = false;
        }
        if first {
            // Every coefficient was zero
            write!(f, "0")?;
        }
        Ok(())
    }
}

fn write_term(f: &mut fmt::Formatter<'_>, magnitude: f64, power: usize) -> fmt::Result {
    match power {
        0 => write!(f, "{}", magnitude),
        1 if magnitude == 1.0 => write!(f, "t"),
        1 => write!(f, "{}t", magnitude),
        _ if magnitude == 1.0 => write!(f, "t^{}", power),
        _ => write!(f, "{}t^{}", magnitude, power),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coeffs: &[f64]) -> Polynomial {
        Polynomial::new(coeffs.to_vec()).unwrap()
    }

    #[test]
    fn test_empty_is_rejected() {
        assert_eq!(Polynomial::new(vec![]), Err(AlgebraError::EmptyPolynomial));
    }

    #[test]
    fn test_add_pads_shorter_operand() {
        let sum = poly(&[1.0, 2.0]) + poly(&[3.0, 0.0, 5.0]);
        assert_eq!(sum.coefficients(), &[4.0, 2.0, 5.0]);

        let diff = poly(&[1.0]) - poly(&[0.0, 1.0]);
        assert_eq!(diff.coefficients(), &[1.0, -1.0]);
    }

    #[test]
    fn test_mul_is_convolution() {
        // (1 + t)(1 - t) = 1 - t^2
        let product = poly(&[1.0, 1.0]) * poly(&[1.0, -1.0]);
        assert_eq!(product.coefficients(), &[1.0, 0.0, -1.0]);
        assert_eq!(product.degree(), 2);
    }

    #[test]
    fn test_neg_and_div_scalar() {
        let p = poly(&[2.0, -4.0]);
        assert_eq!((-&p).coefficients(), &[-2.0, 4.0]);
        assert_eq!((&p / 2.0).coefficients(), &[1.0, -2.0]);

        let inf = p.div_scalar(0.0);
        assert!(inf.coefficients()[0].is_infinite());
    }

    #[test]
    fn test_pow_small_exponents() {
        let p = poly(&[1.0, 1.0]);
        assert_eq!(p.pow(0), Polynomial::one());
        assert_eq!(p.pow(1), p);
        assert_eq!(p.pow(2).coefficients(), &[1.0, 2.0, 1.0]);
        assert_eq!(p.pow(3).coefficients(), &[1.0, 3.0, 3.0, 1.0]);
        assert_eq!(p.pow(4).coefficients(), &[1.0, 4.0, 6.0, 4.0, 1.0]);
    }

    #[test]
    fn test_pow_matches_repeated_multiplication() {
        let p = poly(&[0.5, -1.0, 2.0]);
        let mut naive = Polynomial::one();
        for _ in 0..7 {
            naive = naive * p.clone();
        }
        let fast = p.pow(7);
        assert_eq!(fast.coefficients().len(), naive.coefficients().len());
        for (a, b) in fast.coefficients().iter().zip(naive.coefficients()) {
            assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0));
        }
    }

    #[test]
    fn test_eval_and_derivative() {
        // 3 - 2t + t^3
        let p = poly(&[3.0, -2.0, 0.0, 1.0]);
        assert_eq!(p.eval(2.0), 7.0);
        assert_eq!(p.derivative().coefficients(), &[-2.0, 0.0, 3.0]);
        assert_eq!(Polynomial::constant(4.0).derivative(), Polynomial::zero());
    }

    #[test]
    fn test_trim_keeps_one_coefficient() {
        assert_eq!(poly(&[1.0, 2.0, 0.0, 0.0]).trim().coefficients(), &[1.0, 2.0]);
        assert_eq!(poly(&[0.0, 0.0]).trim().coefficients(), &[0.0]);
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[-1.0, 0.0, 1.0]).to_string(), "-1 + t^2");
        assert_eq!(poly(&[0.0, 2.5, -3.0]).to_string(), "2.5t - 3t^2");
        assert_eq!(poly(&[0.0, 0.0]).to_string(), "0");
        assert_eq!(Polynomial::constant(0.0).to_string(), "0");
    }
}
