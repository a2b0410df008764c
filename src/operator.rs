//! Arithmetic over [`Fraction`] and [`MixedFraction`].
//!
//! Every function works the same way: both operands are brought to their
//! improper form, the sign is folded into the numerator, the result pair is
//! computed with checked signed arithmetic, and a fresh reduced value is
//! built from it. Mixed fractions have no arithmetic of their own.

use std::ops::{Add, Div, Mul, Neg, Sub};

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, One, ToPrimitive, Zero};
use tracing::trace;

use crate::error::{FractionError, Result};
use crate::fraction::{Fraction, SignedFraction};
use crate::mixed::MixedFraction;
use crate::sign::Sign;

/// A value the operators accept, convertible to and from an improper
/// fraction.
pub trait Operand: Sized {
    fn to_fraction(&self) -> Result<Fraction>;

    fn from_fraction(fraction: Fraction) -> Self;
}

impl Operand for Fraction {
    fn to_fraction(&self) -> Result<Fraction> {
        Ok(*self)
    }

    fn from_fraction(fraction: Fraction) -> Self {
        fraction
    }
}

impl Operand for MixedFraction {
    fn to_fraction(&self) -> Result<Fraction> {
        MixedFraction::to_fraction(self)
    }

    fn from_fraction(fraction: Fraction) -> Self {
        fraction.to_mixed_fraction()
    }
}

fn signed<T: Operand>(value: &T) -> Result<SignedFraction> {
    Ok(value.to_fraction()?.with_sign())
}

fn finish<T: Operand>(op: &'static str, numerator: Option<i128>, denominator: Option<i128>) -> Result<T> {
    let (numerator, denominator) = match (numerator, denominator) {
        (Some(n), Some(d)) => (n, d),
        _ => return Err(FractionError::Overflow(op)),
    };
    trace!(op, %numerator, %denominator, "raw result");
    let fraction = SignedFraction { numerator, denominator }
        .into_fraction()
        .map_err(|e| match e {
            FractionError::Overflow(_) => FractionError::Overflow(op),
            e => e,
        })?;
    Ok(T::from_fraction(fraction.reduce()))
}

pub fn add<T: Operand>(lhs: &T, rhs: &T) -> Result<T> {
    let (a, b) = (signed(lhs)?, signed(rhs)?);
    let numerator = a
        .numerator
        .checked_mul(b.denominator)
        .zip(b.numerator.checked_mul(a.denominator))
        .and_then(|(x, y)| x.checked_add(y));
    finish("add", numerator, a.denominator.checked_mul(b.denominator))
}

pub fn subtract<T: Operand>(lhs: &T, rhs: &T) -> Result<T> {
    let (a, b) = (signed(lhs)?, signed(rhs)?);
    let numerator = a
        .numerator
        .checked_mul(b.denominator)
        .zip(b.numerator.checked_mul(a.denominator))
        .and_then(|(x, y)| x.checked_sub(y));
    finish("subtract", numerator, a.denominator.checked_mul(b.denominator))
}

pub fn multiply<T: Operand>(lhs: &T, rhs: &T) -> Result<T> {
    let (a, b) = (signed(lhs)?, signed(rhs)?);
    finish(
        "multiply",
        a.numerator.checked_mul(b.numerator),
        a.denominator.checked_mul(b.denominator),
    )
}

/// Fails with [`FractionError::DivisionByZero`] when `rhs` is zero.
pub fn divide<T: Operand>(lhs: &T, rhs: &T) -> Result<T> {
    let (a, b) = (signed(lhs)?, signed(rhs)?);
    if b.numerator == 0 {
        return Err(FractionError::DivisionByZero);
    }
    finish(
        "divide",
        a.numerator.checked_mul(b.denominator),
        a.denominator.checked_mul(b.numerator),
    )
}

/// Real square root of the value. Negative values give NaN.
pub fn sqrt_as_float<T: Operand>(value: &T) -> Result<f64> {
    let signed = signed(value)?;
    let root = (signed.numerator as f64 / signed.denominator as f64).sqrt();
    trace!(root, "sqrt");
    Ok(root)
}

/// Square root taken on numerator and denominator separately, each rounded
/// to the nearest integer. Exact only when both are perfect squares. The
/// sign tag is ignored and the result is positive.
pub fn sqrt_as_fraction<T: Operand>(value: &T) -> Result<T> {
    let fraction = value.to_fraction()?;
    let root = |magnitude: u64| (magnitude as f64).sqrt().round().to_i128();
    finish("sqrt", root(fraction.numerator()), root(fraction.denominator()))
}

/// Raises numerator and denominator to `exponent` separately and truncates
/// each to an integer. Non integer exponents lose precision.
pub fn power<T: Operand>(value: &T, exponent: f64) -> Result<T> {
    let signed = signed(value)?;
    let raise = |base: i128| (base as f64).powf(exponent).trunc().to_i128();
    finish("power", raise(signed.numerator), raise(signed.denominator))
}

pub(crate) fn gcd_magnitudes(a: u64, b: u64) -> u64 {
    let (mut a, mut b) = if a < b { (b, a) } else { (a, b) };

    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }

    a
}

/// Greatest common divisor of `|a|` and `|b|`; `gcd(a, 0) == |a|`.
pub fn gcd(a: i64, b: i64) -> u64 {
    gcd_magnitudes(a.unsigned_abs(), b.unsigned_abs())
}

/// Least common multiple `|a * b| / gcd(a, b)`.
pub fn lcm(a: i64, b: i64) -> Result<u64> {
    let gcd = gcd(a, b);
    if gcd == 0 {
        return Err(FractionError::DivisionByZero);
    }
    let product = u128::from(a.unsigned_abs()) * u128::from(b.unsigned_abs());
    u64::try_from(product / u128::from(gcd)).map_err(|_| FractionError::Overflow("lcm"))
}

// Operator traits. Like the primitive integers they panic where the
// functions above return an error; the `Checked*` impls do not.
macro_rules! impl_operand_ops {
    ($t:ident) => {
        impl Add for $t {
            type Output = $t;

            fn add(self, rhs: $t) -> $t {
                add(&self, &rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl Sub for $t {
            type Output = $t;

            fn sub(self, rhs: $t) -> $t {
                subtract(&self, &rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl Mul for $t {
            type Output = $t;

            fn mul(self, rhs: $t) -> $t {
                multiply(&self, &rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl Div for $t {
            type Output = $t;

            fn div(self, rhs: $t) -> $t {
                divide(&self, &rhs).unwrap_or_else(|e| panic!("{}", e))
            }
        }

        impl Add for &$t {
            type Output = $t;

            fn add(self, rhs: &$t) -> $t {
                *self + *rhs
            }
        }

        impl Sub for &$t {
            type Output = $t;

            fn sub(self, rhs: &$t) -> $t {
                *self - *rhs
            }
        }

        impl Mul for &$t {
            type Output = $t;

            fn mul(self, rhs: &$t) -> $t {
                *self * *rhs
            }
        }

        impl Div for &$t {
            type Output = $t;

            fn div(self, rhs: &$t) -> $t {
                *self / *rhs
            }
        }

        impl Neg for $t {
            type Output = $t;

            fn neg(mut self) -> $t {
                let sign = match self.sign() {
                    Sign::Positive => Sign::Negative,
                    Sign::Negative => Sign::Positive,
                };
                self.set_sign(sign);
                self
            }
        }

        impl CheckedAdd for $t {
            fn checked_add(&self, rhs: &$t) -> Option<$t> {
                add(self, rhs).ok()
            }
        }

        impl CheckedSub for $t {
            fn checked_sub(&self, rhs: &$t) -> Option<$t> {
                subtract(self, rhs).ok()
            }
        }

        impl CheckedMul for $t {
            fn checked_mul(&self, rhs: &$t) -> Option<$t> {
                multiply(self, rhs).ok()
            }
        }

        impl CheckedDiv for $t {
            fn checked_div(&self, rhs: &$t) -> Option<$t> {
                divide(self, rhs).ok()
            }
        }

        impl Zero for $t {
            fn zero() -> $t {
                $t::default()
            }

            fn is_zero(&self) -> bool {
                $t::is_zero(self)
            }
        }
    };
}

impl_operand_ops!(Fraction);
impl_operand_ops!(MixedFraction);

impl One for Fraction {
    fn one() -> Self {
        Fraction::new(1, 1)
    }
}

impl One for MixedFraction {
    fn one() -> Self {
        MixedFraction::new(1, 0, 1)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn mixed_parts(mixed: &MixedFraction) -> (u64, u64, u64, Sign) {
        (mixed.integer(), mixed.numerator(), mixed.denominator(), mixed.sign())
    }

    #[test]
    fn test_add() {
        let sum = add(&Fraction::new(1, 2), &Fraction::new(1, 3)).unwrap();
        assert_eq!(sum, Fraction::new(5, 6));

        let sum = add(&MixedFraction::new(2, 1, 4), &MixedFraction::new(3, 1, 6)).unwrap();
        assert_eq!(mixed_parts(&sum), (5, 5, 12, Sign::Positive));

        let sum = add(&Fraction::new(-1, 2), &Fraction::new(1, 3)).unwrap();
        assert_eq!(sum, Fraction::new(-1, 6));
    }

    #[test]
    fn test_subtract() {
        let difference = subtract(&Fraction::new(3, 4), &Fraction::new(1, 2)).unwrap();
        assert_eq!(difference, Fraction::new(1, 4));

        let difference = subtract(&MixedFraction::new(2, 1, 4), &MixedFraction::new(3, 1, 6)).unwrap();
        assert_eq!(mixed_parts(&difference), (0, 11, 12, Sign::Negative));

        let difference = subtract(&Fraction::new(1, 3), &Fraction::new(1, 3)).unwrap();
        assert_eq!(difference, Fraction::new(0, 1));
    }

    #[test]
    fn test_multiply() {
        let product = multiply(&Fraction::new(2, 3), &Fraction::new(3, 4)).unwrap();
        assert_eq!(product, Fraction::new(1, 2));

        let product = multiply(&MixedFraction::new(2, 1, 4), &MixedFraction::new(3, 1, 6)).unwrap();
        assert_eq!(mixed_parts(&product), (7, 1, 8, Sign::Positive));

        let product = multiply(&Fraction::new(-2, 3), &Fraction::new(-3, 4)).unwrap();
        assert_eq!(product, Fraction::new(1, 2));
    }

    #[test]
    fn test_divide() {
        let quotient = divide(&Fraction::new(2, 3), &Fraction::new(3, 4)).unwrap();
        assert_eq!(quotient, Fraction::new(8, 9));

        let quotient = divide(&MixedFraction::new(2, 1, 4), &MixedFraction::new(3, 1, 6)).unwrap();
        assert_eq!(mixed_parts(&quotient), (0, 27, 38, Sign::Positive));

        let quotient = divide(&Fraction::new(1, 2), &Fraction::new(-1, 4)).unwrap();
        assert_eq!(quotient, Fraction::new(-2, 1));
    }

    #[test]
    fn test_divide_by_zero() {
        let zero = Fraction::default();
        assert_eq!(divide(&Fraction::new(1, 2), &zero), Err(FractionError::DivisionByZero));
        assert_eq!(
            divide(&MixedFraction::new(1, 1, 2), &MixedFraction::default()),
            Err(FractionError::DivisionByZero)
        );
    }

    #[test]
    fn test_overflow() {
        let big = Fraction::from_parts(u64::MAX, 1, Sign::Positive);
        assert_eq!(add(&big, &big), Err(FractionError::Overflow("add")));
        assert_eq!(multiply(&big, &big), Err(FractionError::Overflow("multiply")));

        // fits the signed intermediate, not the magnitudes
        let wide = Fraction::from_parts(1 << 40, 1, Sign::Positive);
        assert_eq!(multiply(&wide, &wide), Err(FractionError::Overflow("multiply")));
        assert_eq!(power(&wide, 2.0), Err(FractionError::Overflow("power")));
        assert!(big.checked_add(&big).is_none());
    }

    #[test]
    fn test_sqrt_as_float() {
        assert_relative_eq!(sqrt_as_float(&Fraction::new(9, 4)).unwrap(), 1.5);
        assert_relative_eq!(sqrt_as_float(&MixedFraction::new(2, 1, 4)).unwrap(), 1.5);
        assert!(sqrt_as_float(&Fraction::new(-9, 4)).unwrap().is_nan());
    }

    #[test]
    fn test_sqrt_as_fraction() {
        let root = sqrt_as_fraction(&Fraction::new(9, 4)).unwrap();
        assert_eq!(root, Fraction::new(3, 2));

        let root = sqrt_as_fraction(&MixedFraction::new(2, 1, 4)).unwrap();
        assert_eq!(mixed_parts(&root), (1, 1, 2, Sign::Positive));

        // rounded, not exact
        let root = sqrt_as_fraction(&Fraction::new(2, 1)).unwrap();
        assert_eq!(root, Fraction::new(1, 1));
    }

    #[test]
    fn test_power() {
        let squared = power(&Fraction::new(2, 3), 2.0).unwrap();
        assert_eq!(squared, Fraction::new(4, 9));

        let squared = power(&MixedFraction::new(2, 1, 4), 2.0).unwrap();
        assert_eq!(mixed_parts(&squared), (5, 1, 16, Sign::Positive));

        let cubed = power(&Fraction::new(-1, 2), 3.0).unwrap();
        assert_eq!(cubed, Fraction::new(-1, 8));

        let inverse = power(&Fraction::new(1, 2), -1.0);
        assert_eq!(inverse, Err(FractionError::ZeroDenominator));

        assert_eq!(power(&Fraction::new(-1, 2), 0.5), Err(FractionError::Overflow("power")));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(24, 36), 12);
        assert_eq!(gcd(17, 23), 1);
        assert_eq!(gcd(-24, 36), 12);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(gcd(i64::MIN, 0), 1 << 63);
    }

    #[test]
    fn test_lcm() {
        assert_eq!(lcm(24, 36).unwrap(), 72);
        assert_eq!(lcm(17, 23).unwrap(), 391);
        assert_eq!(lcm(-4, 6).unwrap(), 12);
        assert_eq!(lcm(5, 0).unwrap(), 0);
        assert_eq!(lcm(0, 0), Err(FractionError::DivisionByZero));
        assert_eq!(lcm(i64::MAX, i64::MAX - 1), Err(FractionError::Overflow("lcm")));
    }

    #[test]
    fn test_operator_traits() {
        let a = Fraction::new(1, 2);
        let b = Fraction::new(1, 3);
        assert_eq!(a + b, Fraction::new(5, 6));
        assert_eq!(&a - &b, Fraction::new(1, 6));
        assert_eq!(a * b, Fraction::new(1, 6));
        assert_eq!(a / b, Fraction::new(3, 2));
        assert_eq!(-a, Fraction::new(-1, 2));
        assert_eq!(a.checked_div(&Fraction::zero()), None);
        assert!(Fraction::zero().is_zero());
        assert_eq!(Fraction::one() * a, a);

        let m = MixedFraction::new(1, 1, 2);
        assert_eq!(m + m, MixedFraction::new(3, 0, 1));
        assert_eq!((-m).to_string(), "-1 1/2");
        assert!(MixedFraction::zero().is_zero());
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_div_trait_panics_on_zero() {
        let _ = Fraction::new(1, 2) / Fraction::zero();
    }
}
