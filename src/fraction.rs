use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::{FractionError, Result};
use crate::mixed::MixedFraction;
use crate::operator::gcd_magnitudes;
use crate::sign::{sign_of_pair, Sign};
use crate::utils::{decimal, text};

/// A rational number kept as `sign * numerator / denominator`.
///
/// Both magnitudes are unsigned; the sign lives only in the tag. Equality is
/// structural, so `1/2` and `2/4` are different values that are
/// [equivalent](Fraction::is_equivalent).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: u64,
    denominator: u64,
    sign: Sign,
}

/// A fraction with its sign folded into the numerator, ready for plain
/// signed arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedFraction {
    pub numerator: i128,
    pub denominator: i128,
}

impl SignedFraction {
    /// Splits the signed pair back into magnitudes and a sign tag.
    pub fn into_fraction(self) -> Result<Fraction> {
        Fraction::from_signed(self.numerator, self.denominator)
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction {
            numerator: 0,
            denominator: 1,
            sign: Sign::Positive,
        }
    }
}

impl Fraction {
    /// Builds `numerator / denominator`, deriving the sign from the inputs.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero. See [`Fraction::try_new`].
    pub fn new(numerator: i64, denominator: i64) -> Self {
        match Self::try_new(numerator, denominator) {
            Ok(fraction) => fraction,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(numerator: i64, denominator: i64) -> Result<Self> {
        Self::from_signed(numerator.into(), denominator.into())
    }

    /// Builds a fraction from magnitudes and a sign the caller vouches for.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub fn from_parts(numerator: u64, denominator: u64, sign: Sign) -> Self {
        assert!(denominator != 0, "{}", FractionError::ZeroDenominator);
        Fraction {
            numerator,
            denominator,
            sign,
        }
    }

    pub(crate) fn from_signed(numerator: i128, denominator: i128) -> Result<Self> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        let magnitude =
            |v: i128| u64::try_from(v.unsigned_abs()).map_err(|_| FractionError::Overflow("fraction"));
        Ok(Fraction {
            numerator: magnitude(numerator)?,
            denominator: magnitude(denominator)?,
            sign: sign_of_pair(numerator, denominator),
        })
    }

    /// Approximates a decimal, see [`decimal::to_pair`] for the precision
    /// bound. The result is not reduced.
    pub fn from_decimal(value: f32) -> Result<Self> {
        let (numerator, denominator) = decimal::to_pair(value)?;
        Self::try_new(numerator, denominator)
    }

    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn set_numerator(&mut self, numerator: u64) {
        self.numerator = numerator;
    }

    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub fn set_denominator(&mut self, denominator: u64) {
        assert!(denominator != 0, "{}", FractionError::ZeroDenominator);
        self.denominator = denominator;
    }

    pub fn set_sign(&mut self, sign: Sign) {
        self.sign = sign;
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Divides both magnitudes by their gcd. The sign is kept as is.
    pub fn reduce(&self) -> Fraction {
        let gcd = gcd_magnitudes(self.numerator, self.denominator);
        Fraction {
            numerator: self.numerator / gcd,
            denominator: self.denominator / gcd,
            sign: self.sign,
        }
    }

    /// Splits off the whole part; the remainder keeps the denominator.
    pub fn to_mixed_fraction(&self) -> MixedFraction {
        let integer = self.numerator / self.denominator;
        let remainder = self.numerator % self.denominator;

        if remainder == 0 {
            MixedFraction::from_parts(integer, 0, 1, self.sign)
        } else {
            MixedFraction::from_parts(integer, remainder, self.denominator, self.sign)
        }
    }

    pub fn with_sign(&self) -> SignedFraction {
        SignedFraction {
            numerator: self.sign.factor() * i128::from(self.numerator),
            denominator: self.denominator.into(),
        }
    }

    /// Same sign and same rational value, whatever the reduction state.
    pub fn is_equivalent(&self, other: &Fraction) -> bool {
        if self.sign != other.sign {
            return false;
        }
        let lhs = u128::from(self.numerator) * u128::from(other.denominator);
        let rhs = u128::from(other.numerator) * u128::from(self.denominator);
        lhs == rhs
    }

    pub fn to_float(&self) -> f64 {
        let value = self.numerator as f64 / self.denominator as f64;
        match self.sign {
            Sign::Positive => value,
            Sign::Negative => -value,
        }
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::new(value, 1)
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Reads `"n"`, `"n/d"` or `"a/b/c"`.
    ///
    /// The three part form is a whole number followed by a fraction and is
    /// flattened into the single fraction `(|a*c| + |b|) / c`, negative when
    /// `a` or `b` is.
    fn from_str(s: &str) -> Result<Self> {
        let parts = text::parse_parts(s)?;
        let (numerator, denominator): (i128, i128) = match parts[..] {
            [whole] => (whole.into(), 1),
            [numerator, denominator] => (numerator.into(), denominator.into()),
            [whole, numerator, denominator] => {
                let (whole, numerator, denominator) =
                    (i128::from(whole), i128::from(numerator), i128::from(denominator));
                let mut flat = (whole * denominator).abs() + numerator.abs();
                if whole < 0 || numerator < 0 {
                    flat = -flat;
                }
                (flat, denominator)
            }
            _ => return Err(FractionError::format(s, "expected 1 to 3 parts")),
        };
        Self::from_signed(numerator, denominator)
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = self.sign.prefix();
        if self.numerator % self.denominator == 0 {
            write!(f, "{}{}", sign, self.numerator / self.denominator)
        } else {
            write!(f, "{}{}/{}", sign, self.numerator, self.denominator)
        }
    }
}
