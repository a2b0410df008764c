use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::{FractionError, Result};
use crate::fraction::Fraction;
use crate::sign::{sign_of_triple, Sign};
use crate::utils::text;

/// A rational number kept as `sign * (integer + numerator / denominator)`.
///
/// Arithmetic goes through the improper [`Fraction`] form; see
/// [`MixedFraction::to_fraction`] and [`Fraction::to_mixed_fraction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MixedFraction {
    integer: u64,
    numerator: u64,
    denominator: u64,
    sign: Sign,
}

/// A mixed fraction with its sign folded into the leading nonzero part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignedMixedFraction {
    pub integer: i128,
    pub numerator: i128,
    pub denominator: i128,
}

impl Default for MixedFraction {
    fn default() -> Self {
        MixedFraction {
            integer: 0,
            numerator: 0,
            denominator: 1,
            sign: Sign::Positive,
        }
    }
}

impl MixedFraction {
    /// Builds `integer numerator/denominator`, deriving the sign from all
    /// three parts.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero. See [`MixedFraction::try_new`].
    pub fn new(integer: i64, numerator: i64, denominator: i64) -> Self {
        match Self::try_new(integer, numerator, denominator) {
            Ok(mixed) => mixed,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn try_new(integer: i64, numerator: i64, denominator: i64) -> Result<Self> {
        if denominator == 0 {
            return Err(FractionError::ZeroDenominator);
        }
        Ok(MixedFraction {
            integer: integer.unsigned_abs(),
            numerator: numerator.unsigned_abs(),
            denominator: denominator.unsigned_abs(),
            sign: sign_of_triple(integer.into(), numerator.into(), denominator.into()),
        })
    }

    /// Builds a mixed fraction from magnitudes and a sign the caller vouches
    /// for.
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero.
    pub fn from_parts(integer: u64, numerator: u64, denominator: u64, sign: Sign) -> Self {
        assert!(denominator != 0, "{}", FractionError::ZeroDenominator);
        MixedFraction {
            integer,
            numerator,
            denominator,
            sign,
        }
    }

    /// Lossy, like [`Fraction::from_decimal`]. The result is not reduced.
    pub fn from_decimal(value: f32) -> Result<Self> {
        Ok(Fraction::from_decimal(value)?.to_mixed_fraction())
    }

    pub fn integer(&self) -> u64 {
        self.integer
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

    pub fn set_integer(&mut self, integer: u64) {
        self.integer = integer;
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
        self.integer == 0 && self.numerator == 0
    }

    pub fn reduce(&self) -> Result<MixedFraction> {
        Ok(self.to_fraction()?.reduce().to_mixed_fraction())
    }

    /// The improper form `(integer * denominator + numerator) / denominator`.
    pub fn to_fraction(&self) -> Result<Fraction> {
        let numerator = self
            .integer
            .checked_mul(self.denominator)
            .and_then(|n| n.checked_add(self.numerator))
            .ok_or(FractionError::Overflow("improper fraction"))?;
        Ok(Fraction::from_parts(numerator, self.denominator, self.sign))
    }

    pub fn with_sign(&self) -> SignedMixedFraction {
        let mut signed = SignedMixedFraction {
            integer: self.integer.into(),
            numerator: self.numerator.into(),
            denominator: self.denominator.into(),
        };
        if self.sign.is_negative() {
            if signed.integer > 0 {
                signed.integer = -signed.integer;
            } else {
                signed.numerator = -signed.numerator;
            }
        }
        signed
    }

    /// Same sign and same rational value, whatever the reduction state or
    /// split between whole and fractional part.
    pub fn is_equivalent(&self, other: &MixedFraction) -> bool {
        if self.sign != other.sign {
            return false;
        }
        // integer + numerator / denominator, with a proper remainder
        let split = |m: &MixedFraction| {
            let whole = u128::from(m.integer) + u128::from(m.numerator / m.denominator);
            (whole, u128::from(m.numerator % m.denominator), u128::from(m.denominator))
        };
        let (whole1, rem1, den1) = split(self);
        let (whole2, rem2, den2) = split(other);
        whole1 == whole2 && rem1 * den2 == rem2 * den1
    }

    pub fn to_float(&self) -> f64 {
        let value = self.integer as f64 + self.numerator as f64 / self.denominator as f64;
        match self.sign {
            Sign::Positive => value,
            Sign::Negative => -value,
        }
    }
}

impl From<Fraction> for MixedFraction {
    fn from(fraction: Fraction) -> Self {
        fraction.to_mixed_fraction()
    }
}

impl TryFrom<MixedFraction> for Fraction {
    type Error = FractionError;

    fn try_from(mixed: MixedFraction) -> Result<Self> {
        mixed.to_fraction()
    }
}

impl FromStr for MixedFraction {
    type Err = FractionError;

    /// Reads `"i"`, `"n/d"` or `"i/n/d"`.
    fn from_str(s: &str) -> Result<Self> {
        let parts = text::parse_parts(s)?;
        match parts[..] {
            [integer] => Self::try_new(integer, 0, 1),
            [numerator, denominator] => Self::try_new(0, numerator, denominator),
            [integer, numerator, denominator] => Self::try_new(integer, numerator, denominator),
            _ => Err(FractionError::format(s, "expected 1 to 3 parts")),
        }
    }
}

impl Display for MixedFraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = self.sign.prefix();
        match (self.integer, self.numerator) {
            (0, 0) => write!(f, "0"),
            (0, numerator) => write!(f, "{}{}/{}", sign, numerator, self.denominator),
            (integer, 0) => write!(f, "{}{}", sign, integer),
            (integer, numerator) => {
                write!(f, "{}{} {}/{}", sign, integer, numerator, self.denominator)
            }
        }
    }
}
