use std::fmt::{Display, Formatter};

/// Sign tag stored next to the unsigned magnitudes of a fraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }

    /// `-1` or `1`, for folding the tag back into a signed value.
    pub fn factor(self) -> i128 {
        match self {
            Sign::Positive => 1,
            Sign::Negative => -1,
        }
    }

    pub fn prefix(self) -> &'static str {
        match self {
            Sign::Positive => "",
            Sign::Negative => "-",
        }
    }
}

impl Display for Sign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Sign::Positive => write!(f, "+"),
            Sign::Negative => write!(f, "-"),
        }
    }
}

/// Sign of `numerator / denominator`: negative iff exactly one of them is.
pub fn sign_of_pair(numerator: i128, denominator: i128) -> Sign {
    if (numerator < 0) != (denominator < 0) {
        Sign::Negative
    } else {
        Sign::Positive
    }
}

/// Sign of `integer numerator/denominator` read off raw signed parts.
///
/// A negative denominator cancels a negative integer or numerator. Any
/// single negative part makes the value negative.
pub fn sign_of_triple(integer: i128, numerator: i128, denominator: i128) -> Sign {
    let leading_negative = integer < 0 || numerator < 0;
    match (leading_negative, denominator < 0) {
        (true, true) => Sign::Positive,
        (false, false) => Sign::Positive,
        _ => Sign::Negative,
    }
}
