//! Exact fraction arithmetic with simple and mixed fractions.
//!
//! Values keep unsigned magnitudes next to a [`Sign`](sign::Sign) tag. The
//! [`operator`] module folds the tag into a signed numerator, computes, and
//! rebuilds a reduced value.

pub mod error;

pub mod sign;

pub mod utils;

pub mod fraction;

pub mod mixed;

pub mod operator;

pub mod exec_env;

pub mod dispatcher;

pub mod prelude {
    pub use crate::dispatcher::{DispatchResult, Dispatcher};
    pub use crate::error::FractionError;
    pub use crate::exec_env::{ExecEnv, Mode};
    pub use crate::fraction::{Fraction, SignedFraction};
    pub use crate::mixed::{MixedFraction, SignedMixedFraction};
    pub use crate::operator::{self, Operand};
    pub use crate::sign::Sign;
}
