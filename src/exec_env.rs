use std::fmt::{Display, Formatter};

use thiserror::Error;
use tracing::debug;

use crate::error::FractionError;
use crate::fraction::Fraction;
use crate::mixed::MixedFraction;
use crate::operator::{self, Operand};

/// How literals are read and results are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Simple,
    Mixed,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Simple => write!(f, "simple"),
            Mode::Mixed => write!(f, "mixed"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Value {
    Simple(Fraction),
    Mixed(MixedFraction),
}

impl Value {
    pub fn to_simple(&self) -> Result<Fraction, FractionError> {
        match self {
            Value::Simple(fraction) => Ok(*fraction),
            Value::Mixed(mixed) => mixed.to_fraction(),
        }
    }

    pub fn to_mixed(&self) -> MixedFraction {
        match self {
            Value::Simple(fraction) => fraction.to_mixed_fraction(),
            Value::Mixed(mixed) => *mixed,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Simple(fraction) => write!(f, "{}", fraction),
            Value::Mixed(mixed) => write!(f, "{}", mixed),
        }
    }
}

/// An operand as written: a literal, or the previous result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
    Ans,
    Literal(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn apply<T: Operand>(self, lhs: &T, rhs: &T) -> Result<T, FractionError> {
        match self {
            BinaryOp::Add => operator::add(lhs, rhs),
            BinaryOp::Subtract => operator::subtract(lhs, rhs),
            BinaryOp::Multiply => operator::multiply(lhs, rhs),
            BinaryOp::Divide => operator::divide(lhs, rhs),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Nothing,
    Echo(Term),
    Binary(BinaryOp, Term, Term),
    Power(Term, f64),
    Sqrt(Term),
    SqrtFloat(Term),
    Gcd(i64, i64),
    Lcm(i64, i64),
    Reduce(Term),
    Float(Term),
    ToMixed(Term),
    ToImproper(Term),
    Equivalent(Term, Term),
    Decimal(f32),
    SetMode(Mode),
    ShowMode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExecResult {
    Value(Value),
    Float(f64),
    Integer(u64),
    Bool(bool),
    Message(String),
}

impl Display for ExecResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExecResult::Value(number) => write!(f, "{}", number),
            ExecResult::Float(value) => write!(f, "{}", value),
            ExecResult::Integer(value) => write!(f, "{}", value),
            ExecResult::Bool(value) => write!(f, "{}", value),
            ExecResult::Message(message) => write!(f, "{}", message),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecError {
    #[error(transparent)]
    Fraction(#[from] FractionError),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("no previous result")]
    NoAnswer,
}

/// Calculator state: the literal mode and the last numeric result.
#[derive(Clone, Debug, Default)]
pub struct ExecEnv {
    mode: Mode,
    ans: Option<Value>,
}

impl ExecEnv {
    pub fn new(mode: Mode) -> Self {
        ExecEnv { mode, ans: None }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn ans(&self) -> Option<Value> {
        self.ans
    }

    pub fn execute(&mut self, command: Command) -> Result<Option<ExecResult>, ExecError> {
        debug!(?command, mode = %self.mode, "execute");
        let result = match command {
            Command::Nothing => return Ok(None),
            Command::SetMode(mode) => {
                self.mode = mode;
                return Ok(Some(ExecResult::Message(format!("mode: {}", mode))));
            }
            Command::ShowMode => return Ok(Some(ExecResult::Message(format!("mode: {}", self.mode)))),
            Command::Echo(term) => {
                let number = self.resolve(&term)?;
                ExecResult::Value(self.in_mode(number)?)
            }
            Command::Binary(op, lhs, rhs) => {
                let (lhs, rhs) = (self.resolve(&lhs)?, self.resolve(&rhs)?);
                ExecResult::Value(match self.mode {
                    Mode::Simple => Value::Simple(op.apply(&lhs.to_simple()?, &rhs.to_simple()?)?),
                    Mode::Mixed => Value::Mixed(op.apply(&lhs.to_mixed(), &rhs.to_mixed())?),
                })
            }
            Command::Power(term, exponent) => {
                let number = self.resolve(&term)?;
                ExecResult::Value(match self.mode {
                    Mode::Simple => Value::Simple(operator::power(&number.to_simple()?, exponent)?),
                    Mode::Mixed => Value::Mixed(operator::power(&number.to_mixed(), exponent)?),
                })
            }
            Command::Sqrt(term) => {
                let number = self.resolve(&term)?;
                ExecResult::Value(match self.mode {
                    Mode::Simple => Value::Simple(operator::sqrt_as_fraction(&number.to_simple()?)?),
                    Mode::Mixed => Value::Mixed(operator::sqrt_as_fraction(&number.to_mixed())?),
                })
            }
            Command::SqrtFloat(term) => {
                let number = self.resolve(&term)?;
                ExecResult::Float(operator::sqrt_as_float(&number.to_simple()?)?)
            }
            Command::Gcd(a, b) => ExecResult::Integer(operator::gcd(a, b)),
            Command::Lcm(a, b) => ExecResult::Integer(operator::lcm(a, b)?),
            Command::Reduce(term) => {
                let number = self.resolve(&term)?;
                ExecResult::Value(match number {
                    Value::Simple(fraction) => Value::Simple(fraction.reduce()),
                    Value::Mixed(mixed) => Value::Mixed(mixed.reduce()?),
                })
            }
            Command::Float(term) => {
                let number = self.resolve(&term)?;
                ExecResult::Float(match number {
                    Value::Simple(fraction) => fraction.to_float(),
                    Value::Mixed(mixed) => mixed.to_float(),
                })
            }
            Command::ToMixed(term) => ExecResult::Value(Value::Mixed(self.resolve(&term)?.to_mixed())),
            Command::ToImproper(term) => {
                ExecResult::Value(Value::Simple(self.resolve(&term)?.to_simple()?))
            }
            Command::Equivalent(lhs, rhs) => {
                let (lhs, rhs) = (self.resolve(&lhs)?, self.resolve(&rhs)?);
                ExecResult::Bool(lhs.to_mixed().is_equivalent(&rhs.to_mixed()))
            }
            Command::Decimal(value) => ExecResult::Value(match self.mode {
                Mode::Simple => Value::Simple(Fraction::from_decimal(value)?),
                Mode::Mixed => Value::Mixed(MixedFraction::from_decimal(value)?),
            }),
        };

        if let ExecResult::Value(number) = &result {
            self.ans = Some(*number);
        }
        Ok(Some(result))
    }

    fn resolve(&self, term: &Term) -> Result<Value, ExecError> {
        match term {
            Term::Ans => self.ans.ok_or(ExecError::NoAnswer),
            Term::Literal(text) => Ok(match self.mode {
                Mode::Simple => Value::Simple(text.parse()?),
                Mode::Mixed => Value::Mixed(text.parse()?),
            }),
        }
    }

    fn in_mode(&self, number: Value) -> Result<Value, ExecError> {
        Ok(match self.mode {
            Mode::Simple => Value::Simple(number.to_simple()?),
            Mode::Mixed => Value::Mixed(number.to_mixed()),
        })
    }
}
