use std::str::FromStr;

use tracing::debug;

use crate::{
    exec_env::{BinaryOp, Command, ExecError, Mode, Term},
    prelude::*,
};

#[derive(Debug, Default)]
pub struct Dispatcher {
    pub env: ExecEnv,
}

#[derive(Debug, PartialEq)]
pub enum DispatchResult {
    Success(Option<String>),
    Failure(String),
}

impl Dispatcher {
    pub fn new(mode: Mode) -> Self {
        Dispatcher {
            env: ExecEnv::new(mode),
        }
    }

    pub fn dispatch(&mut self, input: &str) -> DispatchResult {
        debug!(input, "dispatch");
        match parse_command(input).and_then(|command| self.env.execute(command)) {
            Ok(result) => DispatchResult::Success(result.map(|r| r.to_string())),
            Err(e) => DispatchResult::Failure(e.to_string()),
        }
    }
}

fn term(token: &str) -> Term {
    match token {
        "ans" => Term::Ans,
        _ => Term::Literal(token.to_string()),
    }
}

fn number<T: FromStr>(token: &str) -> Result<T, ExecError> {
    token
        .parse()
        .map_err(|_| ExecError::InvalidNumber(token.to_string()))
}

/// Splits a line on whitespace and reads it as one calculator command.
///
/// Fraction literals use the slash grammar without inner spaces, so
/// `1/2 / 3/4` divides two fractions.
pub fn parse_command(line: &str) -> Result<Command, ExecError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    let command = match tokens[..] {
        [] => Command::Nothing,
        [":simple"] => Command::SetMode(Mode::Simple),
        [":mixed"] => Command::SetMode(Mode::Mixed),
        [":mode"] => Command::ShowMode,
        ["sqrt", a] => Command::Sqrt(term(a)),
        ["sqrtf", a] => Command::SqrtFloat(term(a)),
        ["reduce", a] => Command::Reduce(term(a)),
        ["float", a] => Command::Float(term(a)),
        ["mixed", a] => Command::ToMixed(term(a)),
        ["improper", a] => Command::ToImproper(term(a)),
        ["decimal", x] => Command::Decimal(number(x)?),
        ["pow", a, e] | [a, "^", e] => Command::Power(term(a), number(e)?),
        ["gcd", a, b] => Command::Gcd(number(a)?, number(b)?),
        ["lcm", a, b] => Command::Lcm(number(a)?, number(b)?),
        ["equiv", a, b] => Command::Equivalent(term(a), term(b)),
        [a, op, b] => {
            let op = match op {
                "+" => BinaryOp::Add,
                "-" => BinaryOp::Subtract,
                "*" => BinaryOp::Multiply,
                "/" => BinaryOp::Divide,
                _ => return Err(ExecError::UnknownCommand(line.trim().to_string())),
            };
            Command::Binary(op, term(a), term(b))
        }
        [a] => Command::Echo(term(a)),
        _ => return Err(ExecError::UnknownCommand(line.trim().to_string())),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(text: &str) -> Term {
        Term::Literal(text.to_string())
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("   ").unwrap(), Command::Nothing);
        assert_eq!(
            parse_command("1/2 / -3/4").unwrap(),
            Command::Binary(BinaryOp::Divide, literal("1/2"), literal("-3/4"))
        );
        assert_eq!(
            parse_command("ans - 1").unwrap(),
            Command::Binary(BinaryOp::Subtract, Term::Ans, literal("1"))
        );
        assert_eq!(parse_command("2/3 ^ 2").unwrap(), Command::Power(literal("2/3"), 2.0));
        assert_eq!(parse_command("pow 2/3 0.5").unwrap(), Command::Power(literal("2/3"), 0.5));
        assert_eq!(parse_command("gcd 24 -36").unwrap(), Command::Gcd(24, -36));
        assert_eq!(parse_command(":mixed").unwrap(), Command::SetMode(Mode::Mixed));
        assert_eq!(parse_command("5/2/-4").unwrap(), Command::Echo(literal("5/2/-4")));
    }

    #[test]
    fn test_parse_command_invalid() {
        assert_eq!(
            parse_command("1/2 % 3"),
            Err(ExecError::UnknownCommand("1/2 % 3".to_string()))
        );
        assert_eq!(
            parse_command("gcd 1/2 3"),
            Err(ExecError::InvalidNumber("1/2".to_string()))
        );
        assert!(parse_command("a b c d").is_err());
    }

    #[test]
    fn test_dispatch() {
        let mut dispatcher = Dispatcher::default();
        assert_eq!(
            dispatcher.dispatch("1/2 + 1/3"),
            DispatchResult::Success(Some("5/6".to_string()))
        );
        assert_eq!(
            dispatcher.dispatch("2/3 / 3/4"),
            DispatchResult::Success(Some("8/9".to_string()))
        );
        assert_eq!(dispatcher.dispatch(""), DispatchResult::Success(None));
        assert_eq!(
            dispatcher.dispatch("1 / 0"),
            DispatchResult::Failure("division by zero".to_string())
        );
    }

    #[test]
    fn test_dispatch_mixed_mode() {
        let mut dispatcher = Dispatcher::new(Mode::Mixed);
        assert_eq!(
            dispatcher.dispatch("5/2/-4"),
            DispatchResult::Success(Some("-5 2/4".to_string()))
        );
        assert_eq!(
            dispatcher.dispatch("reduce ans"),
            DispatchResult::Success(Some("-5 1/2".to_string()))
        );
        assert_eq!(
            dispatcher.dispatch("2/1/4 * 3/1/6"),
            DispatchResult::Success(Some("7 1/8".to_string()))
        );
        assert!(matches!(dispatcher.dispatch("2/abc/5"), DispatchResult::Failure(_)));
    }
}
