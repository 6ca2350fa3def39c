use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Control operator between the children of a `SequentialCommand`.
///
/// Mirrors the shell operators:
/// - `And` (`&&`): the next command runs only if the previous one succeeded.
/// - `Or` (`||`): the next command runs only if the previous one failed.
/// - `Always` (`;`): every command runs regardless of earlier outcomes, and
///   the aggregate result is reported as succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    And,
    Or,
    Always,
}

impl Default for Operator {
    fn default() -> Self {
        Operator::And
    }
}

impl FromStr for Operator {
    type Err = crate::errors::CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "&&" => Ok(Operator::And),
            "||" => Ok(Operator::Or),
            ";" => Ok(Operator::Always),
            other => Err(crate::errors::CommandError::InvalidArgument(format!(
                "invalid operator: {other} (expected \"&&\", \"||\" or \";\")"
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Always => ";",
        };
        f.write_str(symbol)
    }
}
