//! Argument parsing helpers shared by bot scripts.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected a boolean value (yes/no, true/false, t/f, y/n, 1/0), got '{0}'")]
pub struct ParseBoolError(pub String);

/// Converts sensible user input into a boolean.
///
/// Accepts `yes`/`true`/`t`/`y`/`1` and `no`/`false`/`f`/`n`/`0`, case
/// insensitively. Anything else is an error, which callers should treat as
/// fatal at argument-parsing time.
pub fn parse_bool(value: &str) -> Result<bool, ParseBoolError> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" | "t" | "y" | "1" => Ok(true),
        "no" | "false" | "f" | "n" | "0" => Ok(false),
        _ => Err(ParseBoolError(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_truthy() {
        for value in ["yes", "true", "t", "y", "1", "YES", "True", "T"] {
            assert_eq!(parse_bool(value), Ok(true), "rejected {:?}", value);
        }
    }

    #[test]
    fn test_parse_bool_falsey() {
        for value in ["no", "false", "f", "n", "0", "NO", "False", "F"] {
            assert_eq!(parse_bool(value), Ok(false), "rejected {:?}", value);
        }
    }

    #[test]
    fn test_parse_bool_rejects_everything_else() {
        for value in ["", "maybe", "2", "on", "off", "truee"] {
            let err = parse_bool(value).unwrap_err();
            assert_eq!(err, ParseBoolError(value.to_string()));
        }
    }
}
