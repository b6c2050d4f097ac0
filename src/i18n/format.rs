//! Positional template formatting.
//!
//! Supported placeholders:
//!
//! | Placeholder | Argument | Output |
//! |-------------|----------|--------|
//! | `%s`        | any      | the argument's display form |
//! | `%.Nf`      | number   | fixed point with `N` decimals |
//! | `%f`        | number   | fixed point with 6 decimals |
//! | `%%`        | none     | a literal `%` |
//!
//! Arguments are consumed left to right. Extra arguments are ignored.

use std::fmt;
use thiserror::Error;

const DEFAULT_PRECISION: usize = 6;

/// A value substituted into a template.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Number(f64),
    Text(String),
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Number(n) => write!(f, "{}", n),
            FormatArg::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Number(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Text(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("no argument supplied for placeholder {position}")]
    MissingArgument { position: usize },

    #[error("placeholder {position} expects a number")]
    ExpectedNumber { position: usize },

    #[error("unsupported placeholder '{0}'")]
    UnsupportedPlaceholder(String),
}

/// Fill `template` with `args`.
pub fn format_template(template: &str, args: &[FormatArg]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();
    let mut next_arg = args.iter();
    let mut position = 0;

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('%') => out.push('%'),
            Some('s') => {
                let arg = next_arg
                    .next()
                    .ok_or(FormatError::MissingArgument { position })?;
                out.push_str(&arg.to_string());
                position += 1;
            }
            Some('f') => {
                let value = take_number(&mut next_arg, position)?;
                out.push_str(&format!("{:.*}", DEFAULT_PRECISION, value));
                position += 1;
            }
            Some('.') => {
                let mut digits = String::new();
                while let Some(d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                    digits.push(*d);
                    chars.next();
                }
                match chars.next() {
                    Some('f') if !digits.is_empty() => {
                        let precision = digits.parse::<usize>().map_err(|_| {
                            FormatError::UnsupportedPlaceholder(format!("%.{}f", digits))
                        })?;
                        let value = take_number(&mut next_arg, position)?;
                        out.push_str(&format!("{:.*}", precision, value));
                        position += 1;
                    }
                    other => {
                        let tail = other.map(String::from).unwrap_or_default();
                        return Err(FormatError::UnsupportedPlaceholder(format!(
                            "%.{}{}",
                            digits, tail
                        )));
                    }
                }
            }
            Some(other) => return Err(FormatError::UnsupportedPlaceholder(format!("%{}", other))),
            None => return Err(FormatError::UnsupportedPlaceholder("%".to_string())),
        }
    }

    Ok(out)
}

fn take_number<'a>(
    args: &mut impl Iterator<Item = &'a FormatArg>,
    position: usize,
) -> Result<f64, FormatError> {
    match args.next() {
        Some(FormatArg::Number(n)) => Ok(*n),
        Some(FormatArg::Text(_)) => Err(FormatError::ExpectedNumber { position }),
        None => Err(FormatError::MissingArgument { position }),
    }
}
