use crate::Rate;
use regex::Regex;
use std::fmt::{Display, Error, Formatter};

lazy_static! {
    /// Matches references to external variables (`$name`) inside rate expressions.
    static ref EXTERNAL_REFERENCE: Regex = Regex::new(r"\$([a-zA-Z_][a-zA-Z0-9_]*)").unwrap();
}

impl Rate {
    /// Interpret a string as a rate: plain numbers become `Rate::Value`, everything
    /// else is kept verbatim as `Rate::Expr`.
    pub fn parse(value: &str) -> Rate {
        let value = value.trim();
        match value.parse::<f64>() {
            Ok(number) if number.is_finite() => Rate::Value(number),
            _ => Rate::Expr(value.to_string()),
        }
    }

    /// True if this rate is a plain number which is not negative.
    pub fn is_valid(&self) -> bool {
        match self {
            Rate::Value(value) => value.is_finite() && *value >= 0.0,
            Rate::Expr(expression) => !expression.trim().is_empty(),
        }
    }

    /// Names (without `$`) of the external variables referenced by this rate.
    pub fn external_variables(&self) -> Vec<String> {
        let mut result = Vec::new();
        if let Rate::Expr(expression) = self {
            for captures in EXTERNAL_REFERENCE.captures_iter(expression) {
                let name = captures[1].to_string();
                if !result.contains(&name) {
                    result.push(name);
                }
            }
        }
        result
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Rate::Value(value) => write!(f, "{}", value),
            Rate::Expr(expression) => write!(f, "{}", expression),
        }
    }
}

impl From<f64> for Rate {
    fn from(value: f64) -> Self {
        Rate::Value(value)
    }
}

impl From<&str> for Rate {
    fn from(value: &str) -> Self {
        Rate::parse(value)
    }
}

impl From<String> for Rate {
    fn from(value: String) -> Self {
        Rate::parse(value.as_str())
    }
}
