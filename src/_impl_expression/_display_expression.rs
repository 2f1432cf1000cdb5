use crate::Expression;
use crate::Expression::*;
use std::fmt::{Display, Error, Formatter};

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Const(true) => write!(f, "True")?,
            Const(false) => write!(f, "False")?,
            Var(name) => write!(f, "{name}")?,
            // The grammar does not allow stacked negations without parentheses.
            Not(inner) if matches!(**inner, Not(_)) => write!(f, "!({inner})")?,
            Not(inner) => write!(f, "!{inner}")?,
            Binary(op, l, r) => write!(f, "({l} {op} {r})")?,
        }
        Ok(())
    }
}
