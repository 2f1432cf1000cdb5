use crate::BinaryOp::*;
use crate::Expression;
use crate::Expression::*;
use std::collections::HashMap;

/// **(internal)** `Expression` to canonical string.
mod _display_expression;
/// **(internal)** `Expression` parsing.
mod _from_string_for_expression;
/// **(internal)** Strict and lenient checks of logic strings.
mod _impl_validation;

pub use _impl_validation::{validate_defined, validate_or_fail, validate_or_null, validate_syntax};

impl Expression {
    /// Return the names referenced by this expression, in the order of their first occurrence.
    pub fn variables(&self) -> Vec<String> {
        let mut result = Vec::new();
        self.dump_variables(&mut result);
        result
    }

    /// **(internal)** Utility method to extract all variable names used in this expression.
    fn dump_variables(&self, variables: &mut Vec<String>) {
        match self {
            Const(_) => {}
            Var(name) => {
                if !variables.contains(name) {
                    variables.push(name.clone());
                }
            }
            Not(inner) => inner.dump_variables(variables),
            Binary(_, l, r) => {
                l.dump_variables(variables);
                r.dump_variables(variables);
            }
        }
    }

    /// Evaluate this expression in the given valuation of variables.
    ///
    /// Returns `None` if the valuation does not assign some referenced variable.
    pub fn evaluate(&self, values: &HashMap<String, bool>) -> Option<bool> {
        match self {
            Const(value) => Some(*value),
            Var(name) => values.get(name).cloned(),
            Not(inner) => inner.evaluate(values).map(|it| !it),
            Binary(op, l, r) => {
                let l = l.evaluate(values);
                let r = r.evaluate(values);
                match op {
                    And => match (l, r) {
                        (Some(false), _) | (_, Some(false)) => Some(false),
                        (Some(true), Some(true)) => Some(true),
                        _ => None,
                    },
                    Or => match (l, r) {
                        (Some(true), _) | (_, Some(true)) => Some(true),
                        (Some(false), Some(false)) => Some(false),
                        _ => None,
                    },
                    Xor => match (l, r) {
                        (Some(l), Some(r)) => Some(l ^ r),
                        _ => None,
                    },
                }
            }
        }
    }
}
