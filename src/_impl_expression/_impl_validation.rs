use crate::_impl_warning::emit_warning;
use crate::{Error, Expression, Warning};
use std::collections::HashSet;
use std::convert::TryFrom;

/// **(internal)** The first problem found in a list of logic strings.
enum Violation {
    Syntax {
        expression: String,
        message: String,
    },
    Undefined {
        expression: String,
        variables: Vec<String>,
    },
}

/// **(internal)** Check `expressions` in order and stop at the first one that is either
/// not syntactically valid, or references names outside of `names`.
fn first_violation<S: AsRef<str>>(names: &HashSet<String>, expressions: &[S]) -> Option<Violation> {
    for expression in expressions {
        let expression = expression.as_ref();
        match Expression::try_from(expression) {
            Err(message) => {
                return Some(Violation::Syntax {
                    expression: expression.to_string(),
                    message,
                })
            }
            Ok(parsed) => {
                let undefined: Vec<String> = parsed
                    .variables()
                    .into_iter()
                    .filter(|it| !names.contains(it))
                    .collect();
                if !undefined.is_empty() {
                    return Some(Violation::Undefined {
                        expression: expression.to_string(),
                        variables: undefined,
                    });
                }
            }
        }
    }
    None
}

/// True iff `expression` is a complete, syntactically valid logic expression.
pub fn validate_syntax(expression: &str) -> bool {
    Expression::try_from(expression).is_ok()
}

/// True iff every expression is syntactically valid and only references names in `names`.
///
/// The check stops at the first invalid expression and reports it as a `Warning`: either
/// `Warning::LogicSyntax`, or one `Warning::UndefinedVariable` for every unknown name.
pub fn validate_defined<S: AsRef<str>>(names: &HashSet<String>, expressions: &[S]) -> bool {
    match first_violation(names, expressions) {
        None => true,
        Some(Violation::Syntax {
            expression,
            message,
        }) => {
            emit_warning(Warning::LogicSyntax {
                expression,
                message,
            });
            false
        }
        Some(Violation::Undefined {
            expression,
            variables,
        }) => {
            for variable in variables {
                emit_warning(Warning::UndefinedVariable {
                    expression: expression.clone(),
                    variable,
                });
            }
            false
        }
    }
}

/// Lenient validation used when constructing a single `Node`: returns the trimmed
/// `expression` if it is valid, otherwise emits `Warning::InvalidLogic` and returns `None`.
pub fn validate_or_null(node: &str, expression: &str) -> Option<String> {
    match Expression::try_from(expression) {
        Ok(_) => Some(expression.trim().to_string()),
        Err(message) => {
            emit_warning(Warning::InvalidLogic {
                node: node.to_string(),
                expression: expression.to_string(),
                message,
            });
            None
        }
    }
}

/// Strict variant of `validate_defined` used when constructing a `Network`: the first
/// problem is returned as an `Error`.
pub fn validate_or_fail<S: AsRef<str>>(
    names: &HashSet<String>,
    expressions: &[S],
) -> Result<(), Error> {
    match first_violation(names, expressions) {
        None => Ok(()),
        Some(Violation::Syntax {
            expression,
            message,
        }) => Err(Error::LogicSyntax {
            expression,
            message,
        }),
        Some(Violation::Undefined {
            expression,
            mut variables,
        }) => Err(Error::UndefinedVariable {
            expression,
            variable: variables.remove(0),
        }),
    }
}
