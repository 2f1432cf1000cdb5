use std::cell::RefCell;
use std::fmt::{Display, Error, Formatter};

/// A soft diagnostic: the operation completed (using a well-defined fallback), but
/// something in the input deserves attention.
///
/// Warnings are printed to stderr and collected in a thread-local buffer which can be
/// drained using `take_warnings`.
#[derive(Clone, Debug, PartialEq)]
pub enum Warning {
    /// Node logic was not a valid expression and was replaced by no logic.
    InvalidLogic {
        node: String,
        expression: String,
        message: String,
    },
    /// An expression checked by `validate_defined` is not syntactically valid.
    LogicSyntax { expression: String, message: String },
    /// An expression checked by `validate_defined` references an unknown name.
    UndefinedVariable { expression: String, variable: String },
    /// Rebinding `node` dissolved the joint initial state of `group`. The other members
    /// are back to a uniform distribution.
    BindingDissolved { node: String, group: Vec<String> },
    /// The parameter is not recognized and was ignored.
    UnknownParameter(String),
    /// The parameter is derived by the library and cannot be set directly.
    ReservedParameter(String),
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Warning::InvalidLogic {
                node,
                expression,
                message,
            } => write!(
                f,
                "Syntax error in logic `{}` of node `{}` ({}). Logic set to none.",
                expression, node, message
            ),
            Warning::LogicSyntax {
                expression,
                message,
            } => write!(f, "Syntax error in logic `{}`: {}", expression, message),
            Warning::UndefinedVariable {
                expression,
                variable,
            } => write!(
                f,
                "Unknown variable `{}` in logic `{}`.",
                variable, expression
            ),
            Warning::BindingDissolved { node, group } => write!(
                f,
                "Node `{}` was bound to [{}]. Binding removed.",
                node,
                group.join(", ")
            ),
            Warning::UnknownParameter(name) => write!(f, "Unused parameter `{}`.", name),
            Warning::ReservedParameter(name) => {
                write!(f, "Parameter `{}` is computed automatically.", name)
            }
        }
    }
}

thread_local! {
    static WARNINGS: RefCell<Vec<Warning>> = RefCell::new(Vec::new());
}

/// **(internal)** Report a warning on stderr and remember it for `take_warnings`.
pub(crate) fn emit_warning(warning: Warning) {
    eprintln!("WARNING: {}", warning);
    WARNINGS.with(|buffer| buffer.borrow_mut().push(warning));
}

/// Remove and return all warnings emitted by the current thread since the last call.
///
/// The buffer is unbounded, so long-running applications should drain it periodically.
pub fn take_warnings() -> Vec<Warning> {
    WARNINGS.with(|buffer| std::mem::take(&mut *buffer.borrow_mut()))
}
